//! Catalog DTOs
//!
//! Shapes of the backend's extension, version, tag and flag payloads
//! (camelCase JSON). The backend owns every rule about them; these types
//! only carry data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Pagination
// ============================================================================

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub has_next_page: bool,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderDto {
    pub user_id: String,
    #[serde(default)]
    pub validate: bool,
    #[serde(default)]
    pub user: Option<UserDto>,
}

// ============================================================================
// Extensions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionDto {
    pub id: String,
    #[serde(default)]
    pub uploader_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Untyped summary the backend sometimes includes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<Value>,
    #[serde(default)]
    pub tags: Vec<TagDto>,
    #[serde(default)]
    pub version_details: Vec<ExtensionVersionDto>,
    #[serde(default)]
    pub uploader: Option<UploaderDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionCreateDto {
    pub uploader_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

/// Only the fields that are `Some` are sent
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<String>>,
}

// ============================================================================
// Versions and files
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionVersionDto {
    pub id: String,
    pub extension_id: String,
    pub version_name: String,
    pub status: String,
    pub description: String,
    pub version_descriptor: String,
    pub history: String,
    pub dependencies: String,
    pub files: Vec<ExtensionFileDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionVersionCreateDto {
    pub extension_id: String,
    pub version_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionVersionUpdateDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_descriptor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionFileDto {
    pub id: String,
    pub extension_id: String,
    pub version_id: String,
    pub file_path: String,
    pub file_size: u64,
    pub mime_type: String,
}

// ============================================================================
// Tags and flags
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagWithCountDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub extension_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagCreateDto {
    pub extension_id: String,
    pub user_id: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extension_with_nested_details() {
        let extension: ExtensionDto = serde_json::from_value(json!({
            "id": "e1",
            "uploaderId": "u1",
            "name": "Dark Theme",
            "description": "A dark theme",
            "tags": [{ "id": "t1", "name": "themes" }],
            "versionDetails": [{
                "id": "v1",
                "extensionId": "e1",
                "versionName": "1.0.0",
                "status": "Published",
                "files": [{
                    "id": "f1",
                    "extensionId": "e1",
                    "versionId": "v1",
                    "filePath": "/files/dark.zip",
                    "fileSize": 2048,
                    "mimeType": "application/zip"
                }]
            }],
            "uploader": {
                "userId": "u1",
                "validate": true,
                "user": { "userId": "u1", "username": "johndoe", "role": "USER" }
            }
        }))
        .unwrap();

        assert_eq!(extension.tags[0].name, "themes");
        let version = &extension.version_details[0];
        assert_eq!(version.version_name, "1.0.0");
        assert_eq!(version.history, "");
        assert_eq!(version.files[0].file_size, 2048);
        assert_eq!(
            extension.uploader.unwrap().user.unwrap().username,
            "johndoe"
        );
    }

    #[test]
    fn test_create_omits_unset_fields() {
        let body = serde_json::to_value(ExtensionCreateDto {
            uploader_id: "u1".to_string(),
            name: "Dark Theme".to_string(),
            description: None,
            tag_ids: Some(vec!["t1".to_string()]),
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "uploaderId": "u1", "name": "Dark Theme", "tagIds": ["t1"] })
        );
    }

    #[test]
    fn test_empty_update_is_empty_object() {
        let body = serde_json::to_value(ExtensionUpdateDto::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_paginated_defaults() {
        let page: PaginatedResponse<TagDto> = serde_json::from_value(json!({
            "items": [],
            "totalPages": 0
        }))
        .unwrap();
        assert_eq!(page.page_number, 0);
        assert!(!page.has_next_page);
    }
}
