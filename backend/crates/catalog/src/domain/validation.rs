//! Extension form validation

use kernel::validation::{ValidationErrors, char_len};

use crate::domain::dto::{ExtensionCreateDto, ExtensionUpdateDto};

pub const NAME_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Create/edit extension form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionForm {
    pub name: String,
    pub description: String,
    pub tag_ids: Vec<String>,
}

impl ExtensionForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name_len = char_len(&self.name);
        if name_len < 1 {
            errors.push("name", "Extension name is required");
        } else if name_len > NAME_MAX_LENGTH {
            errors.push("name", "Extension name must be less than 100 characters");
        }
        if char_len(&self.description) > DESCRIPTION_MAX_LENGTH {
            errors.push(
                "description",
                "Description must be less than 1000 characters",
            );
        }

        errors.into_result(())
    }

    /// Validated create request on behalf of `uploader_id`
    pub fn into_create(self, uploader_id: impl Into<String>) -> Result<ExtensionCreateDto, ValidationErrors> {
        self.validate()?;
        Ok(ExtensionCreateDto {
            uploader_id: uploader_id.into(),
            name: self.name,
            description: Some(self.description).filter(|d| !d.is_empty()),
            tag_ids: Some(self.tag_ids).filter(|ids| !ids.is_empty()),
        })
    }

    /// Validated update request; tags are always sent so they can be cleared
    pub fn into_update(self) -> Result<ExtensionUpdateDto, ValidationErrors> {
        self.validate()?;
        Ok(ExtensionUpdateDto {
            name: Some(self.name),
            description: Some(self.description),
            tag_ids: Some(self.tag_ids),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, description: &str) -> ExtensionForm {
        ExtensionForm {
            name: name.to_string(),
            description: description.to_string(),
            tag_ids: Vec::new(),
        }
    }

    #[test]
    fn test_name_required() {
        let errors = form("", "").validate().unwrap_err();
        assert_eq!(errors.for_field("name"), Some("Extension name is required"));
    }

    #[test]
    fn test_length_limits() {
        assert!(form(&"n".repeat(100), &"d".repeat(1000)).validate().is_ok());

        let errors = form(&"n".repeat(101), &"d".repeat(1001)).validate().unwrap_err();
        assert_eq!(
            errors.for_field("name"),
            Some("Extension name must be less than 100 characters")
        );
        assert_eq!(
            errors.for_field("description"),
            Some("Description must be less than 1000 characters")
        );
    }

    #[test]
    fn test_lengths_count_characters() {
        assert!(form(&"é".repeat(100), "").validate().is_ok());
    }

    #[test]
    fn test_into_create() {
        let create = ExtensionForm {
            name: "Dark Theme".to_string(),
            description: String::new(),
            tag_ids: vec!["t1".to_string()],
        }
        .into_create("u1")
        .unwrap();
        assert_eq!(create.uploader_id, "u1");
        assert_eq!(create.description, None);
        assert_eq!(create.tag_ids, Some(vec!["t1".to_string()]));
    }

    #[test]
    fn test_into_update_sends_empty_tags() {
        let update = form("Dark Theme", "").into_update().unwrap();
        assert_eq!(update.tag_ids, Some(Vec::new()));
    }
}
