//! Backend Response Envelope
//!
//! Every backend endpoint answers with `{ success, message, data?, errors? }`.
//! The gateway reuses the same shape for its own failures so the front-end
//! only ever has to understand one format.

use serde::{Deserialize, Serialize};

/// `{ success, message, data?, errors? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiEnvelope<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    /// Failure envelope; `errors` is omitted when empty
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }

    /// The message to show for a failed envelope, or `fallback` if the
    /// backend left it empty
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message.trim().is_empty() {
            fallback
        } else {
            &self.message
        }
    }

    /// `Some(data)` only when `success` is true and data is present
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Token {
        token: String,
    }

    #[test]
    fn test_deserialize_success() {
        let envelope: ApiEnvelope<Token> = serde_json::from_value(json!({
            "success": true,
            "message": "Login successful",
            "data": { "token": "abc" }
        }))
        .unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.into_data().unwrap().token, "abc");
    }

    #[test]
    fn test_deserialize_failure_without_data() {
        let envelope: ApiEnvelope<Token> = serde_json::from_value(json!({
            "success": false,
            "message": "Invalid username or password",
            "data": null,
            "errors": ["Invalid credentials"]
        }))
        .unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.errors.as_deref(), Some(&["Invalid credentials".to_string()][..]));
    }

    #[test]
    fn test_absent_data_and_errors_for_payload_without_default() {
        let envelope: ApiEnvelope<Token> = serde_json::from_value(json!({
            "success": false,
            "message": "Session expired"
        }))
        .unwrap();
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.errors, None);
        assert_eq!(envelope.message_or("Authentication failed"), "Session expired");
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let envelope: ApiEnvelope<Token> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        assert_eq!(envelope.message_or("Authentication failed"), "Authentication failed");
    }

    #[test]
    fn test_into_data_ignores_data_on_failure() {
        let envelope = ApiEnvelope {
            success: false,
            message: String::new(),
            data: Some(1),
            errors: None,
        };
        assert_eq!(envelope.into_data(), None);
    }

    #[test]
    fn test_failure_serialization_shape() {
        let value = serde_json::to_value(ApiEnvelope::<()>::failure(
            "An unexpected error occurred",
            vec!["Failed to connect to authentication service".into()],
        ))
        .unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "An unexpected error occurred",
                "errors": ["Failed to connect to authentication service"]
            })
        );
    }

    #[test]
    fn test_failure_omits_empty_errors() {
        let value = serde_json::to_value(ApiEnvelope::<()>::failure("Nope", Vec::new())).unwrap();
        assert_eq!(value, json!({ "success": false, "message": "Nope" }));
    }
}
