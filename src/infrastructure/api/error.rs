//! Errors reported by the REST client

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The backend answered with a non-success status
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: u16,
        detail: Option<String>,
    },

    /// The response body was not the JSON we expected
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    /// Backend-supplied message, if the error carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}

/// FastAPI-style error body: `{"detail": "..."}` or
/// `{"detail": [{"msg": "...", ...}, ...]}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Items(Vec<Value>),
    Other(Value),
}

/// Pull the user-facing message out of an error body.
///
/// A string detail is used as is; a list yields the first item's `msg`, or
/// the list itself as JSON text when the first item has none. Empty strings,
/// empty lists and any other shape yield `None`.
pub fn extract_detail(body: &Value) -> Option<String> {
    let parsed = ErrorBody::deserialize(body).ok()?;
    match parsed.detail? {
        Detail::Message(message) if !message.is_empty() => Some(message),
        Detail::Message(_) => None,
        Detail::Items(items) => {
            let first = items.first()?;
            let msg = first
                .get("msg")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty());
            match msg {
                Some(msg) => Some(msg.to_string()),
                None => Some(Value::Array(items).to_string()),
            }
        }
        Detail::Other(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_detail() {
        let body = json!({"detail": "Error creating department: duplicate key"});
        assert_eq!(
            extract_detail(&body).as_deref(),
            Some("Error creating department: duplicate key")
        );
    }

    #[test]
    fn test_validation_list_uses_first_msg() {
        let body = json!({"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"},
            {"loc": ["body", "salary"], "msg": "Input should be greater than 0", "type": "greater_than"}
        ]});
        assert_eq!(
            extract_detail(&body).as_deref(),
            Some("value is not a valid email address")
        );
    }

    #[test]
    fn test_list_without_msg_falls_back_to_json() {
        let body = json!({"detail": [{"loc": ["body"]}]});
        assert_eq!(
            extract_detail(&body).as_deref(),
            Some(r#"[{"loc":["body"]}]"#)
        );
    }

    #[test]
    fn test_missing_or_empty_detail() {
        assert_eq!(extract_detail(&json!({})), None);
        assert_eq!(extract_detail(&json!({"detail": ""})), None);
        assert_eq!(extract_detail(&json!({"detail": []})), None);
        assert_eq!(extract_detail(&json!({"detail": {"code": 3}})), None);
        assert_eq!(extract_detail(&json!("plain")), None);
    }

    #[test]
    fn test_detail_accessor() {
        let err = ApiError::Status {
            url: "http://x/employees/".into(),
            status: 422,
            detail: Some("bad".into()),
        };
        assert_eq!(err.detail(), Some("bad"));
        assert!(err.is_rejection());

        let err = ApiError::Transport {
            url: "http://x".into(),
            message: "refused".into(),
        };
        assert_eq!(err.detail(), None);
        assert!(!err.is_rejection());
    }
}
