//! API request and response types

use serde::Serialize;
use serde_json::Value;

use crate::errors::Result;
use crate::errors::VirtualTaError;
use crate::rag::Link;

/// Validated fields of an ask request
#[derive(Debug)]
pub struct AskQuery {
    pub question: String,
    pub image: Option<String>,
}

/// Extract and validate the ask request fields from a raw JSON body.
///
/// `question` must be a non-empty string; anything else (absent, empty,
/// wrong type) is a validation error. `image` is passed through opaque when
/// present as a string.
///
/// # Errors
/// - Validation error when `question` is absent, empty, or not a string
pub fn parse_ask_request(body: &Value) -> Result<AskQuery> {
    let question = match body.get("question").and_then(Value::as_str) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Err(VirtualTaError::Validation(
                "`question` is required".to_string(),
            ))
        }
    };

    let image = body
        .get("image")
        .and_then(Value::as_str)
        .map(ToString::to_string);

    Ok(AskQuery { question, image })
}

/// Successful answer response
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub links: Vec<Link>,
}

/// Uniform error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Root health response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_valid_request_with_image() {
        let query = parse_ask_request(&json!({
            "question": "What is Docker?",
            "image": "aGVsbG8="
        }))
        .unwrap();
        assert_eq!(query.question, "What is Docker?");
        assert_eq!(query.image.as_deref(), Some("aGVsbG8="));
    }

    #[test]
    fn test_missing_question_rejected() {
        let err = parse_ask_request(&json!({})).unwrap_err();
        assert!(matches!(err, VirtualTaError::Validation(_)));
    }

    #[test]
    fn test_empty_question_rejected() {
        let err = parse_ask_request(&json!({"question": ""})).unwrap_err();
        assert!(matches!(err, VirtualTaError::Validation(_)));
    }

    #[test]
    fn test_non_string_question_rejected() {
        let err = parse_ask_request(&json!({"question": 42})).unwrap_err();
        assert!(matches!(err, VirtualTaError::Validation(_)));
    }

    #[test]
    fn test_image_is_optional() {
        let query = parse_ask_request(&json!({"question": "q"})).unwrap();
        assert!(query.image.is_none());
    }
}
