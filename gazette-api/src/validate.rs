/// Request payload validation
///
/// Validators accumulate field errors into a [`FieldErrors`] list instead
/// of failing on the first violation, so a 400 response reports every
/// problem at once and a client can fix all fields in a single round trip.
///
/// Malformed JSON is itself a validation error on the `body` field, never a
/// parse-level 500.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldError};

/// Accumulator for per-request field errors
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one field error
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// True if no errors have been recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finishes validation: `Ok` if clean, otherwise the accumulated 400
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// Parses a JSON request body.
///
/// Any failure (invalid JSON, wrong shape) becomes a validation error on
/// the `body` field.
pub fn parse_json_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes)
        .map_err(|_| ApiError::Validation(vec![FieldError::new("body", "Not valid JSON")]))
}

/// Checks a required string field.
///
/// Trims the value; an absent or empty-after-trim value records `Missing.`
/// against `field` and yields `None`, otherwise the trimmed string.
pub fn required_trimmed(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Some(trimmed.to_string()),
        _ => {
            errors.add(field, "Missing.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: Option<String>,
        body: Option<String>,
    }

    #[test]
    fn test_parse_json_body_valid() {
        let payload: Payload =
            parse_json_body(br#"{"title": "t", "body": "b"}"#).expect("should parse");
        assert_eq!(payload.title.as_deref(), Some("t"));
        assert_eq!(payload.body.as_deref(), Some("b"));
    }

    #[test]
    fn test_parse_json_body_invalid() {
        let result: Result<Payload, _> = parse_json_body(b"{not json");

        match result {
            Err(ApiError::Validation(errors)) => {
                assert_eq!(errors, vec![FieldError::new("body", "Not valid JSON")]);
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_required_trimmed_accepts_and_trims() {
        let mut errors = FieldErrors::new();

        let value = required_trimmed(&mut errors, "title", Some("  hello  "));

        assert_eq!(value.as_deref(), Some("hello"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_required_trimmed_rejects_missing_and_blank() {
        let mut errors = FieldErrors::new();

        assert_eq!(required_trimmed(&mut errors, "title", None), None);
        assert_eq!(required_trimmed(&mut errors, "body", Some("   ")), None);

        let err = errors.into_result().expect_err("should be an error");
        match err {
            ApiError::Validation(details) => {
                assert_eq!(
                    details,
                    vec![
                        FieldError::new("title", "Missing."),
                        FieldError::new("body", "Missing."),
                    ]
                );
            }
            other => panic!("expected validation error, got {}", other),
        }
    }

    #[test]
    fn test_errors_accumulate_rather_than_fail_fast() {
        let mut errors = FieldErrors::new();
        required_trimmed(&mut errors, "username", Some(""));
        required_trimmed(&mut errors, "password", None);

        match errors.into_result() {
            Err(ApiError::Validation(details)) => assert_eq!(details.len(), 2),
            other => panic!("expected two accumulated errors, got {:?}", other.map(|_| ())),
        }
    }
}
