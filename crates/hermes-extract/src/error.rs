//! Extraction error types.
//!
//! This module provides error types for extraction failures,
//! including information about the source of the error.

use http::StatusCode;
use std::fmt;

use crate::bind::BindError;
use crate::validation::Violation;

/// Fixed message for bodies that cannot be decoded. Decoder internals are
/// never exposed to the caller.
pub const MALFORMED_BODY_MESSAGE: &str = "invalid request format: please check your JSON data";

/// Source of extraction (where data was being extracted from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Query string parameters
    Query,
    /// Request body
    Body,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "query"),
            Self::Body => write!(f, "body"),
        }
    }
}

/// Error that occurs during extraction.
///
/// Contains information about the source of the error and what went wrong.
/// Every extraction error is terminal for the request and maps to a client
/// error status.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{ExtractionError, ExtractionSource};
/// use hermes_extract::bind::BindError;
/// use http::StatusCode;
///
/// let err = ExtractionError::binding(BindError::UnknownParameter { key: "sort".into() });
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.extraction_source(), ExtractionSource::Query);
/// assert_eq!(err.to_string(), "query parameter 'sort' not allowed");
/// ```
#[derive(Debug)]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    field: Option<String>,
    message: String,
}

#[derive(Debug)]
enum ExtractionErrorKind {
    /// Query parameters could not be bound
    Binding(BindError),
    /// Body is empty or not valid JSON for the target type
    MalformedBody,
    /// Decoded body failed field-level validation
    ValidationFailed(Vec<Violation>),
    /// Body is too large
    PayloadTooLarge,
}

impl ExtractionError {
    /// Creates an error for a failed query bind.
    #[must_use]
    pub fn binding(error: BindError) -> Self {
        Self {
            extraction_source: ExtractionSource::Query,
            field: error.key().map(String::from),
            message: error.to_string(),
            kind: ExtractionErrorKind::Binding(error),
        }
    }

    /// Creates an error for a body that could not be decoded.
    ///
    /// The decoder's own diagnostic is not part of the message.
    #[must_use]
    pub fn malformed_body() -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::MalformedBody,
            message: MALFORMED_BODY_MESSAGE.to_string(),
            field: None,
        }
    }

    /// Creates an error for a validation failure.
    ///
    /// `message` is the aggregated, caller-facing text for all violations.
    #[must_use]
    pub fn validation_failed(violations: Vec<Violation>, message: impl Into<String>) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            field: violations.first().map(|v| v.field.clone()),
            kind: ExtractionErrorKind::ValidationFailed(violations),
            message: message.into(),
        }
    }

    /// Creates an error for a payload that's too large.
    #[must_use]
    pub fn payload_too_large(max_size: usize, actual_size: usize) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::PayloadTooLarge,
            message: format!(
                "payload too large: max {max_size} bytes, got {actual_size} bytes"
            ),
            field: None,
        }
    }

    /// Returns the extraction source.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the first offending field or query key, if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the underlying bind error for query failures.
    #[must_use]
    pub fn bind_error(&self) -> Option<&BindError> {
        match &self.kind {
            ExtractionErrorKind::Binding(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the field-level violations for validation failures.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match &self.kind {
            ExtractionErrorKind::ValidationFailed(violations) => violations,
            _ => &[],
        }
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractionErrorKind::Binding(_)
            | ExtractionErrorKind::MalformedBody
            | ExtractionErrorKind::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ExtractionErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns the error code suitable for logs and envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match &self.kind {
            ExtractionErrorKind::Binding(err) => err.code(),
            ExtractionErrorKind::MalformedBody => "MALFORMED_BODY",
            ExtractionErrorKind::ValidationFailed(_) => "VALIDATION_FAILED",
            ExtractionErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ExtractionErrorKind::Binding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BindError> for ExtractionError {
    fn from(error: BindError) -> Self {
        Self::binding(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_error() {
        let err = ExtractionError::binding(BindError::InvalidBoolean {
            key: "active".to_string(),
            value: "maybe".to_string(),
        });

        assert_eq!(err.extraction_source(), ExtractionSource::Query);
        assert_eq!(err.field(), Some("active"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_BOOLEAN");
        assert!(err.bind_error().is_some());
        assert!(err.to_string().contains("active"));
    }

    #[test]
    fn test_malformed_body_error() {
        let err = ExtractionError::malformed_body();

        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert_eq!(err.field(), None);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert_eq!(err.to_string(), MALFORMED_BODY_MESSAGE);
    }

    #[test]
    fn test_validation_failed_error() {
        let violations = vec![Violation::new("email", "email")];
        let err = ExtractionError::validation_failed(
            violations,
            "validation error: email must be a valid email address",
        );

        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert_eq!(err.field(), Some("email"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.violations().len(), 1);
        assert!(err.bind_error().is_none());
    }

    #[test]
    fn test_payload_too_large_error() {
        let err = ExtractionError::payload_too_large(1024, 2048);

        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("2048"));
    }

    #[test]
    fn test_extraction_source_display() {
        assert_eq!(ExtractionSource::Query.to_string(), "query");
        assert_eq!(ExtractionSource::Body.to_string(), "body");
    }
}
