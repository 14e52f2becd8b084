//! Success and error response envelopes.
//!
//! Every response leaves the service in one of two JSON shapes:
//!
//! | Envelope | Fields |
//! |----------|--------|
//! | [`SuccessEnvelope`] | `timestamp`, `data`, `message`, `status`, `processTime` (optional) |
//! | [`ErrorEnvelope`] | `timestamp`, `method`, `status`, `message`, `error` (optional) |
//!
//! The success status and message are derived from the request method;
//! the error message comes from a fixed status table. Error detail is only
//! rendered for client errors (status below 500).
//!
//! # Example
//!
//! ```rust
//! use hermes_extract::response::{error_response, success_response};
//! use http::{Method, StatusCode};
//! use serde_json::json;
//!
//! let ok = success_response(&Method::POST, json!({ "id": 7 }));
//! assert_eq!(ok.status(), StatusCode::CREATED);
//!
//! let err = std::io::Error::other("disk full");
//! let failed = error_response(&Method::GET, StatusCode::INTERNAL_SERVER_ERROR, Some(&err));
//! let body: serde_json::Value = serde_json::from_slice(failed.body()).unwrap();
//! assert!(body.get("error").is_none());
//! ```

use bytes::Bytes;
use chrono::{SecondsFormat, Utc};
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Message used for statuses missing from the error table.
pub const FALLBACK_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again later or contact support.";

/// Errors raised while writing an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The success payload could not be serialized.
    #[error("failed to encode response")]
    Encoding(#[source] serde_json::Error),
}

/// Returns the success status and message for a request method.
///
/// # Example
///
/// ```rust
/// use hermes_extract::response::success_status;
/// use http::{Method, StatusCode};
///
/// assert_eq!(
///     success_status(&Method::GET),
///     (StatusCode::OK, "Resource fetched successfully")
/// );
/// assert_eq!(success_status(&Method::POST).0, StatusCode::CREATED);
/// ```
#[must_use]
pub fn success_status(method: &Method) -> (StatusCode, &'static str) {
    match *method {
        Method::GET => (StatusCode::OK, "Resource fetched successfully"),
        Method::POST => (StatusCode::CREATED, "Resource created successfully"),
        Method::PUT | Method::PATCH => (StatusCode::OK, "Resource updated successfully"),
        Method::DELETE => (StatusCode::OK, "Resource deleted successfully"),
        _ => (StatusCode::OK, "Request processed successfully"),
    }
}

/// Returns the caller-facing message for an error status.
#[must_use]
pub fn error_message(status: StatusCode) -> &'static str {
    match status {
        // 4xx Client Errors
        StatusCode::BAD_REQUEST => "Invalid request parameters or malformed request",
        StatusCode::UNAUTHORIZED => "Authentication required or invalid credentials",
        StatusCode::FORBIDDEN => "You don't have permission to access this resource",
        StatusCode::NOT_FOUND => "The requested resource was not found",
        StatusCode::METHOD_NOT_ALLOWED => "HTTP method not allowed for this endpoint",
        StatusCode::CONFLICT => "Resource conflict or duplicate entry",
        StatusCode::UNPROCESSABLE_ENTITY => "Request validation failed",
        StatusCode::TOO_MANY_REQUESTS => "Too many requests, please try again later",

        // 5xx Server Errors
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
        StatusCode::NOT_IMPLEMENTED => "Feature not implemented",
        StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable",

        _ => FALLBACK_ERROR_MESSAGE,
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Envelope for successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// RFC 3339 time the envelope was built.
    pub timestamp: String,
    /// Handler payload.
    pub data: T,
    /// Human-readable outcome.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Time spent handling the request. Omitted when absent or zero.
    #[serde(
        rename = "processTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "duration_nanos"
    )]
    pub process_time: Option<Duration>,
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Builds the envelope for `data` with status and message derived from `method`.
    #[must_use]
    pub fn for_method(method: &Method, data: T) -> Self {
        let (status, message) = success_status(method);
        Self {
            timestamp: now_rfc3339(),
            data,
            message: message.to_string(),
            status: status.as_u16(),
            process_time: None,
        }
    }

    /// Sets the reported processing time. A zero duration is omitted.
    #[must_use]
    pub fn with_process_time(mut self, elapsed: Duration) -> Self {
        self.process_time = (!elapsed.is_zero()).then_some(elapsed);
        self
    }

    /// Serializes the envelope into an HTTP response.
    ///
    /// If the payload cannot be serialized, a `400` error envelope reporting
    /// the encoding failure is returned instead.
    #[must_use]
    pub fn into_response(self, method: &Method) -> Response<Bytes> {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        match serde_json::to_vec(&self) {
            Ok(body) => json_response(status, body),
            Err(e) => {
                let err = EnvelopeError::Encoding(e);
                tracing::warn!(
                    http.method = %method,
                    error = %err,
                    cause = ?err.source(),
                    "success envelope encoding failed"
                );
                ErrorEnvelope::new(method, StatusCode::BAD_REQUEST, Some(&err)).into_response()
            }
        }
    }
}

/// Envelope for failed responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// RFC 3339 time the envelope was built.
    pub timestamp: String,
    /// Request method.
    pub method: String,
    /// HTTP status code.
    pub status: u16,
    /// Caller-facing message from the status table.
    pub message: String,
    /// Underlying error text. Only present for client errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    /// Builds the envelope for `status`.
    ///
    /// `error` is rendered only when `status` is below 500. Server error
    /// detail is logged and dropped.
    #[must_use]
    pub fn new(method: &Method, status: StatusCode, error: Option<&dyn StdError>) -> Self {
        let detail = error.map(ToString::to_string).filter(|e| !e.is_empty());

        let error = if status.is_server_error() {
            if let Some(detail) = &detail {
                tracing::error!(
                    http.method = %method,
                    http.status_code = status.as_u16(),
                    error = %detail,
                    "server error redacted from response"
                );
            }
            None
        } else {
            detail
        };

        Self {
            timestamp: now_rfc3339(),
            method: method.to_string(),
            status: status.as_u16(),
            message: error_message(status).to_string(),
            error,
        }
    }

    /// Serializes the envelope into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match serde_json::to_vec(&self) {
            Ok(body) => json_response(status, body),
            Err(e) => {
                tracing::error!(error = %e, "error envelope encoding failed");
                let mut response = Response::new(Bytes::from_static(
                    b"failed to encode error response",
                ));
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
                response
            }
        }
    }
}

/// Writes a success envelope for `data`.
#[must_use]
pub fn success_response<T: Serialize>(method: &Method, data: T) -> Response<Bytes> {
    SuccessEnvelope::for_method(method, data).into_response(method)
}

/// Writes an error envelope for `status`.
#[must_use]
pub fn error_response(
    method: &Method,
    status: StatusCode,
    error: Option<&dyn StdError>,
) -> Response<Bytes> {
    ErrorEnvelope::new(method, status, error).into_response()
}

/// `processTime` as integer nanoseconds.
mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_nanos))
    }
}
