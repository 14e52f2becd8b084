//! Handler-facing entry points.
//!
//! [`validate_query`] binds the query and, on failure, hands back both the
//! error and the `400` envelope already rendered for it. [`Responder`]
//! writes envelopes for one request.

use bytes::Bytes;
use http::{Method, Response, StatusCode};
use serde::Serialize;
use std::error::Error as StdError;
use std::fmt;

use crate::bind::QueryParams;
use crate::response::{error_response, SuccessEnvelope};
use crate::{ExtractionContext, ExtractionError, FromRequest, Query};

/// A failed extraction together with the error envelope written for it.
#[derive(Debug)]
pub struct Rejection {
    error: ExtractionError,
    response: Response<Bytes>,
}

impl Rejection {
    /// Renders the error envelope for `error`.
    #[must_use]
    pub fn new(method: &Method, error: ExtractionError) -> Self {
        let response = error_response(method, error.status_code(), Some(&error));
        Self { error, response }
    }

    /// Returns the underlying error.
    #[must_use]
    pub fn error(&self) -> &ExtractionError {
        &self.error
    }

    /// Returns the status of the rendered envelope.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Returns the rendered envelope.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        self.response
    }

    /// Splits into the error and the rendered envelope.
    #[must_use]
    pub fn into_parts(self) -> (ExtractionError, Response<Bytes>) {
        (self.error, self.response)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl StdError for Rejection {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}

/// Binds the request query onto `T`.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{validate_query, ExtractionContext};
/// use hermes_macros::QueryParams;
/// use http::{HeaderMap, Method, StatusCode, Uri};
/// use bytes::Bytes;
///
/// #[derive(Debug, Default, QueryParams)]
/// struct Search {
///     #[query("name")]
///     name: String,
/// }
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/users?name=Alice&unknown=1"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// let rejection = validate_query::<Search>(&ctx).unwrap_err();
/// assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
/// assert_eq!(rejection.to_string(), "query parameter 'unknown' not allowed");
/// ```
pub fn validate_query<T: QueryParams>(ctx: &ExtractionContext) -> Result<T, Rejection> {
    Query::<T>::from_request(ctx)
        .map(Query::into_inner)
        .map_err(|error| {
            tracing::debug!(
                http.method = %ctx.method(),
                http.path = ctx.path(),
                error_code = error.error_code(),
                error = %error,
                "query rejected"
            );
            Rejection::new(ctx.method(), error)
        })
}

/// Writes envelopes for a single request.
///
/// When [`ExtractOptions::report_process_time`](crate::ExtractOptions) is
/// set, success envelopes carry the time elapsed since the context was
/// created.
#[derive(Debug, Clone, Copy)]
pub struct Responder<'a> {
    ctx: &'a ExtractionContext,
}

impl<'a> Responder<'a> {
    /// Creates a responder bound to `ctx`.
    #[must_use]
    pub fn new(ctx: &'a ExtractionContext) -> Self {
        Self { ctx }
    }

    /// Writes a success envelope for `data`.
    #[must_use]
    pub fn ok<T: Serialize>(&self, data: T) -> Response<Bytes> {
        let method = self.ctx.method();
        let mut envelope = SuccessEnvelope::for_method(method, data);
        if self.ctx.options().report_process_time {
            envelope = envelope.with_process_time(self.ctx.elapsed());
        }
        envelope.into_response(method)
    }

    /// Writes an error envelope for `status`.
    #[must_use]
    pub fn error(&self, status: StatusCode, error: Option<&dyn StdError>) -> Response<Bytes> {
        error_response(self.ctx.method(), status, error)
    }

    /// Writes the error envelope for a failed extraction.
    #[must_use]
    pub fn reject(&self, error: ExtractionError) -> Response<Bytes> {
        Rejection::new(self.ctx.method(), error).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ExtractOptions, ExtractionContextBuilder};
    use hermes_macros::QueryParams;
    use http::Uri;
    use serde_json::Value;

    #[derive(Debug, Default, QueryParams)]
    struct Paging {
        #[query("page")]
        page: i64,
        #[query("q")]
        q: String,
    }

    fn body_json(response: &Response<Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_validate_query_success() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/items?page=2&q=lamp"))
            .build();
        let paging = validate_query::<Paging>(&ctx).unwrap();
        assert_eq!(paging.page, 2);
        assert_eq!(paging.q, "lamp");
    }

    #[test]
    fn test_validate_query_rejection_envelope() {
        let ctx = ExtractionContextBuilder::new()
            .uri(Uri::from_static("/items?page=two"))
            .build();
        let rejection = validate_query::<Paging>(&ctx).unwrap_err();

        assert_eq!(rejection.error().error_code(), "INVALID_INTEGER");
        let (error, response) = rejection.into_parts();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(&response);
        assert_eq!(body["method"], "GET");
        assert_eq!(body["error"], error.to_string());
    }

    #[test]
    fn test_responder_ok_without_process_time() {
        let ctx = ExtractionContextBuilder::new().method(Method::PUT).build();
        let response = Responder::new(&ctx).ok(vec![1, 2]);

        let body = body_json(&response);
        assert_eq!(body["message"], "Resource updated successfully");
        assert_eq!(body["data"], serde_json::json!([1, 2]));
        assert!(body.get("processTime").is_none());
    }

    #[test]
    fn test_responder_reports_process_time() {
        let ctx = ExtractionContextBuilder::new()
            .options(ExtractOptions {
                report_process_time: true,
                ..ExtractOptions::default()
            })
            .build();
        std::thread::sleep(std::time::Duration::from_millis(1));

        let body = body_json(&Responder::new(&ctx).ok("done"));
        assert!(body["processTime"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_responder_reject_uses_error_status() {
        let ctx = ExtractionContextBuilder::new().method(Method::POST).build();
        let response = Responder::new(&ctx).reject(ExtractionError::malformed_body());

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(&response);
        assert_eq!(body["method"], "POST");
        assert_eq!(
            body["error"],
            "invalid request format: please check your JSON data"
        );
    }

    #[test]
    fn test_responder_error_redacts_server_detail() {
        let ctx = ExtractionContextBuilder::new().build();
        let cause = std::io::Error::other("pool exhausted");
        let response = Responder::new(&ctx).error(StatusCode::SERVICE_UNAVAILABLE, Some(&cause));

        let body = body_json(&response);
        assert_eq!(body["message"], "Service temporarily unavailable");
        assert!(body.get("error").is_none());
    }
}
