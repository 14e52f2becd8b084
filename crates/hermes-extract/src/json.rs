//! JSON body extractors.
//!
//! [`Json`] decodes the request body; [`ValidatedJson`] additionally runs the
//! target's [`Validate`] rules and renders every violation into one message.
//! Decoder diagnostics are logged, never returned to the caller.

use crate::validation::collect_violations;
use crate::{ExtractionContext, ExtractionError, FromRequest};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use validator::Validate;

/// Extractor for JSON request bodies.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{Json, FromRequest, ExtractionContext};
/// use http::{Method, Uri, HeaderMap};
/// use bytes::Bytes;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateUser {
///     name: String,
///     email: String,
/// }
///
/// let body = br#"{"name": "Alice", "email": "alice@example.com"}"#;
///
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/users"),
///     HeaderMap::new(),
///     Bytes::from_static(body),
/// );
///
/// let Json(user) = Json::<CreateUser>::from_request(&ctx).unwrap();
/// assert_eq!(user.name, "Alice");
/// assert_eq!(user.email, "alice@example.com");
/// ```
///
/// # Empty Bodies
///
/// An empty body is malformed. Endpoints that accept one can extract
/// `Result<Json<T>, ExtractionError>` and treat `MALFORMED_BODY` as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consumes the Json and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for Json<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        decode_body(ctx).map(Json)
    }
}

/// Extractor for JSON request bodies that must pass validation.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{ExtractionContext, FromRequest, ValidatedJson};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Debug, Deserialize, Validate)]
/// struct Signup {
///     #[validate(email)]
///     email: String,
/// }
///
/// let ctx = ExtractionContext::new(
///     Method::POST,
///     Uri::from_static("/signup"),
///     HeaderMap::new(),
///     Bytes::from_static(br#"{"email": "nope"}"#),
/// );
///
/// let err = ValidatedJson::<Signup>::from_request(&ctx).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "validation error: email must be a valid email address"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Consumes the `ValidatedJson` and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned + Validate> FromRequest for ValidatedJson<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        validate_body(ctx).map(ValidatedJson)
    }
}

/// Decodes the body into `T` and validates it.
///
/// Decoding failures (including an empty body) produce the fixed malformed
/// body error. Validation failures produce one error whose message lists
/// every violation.
pub fn validate_body<T>(ctx: &ExtractionContext) -> Result<T, ExtractionError>
where
    T: DeserializeOwned + Validate,
{
    let value: T = decode_body(ctx)?;

    if let Err(errors) = value.validate() {
        let violations = collect_violations(&errors);
        let message = ctx.options().templates.aggregate(&violations);
        tracing::debug!(
            http.method = %ctx.method(),
            http.path = ctx.path(),
            target_type = std::any::type_name::<T>(),
            violations = violations.len(),
            error = %message,
            "request body failed validation"
        );
        return Err(ExtractionError::validation_failed(violations, message));
    }

    Ok(value)
}

fn decode_body<T: DeserializeOwned>(ctx: &ExtractionContext) -> Result<T, ExtractionError> {
    let body = ctx.body();
    let limit = ctx.options().max_body_bytes;

    if body.len() > limit {
        return Err(ExtractionError::payload_too_large(limit, body.len()));
    }

    if body.is_empty() {
        tracing::debug!(http.path = ctx.path(), "empty request body");
        return Err(ExtractionError::malformed_body());
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(
            http.path = ctx.path(),
            target_type = std::any::type_name::<T>(),
            error = %e,
            "request body decoding failed"
        );
        ExtractionError::malformed_body()
    })
}
