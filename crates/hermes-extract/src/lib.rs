//! # Hermes Extract
//!
//! Typed request binding and uniform response envelopes for Hermes.
//!
//! This crate turns untyped request data into strongly-typed values and
//! shapes every response the same way. Query strings are bound onto
//! [`QueryParams`](bind::QueryParams) types with strict unknown-key
//! rejection; JSON bodies are decoded and validated with [`validator`].
//!
//! ## Extractors
//!
//! | Extractor | Source | Description |
//! |-----------|--------|-------------|
//! | [`Query<T>`] | Query string | Bind declared query parameters |
//! | [`RawQuery`] | Query string | Access the raw query string |
//! | [`Json<T>`] | Request body | Deserialize a JSON body |
//! | [`ValidatedJson<T>`] | Request body | Deserialize and validate a JSON body |
//!
//! ## Example
//!
//! ```rust
//! use hermes_extract::{validate_query, ExtractionContext, Responder};
//! use hermes_macros::QueryParams;
//! use http::{HeaderMap, Method, StatusCode, Uri};
//! use bytes::Bytes;
//!
//! #[derive(Debug, Default, QueryParams)]
//! struct ListParams {
//!     #[query("name")]
//!     name: String,
//!     #[query("age")]
//!     age: i64,
//! }
//!
//! let ctx = ExtractionContext::new(
//!     Method::GET,
//!     Uri::from_static("/users?name=Alice&age=30"),
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//!
//! let response = match validate_query::<ListParams>(&ctx) {
//!     Ok(params) => Responder::new(&ctx).ok(params.name),
//!     Err(rejection) => rejection.into_response(),
//! };
//! assert_eq!(response.status(), StatusCode::OK);
//! ```
//!
//! ## Error Handling
//!
//! All extractors return [`ExtractionError`] on failure. Every extraction
//! error is a client error and carries a source, a stable code and a
//! caller-facing message:
//!
//! ```rust
//! use hermes_extract::{ExtractionError, ExtractionSource};
//!
//! let err = ExtractionError::malformed_body();
//! assert_eq!(err.extraction_source(), ExtractionSource::Body);
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Lets `#[derive(QueryParams)]` resolve `::hermes_extract` inside this crate.
extern crate self as hermes_extract;

pub mod bind;
mod context;
mod error;
mod extractor;
mod facade;
mod json;
mod query;
pub mod response;
pub mod validation;

// Re-export main types
pub use context::{ExtractOptions, ExtractionContext, ExtractionContextBuilder, DEFAULT_MAX_BODY_BYTES};
pub use error::{ExtractionError, ExtractionSource, MALFORMED_BODY_MESSAGE};
pub use extractor::FromRequest;
pub use facade::{validate_query, Rejection, Responder};
pub use json::{validate_body, Json, ValidatedJson};
pub use query::{Query, RawQuery};
pub use response::{error_response, success_response, EnvelopeError, ErrorEnvelope, SuccessEnvelope};
pub use validation::{MessageTemplates, Violation};
