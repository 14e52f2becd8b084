//! # Hermes
//!
//! Typed request binding and uniform response envelopes for HTTP services.
//!
//! Hermes turns raw request data into typed values and shapes every
//! response the same way:
//!
//! - **Query binding**: declared query keys are bound onto a struct; any
//!   undeclared key rejects the request
//! - **Body validation**: JSON bodies are decoded and checked with
//!   [`validator`](https://docs.rs/validator) rules
//! - **Envelopes**: `{timestamp, data, message, status}` on success and
//!   `{timestamp, method, status, message, error}` on failure
//!
//! ## Quick Start
//!
//! ```rust
//! use hermes::prelude::*;
//! use http::{HeaderMap, Method, StatusCode, Uri};
//! use bytes::Bytes;
//!
//! #[derive(Debug, Default, QueryParams)]
//! #[query(crate = "::hermes::extract")]
//! struct UserQuery {
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
//! let response = match validate_query::<UserQuery>(&ctx) {
//!     Ok(query) => Responder::new(&ctx).ok(query.name),
//!     Err(rejection) => rejection.into_response(),
//! };
//! assert_eq!(response.status(), StatusCode::OK);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! query string ─▶ QueryMultimap ─▶ QuerySchema ─▶ bind ─▶ T ─┐
//!                                                            ├─▶ Responder ─▶ envelope
//! JSON body ───▶ serde_json ───▶ Validate ─▶ violations ─────┘
//! ```

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export extraction, binding and envelopes
pub use hermes_extract as extract;

// Re-export configuration
pub use hermes_config as config;

// Re-export logging setup
pub use hermes_telemetry as telemetry;

// Re-export the derive macro
pub use hermes_macros::QueryParams;

/// Prelude module for convenient imports.
///
/// ```rust
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_extract::{
        validate_body, validate_query, ExtractOptions, ExtractionContext, ExtractionError,
        FromRequest, Json, Query, RawQuery, Rejection, Responder, ValidatedJson,
    };

    // Re-export envelope writers
    pub use hermes_extract::response::{
        error_response, success_response, ErrorEnvelope, SuccessEnvelope,
    };

    // Re-export binding types and the derive
    pub use hermes_extract::bind::{BindError, QueryParams};
    pub use hermes_macros::QueryParams;

    pub use hermes_config::{ConfigLoader, HermesConfig};
    pub use hermes_telemetry::{init_logging, LogConfig};
}
