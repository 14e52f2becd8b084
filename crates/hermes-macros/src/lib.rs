//! Procedural macros for Hermes query binding.
//!
//! # Overview
//!
//! `#[derive(QueryParams)]` generates the field table and assignment code
//! the Hermes query binder works from, replacing hand-written
//! `QueryParams` implementations.
//!
//! # Example
//!
//! ```rust
//! use hermes_extract::bind::{bind, QueryMultimap};
//! use hermes_macros::QueryParams;
//!
//! #[derive(Debug, Default, QueryParams)]
//! struct UserFilter {
//!     #[query("name")]
//!     name: String,
//!     #[query(name = "min_age")]
//!     min_age: i64,
//!     #[query("role")]
//!     roles: Vec<String>,
//!     // Not bindable: no query name.
//!     cursor: String,
//! }
//!
//! let query = QueryMultimap::parse("name=Alice&min_age=21&role=admin,ops");
//! let filter: UserFilter = bind(&query).unwrap();
//! assert_eq!(filter.roles, vec!["admin", "ops"]);
//! ```
//!
//! # Field Types
//!
//! Tagged fields are classified by their type name:
//!
//! | Type | Shape |
//! |------|-------|
//! | `String` | string |
//! | `i64` | integer |
//! | `bool` | boolean |
//! | `DateTime<Utc>` | timestamp |
//! | `Vec<String>` | list of string |
//! | `Vec<i64>` | list of integer |
//!
//! Any other type still compiles, but binding a key routed to it fails at
//! runtime with an unsupported-type error.

mod derive;
mod parse;

use proc_macro::TokenStream;

/// Derives `hermes_extract::bind::QueryParams` for a struct with named fields.
///
/// # Attributes
///
/// - `#[query("key")]` or `#[query(name = "key")]` on a field: binds the
///   field to query key `key`. Fields without it are never set.
/// - `#[query(crate = "path")]` on the struct: path to `hermes_extract`
///   when it is re-exported (for example `"::hermes::extract"`).
///
/// Two fields sharing a query key is a compile error.
///
/// # Generated Code
///
/// The macro generates approximately:
///
/// ```rust,ignore
/// impl ::hermes_extract::bind::QueryParams for UserFilter {
///     fn descriptor() -> TypeDescriptor {
///         const FIELDS: &[FieldDescriptor] = &[
///             FieldDescriptor::new("name", Some("name"), <String as FromBoundValue>::SHAPE),
///             FieldDescriptor::new("cursor", None, <String as FromBoundValue>::SHAPE),
///         ];
///         TypeDescriptor::new("UserFilter", FIELDS)
///     }
///
///     fn assign(&mut self, index: usize, value: BoundValue) -> Result<(), BindError> {
///         match index {
///             0 => { self.name = value.into_field("name")?; Ok(()) }
///             _ => Err(BindError::unknown_field(index)),
///         }
///     }
/// }
/// ```
#[proc_macro_derive(QueryParams, attributes(query))]
pub fn derive_query_params(input: TokenStream) -> TokenStream {
    derive::expand_query_params(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
