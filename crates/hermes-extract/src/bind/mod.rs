//! Type-directed query binding.
//!
//! The pieces, leaves first:
//!
//! | Item | Role |
//! |------|------|
//! | [`parse_timestamp`] | Tries the supported timestamp layouts in order |
//! | [`QuerySchema`] | Maps external query keys to field positions |
//! | [`QueryMultimap`] | Parsed query string, key → raw values |
//! | [`bind`] | Converts a multimap into a populated [`QueryParams`] type |
//!
//! Target types describe themselves through [`QueryParams`], usually via
//! `#[derive(QueryParams)]` from `hermes-macros`.

mod binder;
mod descriptor;
mod error;
mod multimap;
mod schema;
mod timestamp;

pub use binder::{bind, bind_with, convert};
pub use descriptor::{
    BoundValue, FieldDescriptor, FieldShape, FromBoundValue, QueryParams, TypeDescriptor,
};
pub use error::{BindError, LayoutError, TimestampError};
pub use multimap::{flatten_values, QueryMultimap};
pub use schema::QuerySchema;
pub use timestamp::{parse_timestamp, TimestampFormat};
