//! Target type descriptors.
//!
//! A [`TypeDescriptor`] is the static table the binder works from: one
//! [`FieldDescriptor`] per struct field, in declaration order, recording the
//! external query name (if any) and the [`FieldShape`] the raw strings are
//! coerced into.
//!
//! Descriptors are normally generated by `#[derive(QueryParams)]`, but a
//! manual implementation is just as valid:
//!
//! ```rust
//! use hermes_extract::bind::{BindError, BoundValue, FieldDescriptor, FieldShape, QueryParams, TypeDescriptor};
//!
//! #[derive(Debug, Default)]
//! struct Paging {
//!     page: i64,
//!     tags: Vec<String>,
//! }
//!
//! impl QueryParams for Paging {
//!     fn descriptor() -> TypeDescriptor {
//!         const FIELDS: &[FieldDescriptor] = &[
//!             FieldDescriptor::new("page", Some("page"), FieldShape::Integer),
//!             FieldDescriptor::new("tags", Some("tag"), FieldShape::StringList),
//!         ];
//!         TypeDescriptor::new("Paging", FIELDS)
//!     }
//!
//!     fn assign(&mut self, index: usize, value: BoundValue) -> Result<(), BindError> {
//!         match index {
//!             0 => self.page = value.into_field("page")?,
//!             1 => self.tags = value.into_field("tag")?,
//!             _ => return Err(BindError::unknown_field(index)),
//!         }
//!         Ok(())
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use std::fmt;

use super::BindError;

/// The semantic kind a query-bound field is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// A single string (`String`).
    String,
    /// A single base-10 integer (`i64`).
    Integer,
    /// A single boolean literal (`bool`).
    Boolean,
    /// A single timestamp (`DateTime<Utc>`).
    Timestamp,
    /// A list of strings (`Vec<String>`).
    StringList,
    /// A list of integers (`Vec<i64>`).
    IntegerList,
    /// Any other field type. Binding a key routed to such a field fails.
    Unsupported(&'static str),
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::StringList => write!(f, "list of string"),
            Self::IntegerList => write!(f, "list of integer"),
            Self::Unsupported(name) => write!(f, "{name}"),
        }
    }
}

/// One field of a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name.
    pub name: &'static str,
    /// External query key. `None` (or empty) means the field is not bindable.
    pub query: Option<&'static str>,
    /// Shape the raw values are coerced into.
    pub shape: FieldShape,
}

impl FieldDescriptor {
    /// Creates a field descriptor.
    #[must_use]
    pub const fn new(name: &'static str, query: Option<&'static str>, shape: FieldShape) -> Self {
        Self { name, query, shape }
    }

    /// Returns the external query key if the field participates in binding.
    #[must_use]
    pub fn query_name(&self) -> Option<&'static str> {
        self.query.filter(|q| !q.is_empty())
    }
}

/// Ordered field table for a target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    type_name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    /// Creates a descriptor over a static field table.
    #[must_use]
    pub const fn new(type_name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { type_name, fields }
    }

    /// Returns the target type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Returns the field at `index`.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&'static FieldDescriptor> {
        self.fields.get(index)
    }
}

/// A value converted from the raw query strings of one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Converted string.
    String(String),
    /// Converted integer.
    Integer(i64),
    /// Converted boolean.
    Boolean(bool),
    /// Converted timestamp.
    Timestamp(DateTime<Utc>),
    /// Converted list of strings.
    StringList(Vec<String>),
    /// Converted list of integers.
    IntegerList(Vec<i64>),
}

impl BoundValue {
    /// Returns the shape this value was converted into.
    #[must_use]
    pub fn shape(&self) -> FieldShape {
        match self {
            Self::String(_) => FieldShape::String,
            Self::Integer(_) => FieldShape::Integer,
            Self::Boolean(_) => FieldShape::Boolean,
            Self::Timestamp(_) => FieldShape::Timestamp,
            Self::StringList(_) => FieldShape::StringList,
            Self::IntegerList(_) => FieldShape::IntegerList,
        }
    }

    /// Converts into a concrete field type, failing when the shapes disagree.
    pub fn into_field<T: FromBoundValue>(self, key: &str) -> Result<T, BindError> {
        let shape = self.shape();
        T::from_bound(self).ok_or_else(|| BindError::UnsupportedFieldType {
            key: key.to_string(),
            shape: shape.to_string(),
        })
    }
}

/// Field types that can receive a [`BoundValue`].
///
/// Implemented for exactly the supported shapes.
pub trait FromBoundValue: Sized {
    /// Shape this type binds from.
    const SHAPE: FieldShape;

    /// Extracts `Self` from a matching bound value.
    fn from_bound(value: BoundValue) -> Option<Self>;
}

macro_rules! impl_from_bound_value {
    ($ty:ty, $variant:ident) => {
        impl FromBoundValue for $ty {
            const SHAPE: FieldShape = FieldShape::$variant;

            fn from_bound(value: BoundValue) -> Option<Self> {
                match value {
                    BoundValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_from_bound_value!(String, String);
impl_from_bound_value!(i64, Integer);
impl_from_bound_value!(bool, Boolean);
impl_from_bound_value!(DateTime<Utc>, Timestamp);
impl_from_bound_value!(Vec<String>, StringList);
impl_from_bound_value!(Vec<i64>, IntegerList);

/// A type that can be populated from URL query parameters.
///
/// Implementations are usually generated with `#[derive(QueryParams)]`.
/// Fields with no matching key keep their [`Default`] value.
pub trait QueryParams: Default {
    /// Returns the field table for this type.
    fn descriptor() -> TypeDescriptor;

    /// Stores a converted value into the field at `index`.
    fn assign(&mut self, index: usize, value: BoundValue) -> Result<(), BindError>;
}
