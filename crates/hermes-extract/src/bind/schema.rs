//! Query schema extraction.

use std::collections::HashMap;

use super::{FieldDescriptor, TypeDescriptor};

/// Mapping from external query key to field position.
///
/// The schema doubles as the allow-list: any key it does not contain is
/// rejected by the binder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySchema {
    fields: HashMap<&'static str, usize>,
}

impl QuerySchema {
    /// Derives the schema from a field table.
    ///
    /// Fields without a (non-empty) query name are skipped. If two fields
    /// declare the same query name, the later one wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hermes_extract::bind::{FieldDescriptor, FieldShape, QuerySchema};
    ///
    /// let schema = QuerySchema::extract(&[
    ///     FieldDescriptor::new("name", Some("name"), FieldShape::String),
    ///     FieldDescriptor::new("internal", None, FieldShape::String),
    ///     FieldDescriptor::new("age", Some("age"), FieldShape::Integer),
    /// ]);
    ///
    /// assert_eq!(schema.position("name"), Some(0));
    /// assert_eq!(schema.position("age"), Some(2));
    /// assert_eq!(schema.position("internal"), None);
    /// ```
    #[must_use]
    pub fn extract(fields: &[FieldDescriptor]) -> Self {
        let mut map = HashMap::with_capacity(fields.len());
        for (index, field) in fields.iter().enumerate() {
            if let Some(name) = field.query_name() {
                map.insert(name, index);
            }
        }
        Self { fields: map }
    }

    /// Derives the schema of a whole type descriptor.
    #[must_use]
    pub fn for_type(descriptor: &TypeDescriptor) -> Self {
        Self::extract(descriptor.fields())
    }

    /// Returns the field position bound to `key`.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.fields.get(key).copied()
    }

    /// Returns `true` if `key` is an allowed query parameter.
    #[must_use]
    pub fn allows(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Returns the number of bindable keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is bindable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over allowed keys and their field positions.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.fields.iter().map(|(k, v)| (*k, *v))
    }
}
