//! Binding error types.

use thiserror::Error;

/// Why one timestamp layout rejected an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The input does not have the fixed-width shape of the layout.
    #[error("cannot parse {input:?} as {layout:?}")]
    Shape {
        /// Offending input.
        input: String,
        /// Expected layout.
        layout: &'static str,
    },
    /// The shape matched but a component is out of range.
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Failure to parse a timestamp with any supported format.
///
/// Carries the error of the last format attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct TimestampError {
    /// Raw input that failed to parse.
    pub input: String,
    /// Error from the last attempted format.
    #[source]
    pub source: LayoutError,
}

/// Errors produced while binding query parameters onto a target type.
///
/// Binding stops at the first error; the partially populated instance is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The query key is not declared by the target type.
    #[error("query parameter '{key}' not allowed")]
    UnknownParameter {
        /// Offending query key.
        key: String,
    },

    /// A value routed to an integer field (or list element) is not a base-10 integer.
    #[error("invalid int for {key}: {value:?}: {reason}")]
    InvalidInteger {
        /// Query key.
        key: String,
        /// Raw scalar that failed to parse.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A value routed to a boolean field is not a recognised literal.
    #[error("invalid bool for {key}: {value:?}")]
    InvalidBoolean {
        /// Query key.
        key: String,
        /// Raw scalar that failed to parse.
        value: String,
    },

    /// A value routed to a timestamp field matches none of the supported formats.
    #[error("invalid time for {key}: {source}")]
    InvalidTimestamp {
        /// Query key.
        key: String,
        /// Error from the last attempted format.
        #[source]
        source: TimestampError,
    },

    /// The field routed to by this key has a shape the binder cannot fill.
    #[error("unsupported type for {key}: {shape}")]
    UnsupportedFieldType {
        /// Query key.
        key: String,
        /// Shape or type name of the target field.
        shape: String,
    },

    /// A `QueryParams` implementation was asked to assign a field it does not have.
    #[error("no bindable field at position {index}")]
    UnknownField {
        /// Field position in the descriptor.
        index: usize,
    },
}

impl BindError {
    /// Creates an [`BindError::UnknownField`] error.
    #[must_use]
    pub fn unknown_field(index: usize) -> Self {
        Self::UnknownField { index }
    }

    /// Returns the query key this error refers to, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownParameter { key }
            | Self::InvalidInteger { key, .. }
            | Self::InvalidBoolean { key, .. }
            | Self::InvalidTimestamp { key, .. }
            | Self::UnsupportedFieldType { key, .. } => Some(key),
            Self::UnknownField { .. } => None,
        }
    }

    /// Returns a stable error code for envelopes and logs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownParameter { .. } => "UNKNOWN_PARAMETER",
            Self::InvalidInteger { .. } => "INVALID_INTEGER",
            Self::InvalidBoolean { .. } => "INVALID_BOOLEAN",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::UnsupportedFieldType { .. } | Self::UnknownField { .. } => {
                "UNSUPPORTED_FIELD_TYPE"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_message() {
        let err = BindError::UnknownParameter {
            key: "unknown".to_string(),
        };
        assert_eq!(err.to_string(), "query parameter 'unknown' not allowed");
        assert_eq!(err.key(), Some("unknown"));
        assert_eq!(err.code(), "UNKNOWN_PARAMETER");
    }

    #[test]
    fn test_invalid_integer_message() {
        let err = BindError::InvalidInteger {
            key: "age".to_string(),
            value: "12x".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid int for age: \"12x\": invalid digit found in string"
        );
    }

    #[test]
    fn test_unknown_field_has_no_key() {
        let err = BindError::unknown_field(3);
        assert_eq!(err.key(), None);
        assert!(err.to_string().contains('3'));
    }
}
