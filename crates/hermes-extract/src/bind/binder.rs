//! The query binder.
//!
//! Walks the query multimap, routes every key through the schema and
//! converts its flattened scalars according to the target field's shape.

use super::{
    flatten_values, parse_timestamp, BindError, BoundValue, FieldShape, QueryMultimap,
    QueryParams, QuerySchema, TypeDescriptor,
};

/// Binds a parsed query onto a fresh `T`.
///
/// Every query key must be declared by `T`; the first failing key aborts
/// the bind and the partially populated value is dropped.
///
/// # Example
///
/// ```rust
/// use hermes_extract::bind::{bind, QueryMultimap};
/// use hermes_macros::QueryParams;
///
/// #[derive(Debug, Default, QueryParams)]
/// struct Search {
///     #[query("name")]
///     name: String,
///     #[query("age")]
///     age: i64,
/// }
///
/// let query = QueryMultimap::parse("name=Alice&age=30");
/// let search: Search = bind(&query).unwrap();
/// assert_eq!(search.name, "Alice");
/// assert_eq!(search.age, 30);
///
/// let query = QueryMultimap::parse("name=Alice&unknown=1");
/// let err = bind::<Search>(&query).unwrap_err();
/// assert_eq!(err.to_string(), "query parameter 'unknown' not allowed");
/// ```
pub fn bind<T: QueryParams>(query: &QueryMultimap) -> Result<T, BindError> {
    let descriptor = T::descriptor();
    let schema = QuerySchema::for_type(&descriptor);
    bind_with(query, &schema, &descriptor)
}

/// Binds a parsed query using an already extracted schema.
pub fn bind_with<T: QueryParams>(
    query: &QueryMultimap,
    schema: &QuerySchema,
    descriptor: &TypeDescriptor,
) -> Result<T, BindError> {
    let mut target = T::default();

    for (key, values) in query.iter() {
        let result = schema
            .position(key)
            .ok_or_else(|| BindError::UnknownParameter {
                key: key.to_string(),
            })
            .and_then(|index| {
                let field = descriptor
                    .field(index)
                    .ok_or_else(|| BindError::unknown_field(index))?;
                let value = convert(key, field.shape, values)?;
                target.assign(index, value)
            });

        if let Err(err) = result {
            tracing::debug!(
                target_type = descriptor.type_name(),
                key,
                error_code = err.code(),
                error = %err,
                "query binding rejected"
            );
            return Err(err);
        }
    }

    Ok(target)
}

/// Converts the raw values of one key into a value of the given shape.
///
/// Raw values are comma-flattened first. Scalar shapes use the first
/// scalar; list shapes use all of them, in order.
pub fn convert(key: &str, shape: FieldShape, raw: &[String]) -> Result<BoundValue, BindError> {
    let scalars = flatten_values(raw);
    let first = scalars.first().map(String::as_str).unwrap_or_default();

    match shape {
        FieldShape::String => Ok(BoundValue::String(first.to_string())),
        FieldShape::Integer => parse_integer(key, first).map(BoundValue::Integer),
        FieldShape::Boolean => parse_bool(first)
            .map(BoundValue::Boolean)
            .ok_or_else(|| BindError::InvalidBoolean {
                key: key.to_string(),
                value: first.to_string(),
            }),
        FieldShape::Timestamp => parse_timestamp(first)
            .map(BoundValue::Timestamp)
            .map_err(|source| BindError::InvalidTimestamp {
                key: key.to_string(),
                source,
            }),
        FieldShape::StringList => Ok(BoundValue::StringList(scalars)),
        FieldShape::IntegerList => scalars
            .iter()
            .map(|s| parse_integer(key, s))
            .collect::<Result<Vec<_>, _>>()
            .map(BoundValue::IntegerList),
        FieldShape::Unsupported(name) => Err(BindError::UnsupportedFieldType {
            key: key.to_string(),
            shape: name.to_string(),
        }),
    }
}

fn parse_integer(key: &str, raw: &str) -> Result<i64, BindError> {
    raw.parse::<i64>().map_err(|e| BindError::InvalidInteger {
        key: key.to_string(),
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Parses the conventional boolean literals.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
