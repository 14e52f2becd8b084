//! Integration tests for the `QueryParams` derive.
//!
//! These tests verify that the generated code compiles against
//! `hermes-extract` and binds queries correctly.

use chrono::{DateTime, TimeZone, Utc};
use hermes_extract::bind::{bind, BindError, FieldShape, QueryMultimap, QueryParams, QuerySchema};
use hermes_macros::QueryParams;

#[derive(Debug, Default, PartialEq, QueryParams)]
struct UserFilter {
    #[query("name")]
    name: String,
    #[query(name = "age")]
    age: i64,
    #[query("active")]
    active: bool,
    #[query("created_after")]
    created_after: DateTime<Utc>,
    #[query("tag")]
    tags: Vec<String>,
    #[query("id")]
    ids: Vec<i64>,
    #[query("ratio")]
    ratio: f64,
    cursor: String,
}

fn parse(raw: &str) -> QueryMultimap {
    QueryMultimap::parse(raw)
}

#[test]
fn test_descriptor_matches_declaration() {
    let descriptor = UserFilter::descriptor();
    assert_eq!(descriptor.type_name(), "UserFilter");

    let fields = descriptor.fields();
    assert_eq!(fields.len(), 8);
    assert_eq!(fields[0].name, "name");
    assert_eq!(fields[1].query_name(), Some("age"));
    assert_eq!(fields[3].shape, FieldShape::Timestamp);
    assert_eq!(fields[4].shape, FieldShape::StringList);
    assert_eq!(fields[5].shape, FieldShape::IntegerList);
    assert_eq!(fields[6].shape, FieldShape::Unsupported("f64"));
    assert_eq!(fields[7].query_name(), None);
}

#[test]
fn test_schema_excludes_untagged_fields() {
    let schema = QuerySchema::for_type(&UserFilter::descriptor());
    assert_eq!(schema.len(), 7);
    assert!(schema.allows("tag"));
    assert!(!schema.allows("tags"));
    assert!(!schema.allows("cursor"));
}

#[test]
fn test_bind_all_supported_shapes() {
    let filter: UserFilter = bind(&parse(
        "name=Alice&age=30&active=t&created_after=2025-08-17T18:30:00Z&tag=a,b&tag=c&id=1&id=2,3",
    ))
    .unwrap();

    assert_eq!(
        filter,
        UserFilter {
            name: "Alice".to_string(),
            age: 30,
            active: true,
            created_after: Utc.with_ymd_and_hms(2025, 8, 17, 18, 30, 0).unwrap(),
            tags: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ids: vec![1, 2, 3],
            ..UserFilter::default()
        }
    );
}

#[test]
fn test_missing_keys_keep_defaults() {
    let filter: UserFilter = bind(&parse("name=Bob")).unwrap();
    assert_eq!(filter.name, "Bob");
    assert_eq!(filter.age, 0);
    assert!(filter.tags.is_empty());
}

#[test]
fn test_unsupported_field_fails_at_bind() {
    let err = bind::<UserFilter>(&parse("ratio=0.5")).unwrap_err();
    assert!(matches!(err, BindError::UnsupportedFieldType { ref key, .. } if key == "ratio"));
}

#[test]
fn test_untagged_field_is_unknown_key() {
    let err = bind::<UserFilter>(&parse("cursor=abc")).unwrap_err();
    assert_eq!(err.to_string(), "query parameter 'cursor' not allowed");
}

#[test]
fn test_assign_out_of_range_index() {
    let mut filter = UserFilter::default();
    let err = filter
        .assign(99, hermes_extract::bind::BoundValue::Integer(1))
        .unwrap_err();
    assert_eq!(err, BindError::unknown_field(99));
}

mod reexported {
    use hermes_macros::QueryParams;

    mod extract {
        pub use hermes_extract::*;
    }

    #[derive(Debug, Default, QueryParams)]
    #[query(crate = "self::extract")]
    struct Paging {
        #[query("page")]
        page: i64,
    }

    #[test]
    fn test_custom_crate_path() {
        let query = hermes_extract::bind::QueryMultimap::parse("page=3");
        let paging: Paging = hermes_extract::bind::bind(&query).unwrap();
        assert_eq!(paging.page, 3);
    }
}
