//! Query string extractor.
//!
//! The [`Query`] extractor binds URL query parameters onto a
//! [`QueryParams`] type. Unlike a plain deserializer it is closed: a key the
//! target does not declare fails the request.

use crate::bind::{bind, QueryMultimap, QueryParams};
use crate::{ExtractionContext, ExtractionError, FromRequest};
use std::ops::Deref;

/// Extractor for URL query string parameters.
///
/// Fields the query does not mention keep their [`Default`] value.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{ExtractionContext, FromRequest, Query};
/// use hermes_macros::QueryParams;
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// #[derive(Debug, Default, QueryParams)]
/// struct ListParams {
///     #[query("limit")]
///     limit: i64,
///     #[query("tags")]
///     tags: Vec<String>,
///     #[query("active")]
///     active: bool,
/// }
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/users?limit=10&tags=a,b&tags=c"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// let Query(params) = Query::<ListParams>::from_request(&ctx).unwrap();
/// assert_eq!(params.limit, 10);
/// assert_eq!(params.tags, vec!["a", "b", "c"]);
/// assert!(!params.active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Consumes the Query and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Query<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: QueryParams> FromRequest for Query<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let query = QueryMultimap::parse(ctx.query_string().unwrap_or(""));
        let value = bind::<T>(&query).map_err(ExtractionError::binding)?;
        Ok(Query(value))
    }
}

/// Raw query string access.
///
/// Use this when you need access to the raw query string without binding.
///
/// # Example
///
/// ```rust
/// use hermes_extract::{RawQuery, FromRequest, ExtractionContext};
/// use http::{Method, Uri, HeaderMap};
/// use bytes::Bytes;
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/search?q=rust+lang&limit=10"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// let RawQuery(query) = RawQuery::from_request(&ctx).unwrap();
/// assert_eq!(query, Some("q=rust+lang&limit=10".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuery(pub Option<String>);

impl FromRequest for RawQuery {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(RawQuery(ctx.query_string().map(String::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ExtractionContextBuilder;
    use crate::ExtractionSource;
    use chrono::{DateTime, TimeZone, Utc};
    use hermes_macros::QueryParams;
    use http::Uri;

    #[derive(Debug, Default, PartialEq, QueryParams)]
    struct Search {
        #[query("name")]
        name: String,
        #[query("age")]
        age: i64,
        #[query("active")]
        active: bool,
        #[query("since")]
        since: DateTime<Utc>,
        #[query("ids")]
        ids: Vec<i64>,
        internal: String,
    }

    fn make_ctx(uri: &'static str) -> ExtractionContext {
        ExtractionContextBuilder::new()
            .uri(Uri::from_static(uri))
            .build()
    }

    #[test]
    fn test_full_bind() {
        let ctx = make_ctx("/users?name=Alice&age=30&active=true&ids=1,2&ids=3");
        let Query(search) = Query::<Search>::from_request(&ctx).unwrap();

        assert_eq!(search.name, "Alice");
        assert_eq!(search.age, 30);
        assert!(search.active);
        assert_eq!(search.ids, vec![1, 2, 3]);
        assert_eq!(search.since, DateTime::<Utc>::default());
    }

    #[test]
    fn test_no_params() {
        let ctx = make_ctx("/users");
        let Query(search) = Query::<Search>::from_request(&ctx).unwrap();
        assert_eq!(search, Search::default());
    }

    #[test]
    fn test_timestamp_param() {
        let ctx = make_ctx("/users?since=2025-08-17");
        let search = Query::<Search>::from_request(&ctx).unwrap().into_inner();
        assert_eq!(
            search.since,
            Utc.with_ymd_and_hms(2025, 8, 17, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_param_rejected() {
        let ctx = make_ctx("/users?name=Alice&unknown=1");
        let err = Query::<Search>::from_request(&ctx).unwrap_err();

        assert_eq!(err.extraction_source(), ExtractionSource::Query);
        assert_eq!(err.error_code(), "UNKNOWN_PARAMETER");
        assert_eq!(err.to_string(), "query parameter 'unknown' not allowed");
    }

    #[test]
    fn test_untagged_field_not_bindable() {
        let ctx = make_ctx("/users?internal=x");
        let err = Query::<Search>::from_request(&ctx).unwrap_err();
        assert_eq!(err.field(), Some("internal"));
    }

    #[test]
    fn test_invalid_integer() {
        let ctx = make_ctx("/users?age=abc");
        let err = Query::<Search>::from_request(&ctx).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INTEGER");
        assert!(err.to_string().starts_with("invalid int for age"));
    }

    #[test]
    fn test_url_encoded_values() {
        let ctx = make_ctx("/users?name=Alice%20Smith");
        let search = Query::<Search>::from_request(&ctx).unwrap();
        assert_eq!(search.name, "Alice Smith");
    }

    #[test]
    fn test_deref() {
        let ctx = make_ctx("/users?age=5");
        let query = Query::<Search>::from_request(&ctx).unwrap();
        assert_eq!(query.age, 5);
    }

    #[test]
    fn test_raw_query_with_params() {
        let ctx = make_ctx("/search?q=test&page=1");
        let RawQuery(query) = RawQuery::from_request(&ctx).unwrap();
        assert_eq!(query, Some("q=test&page=1".to_string()));
    }

    #[test]
    fn test_raw_query_without_params() {
        let ctx = make_ctx("/search");
        let RawQuery(query) = RawQuery::from_request(&ctx).unwrap();
        assert_eq!(query, None);
    }
}
