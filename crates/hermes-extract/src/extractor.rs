//! The [`FromRequest`] trait.

use crate::{ExtractionContext, ExtractionError};

/// A value built from one request.
///
/// [`Query`](crate::Query), [`Json`](crate::Json) and
/// [`ValidatedJson`](crate::ValidatedJson) implement this. Custom extractors
/// usually wrap one of them and add a domain check:
///
/// ```rust
/// use hermes_extract::{ExtractionContext, ExtractionError, FromRequest, Query};
/// use hermes_macros::QueryParams;
///
/// #[derive(Debug, Default, QueryParams)]
/// struct Page {
///     #[query("limit")]
///     limit: i64,
/// }
///
/// /// A page whose limit was clamped to 1..=100.
/// struct BoundedPage(i64);
///
/// impl FromRequest for BoundedPage {
///     fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
///         let Query(page) = Query::<Page>::from_request(ctx)?;
///         Ok(BoundedPage(page.limit.clamp(1, 100)))
///     }
/// }
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request context.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if extraction fails.
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError>;
}

// Hands the extraction error to the caller instead of rejecting.
impl<T: FromRequest> FromRequest for Result<T, ExtractionError> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(T::from_request(ctx))
    }
}
