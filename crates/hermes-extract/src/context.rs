//! Extraction context providing access to request data.
//!
//! The [`ExtractionContext`] is the primary interface for extractors to access
//! different parts of an HTTP request.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use std::time::{Duration, Instant};

use crate::validation::MessageTemplates;

/// Default maximum body size for JSON extraction (1 MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Per-request extraction settings.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Whether success envelopes report `processTime`.
    pub report_process_time: bool,
    /// Messages used to render body validation failures.
    pub templates: MessageTemplates,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            report_process_time: false,
            templates: MessageTemplates::default(),
        }
    }
}

/// Context providing access to all parts of an HTTP request.
///
/// Extractors use this context to access the query string, headers, and
/// the request body. A context lives for exactly one request.
///
/// # Example
///
/// ```rust
/// use hermes_extract::ExtractionContext;
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/users?name=Alice"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.query_string(), Some("name=Alice"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    options: ExtractOptions,
    received_at: Instant,
}

impl ExtractionContext {
    /// Creates a new extraction context with default options.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            options: ExtractOptions::default(),
            received_at: Instant::now(),
        }
    }

    /// Replaces the extraction options.
    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the extraction options.
    #[must_use]
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Returns the time elapsed since the context was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Builder for constructing an `ExtractionContext`.
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    method: Option<Method>,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
    options: ExtractOptions,
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = Some(uri);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the extraction options.
    #[must_use]
    pub fn options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the extraction context.
    ///
    /// A missing method defaults to `GET` and a missing URI to `/`.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext::new(
            self.method.unwrap_or(Method::GET),
            self.uri.unwrap_or_else(|| Uri::from_static("/")),
            self.headers,
            self.body,
        )
        .with_options(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_context_creation() {
        let ctx = ExtractionContext::new(
            Method::GET,
            Uri::from_static("/users?active=true"),
            HeaderMap::new(),
            Bytes::from_static(b""),
        );

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/users");
        assert_eq!(ctx.query_string(), Some("active=true"));
        assert!(ctx.body().is_empty());
    }

    #[test]
    fn test_extraction_context_builder() {
        let ctx = ExtractionContextBuilder::new()
            .method(Method::POST)
            .uri(Uri::from_static("/api/users"))
            .header("content-type", "application/json")
            .body(r#"{"name": "Alice"}"#)
            .build();

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.path(), "/api/users");
        assert_eq!(ctx.header("content-type"), Some("application/json"));
        assert_eq!(ctx.body().len(), 17);
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ExtractionContextBuilder::new().build();
        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/");
        assert_eq!(ctx.query_string(), None);
        assert_eq!(ctx.options().max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_custom_options() {
        let options = ExtractOptions {
            max_body_bytes: 16,
            report_process_time: true,
            ..ExtractOptions::default()
        };
        let ctx = ExtractionContextBuilder::new().options(options).build();

        assert_eq!(ctx.options().max_body_bytes, 16);
        assert!(ctx.options().report_process_time);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let ctx = ExtractionContextBuilder::new().build();
        let first = ctx.elapsed();
        assert!(ctx.elapsed() >= first);
    }
}
