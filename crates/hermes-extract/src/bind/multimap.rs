//! Query string multimap.

use indexmap::IndexMap;
use url::form_urlencoded;

/// Percent-encoded form of U+FFFD.
const ENCODED_REPLACEMENT: &str = "%EF%BF%BD";

/// Parsed query string: key → ordered raw values.
///
/// Keys keep the order of their first appearance. A key may repeat
/// (`?a=1&a=2`) and a single raw value may hold a comma-separated list
/// (`?a=1,2`); [`QueryMultimap::flattened`] folds both forms into one
/// sequence of scalars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMultimap {
    entries: IndexMap<String, Vec<String>>,
}

impl QueryMultimap {
    /// Creates an empty multimap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Parsing never fails. Segments with malformed percent-escapes or a
    /// `;` separator are dropped; the rest of the query is kept.
    ///
    /// # Example
    ///
    /// ```rust
    /// use hermes_extract::bind::QueryMultimap;
    ///
    /// let query = QueryMultimap::parse("a=1&b=%zz&a=2,3&name=Hello+World");
    /// assert_eq!(query.get("a"), Some(&["1".to_string(), "2,3".to_string()][..]));
    /// assert_eq!(query.get("b"), None);
    /// assert_eq!(query.flattened("a"), vec!["1", "2", "3"]);
    /// assert_eq!(query.get("name").unwrap()[0], "Hello World");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut map = Self::new();

        for segment in raw.split('&') {
            if segment.is_empty() {
                continue;
            }
            if segment.contains(';') {
                tracing::debug!(segment, "dropping query segment with ';' separator");
                continue;
            }
            if !has_valid_escapes(segment) {
                tracing::debug!(segment, "dropping query segment with invalid escape");
                continue;
            }

            if let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() {
                if replaced_invalid_utf8(segment, &key, &value) {
                    tracing::debug!(
                        segment,
                        "query segment escapes invalid UTF-8; replaced with U+FFFD"
                    );
                }
                map.append(key.into_owned(), value.into_owned());
            }
        }

        map
    }

    /// Appends a raw value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the raw values recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the comma-flattened scalars recorded for `key`.
    #[must_use]
    pub fn flattened(&self, key: &str) -> Vec<String> {
        self.get(key).map(flatten_values).unwrap_or_default()
    }

    /// Iterates over keys and their raw values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMultimap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.append(key, value);
        }
        map
    }
}

/// Splits every raw value on commas, concatenating the pieces in order.
#[must_use]
pub fn flatten_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(String::from)
        .collect()
}

/// Reports whether decoding introduced U+FFFD that the client did not send.
fn replaced_invalid_utf8(segment: &str, key: &str, value: &str) -> bool {
    let decoded_has_replacement =
        key.contains(char::REPLACEMENT_CHARACTER) || value.contains(char::REPLACEMENT_CHARACTER);
    let sent_replacement = segment.contains(char::REPLACEMENT_CHARACTER)
        || segment
            .to_ascii_uppercase()
            .contains(ENCODED_REPLACEMENT);
    decoded_has_replacement && !sent_replacement
}

fn has_valid_escapes(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
