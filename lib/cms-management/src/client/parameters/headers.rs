use std::fmt;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use indexmap::IndexMap;

use crate::client::ManagementError;
use crate::client::auth::{AUTHORIZATION_HEADER, AUTHTOKEN_HEADER};

/// Insertion-ordered request headers.
///
/// Each resource handle owns its own `HeaderStore`, seeded with a copy of its
/// parent stack's headers, so adding or removing a header on one handle is never
/// observed by another.
///
/// ```rust
/// use cms_management::HeaderStore;
///
/// let mut headers = HeaderStore::new();
/// headers.insert("api_key", "blt123");
/// headers.insert("branch", "development");
///
/// let copy = headers.clone();
/// headers.remove("branch");
///
/// assert_eq!(headers.len(), 1);
/// assert_eq!(copy.len(), 2);
/// ```
///
/// Header names are case-insensitive: they are stored in lowercase, as they are sent.
///
/// Credential headers are redacted in the `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderStore {
    headers: IndexMap<String, String>,
}

impl HeaderStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.headers.insert(name, value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Removes a header, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.shift_remove(&name.to_ascii_lowercase())
    }

    /// Removes every header.
    pub fn clear(&mut self) {
        self.headers.clear();
    }

    /// Returns the value of a header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Checks whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_ascii_lowercase())
    }

    /// Checks if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Iterates over headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Merges another store into this one.
    ///
    /// Headers from `other` override headers with the same name.
    pub fn merge(&mut self, other: &Self) {
        for (name, value) in &other.headers {
            self.headers.insert(name.clone(), value.clone());
        }
    }

    /// Converts the headers into an HTTP header map.
    ///
    /// # Errors
    ///
    /// Fails if a name or value is not a valid HTTP header.
    pub fn to_header_map(&self) -> Result<HeaderMap, ManagementError> {
        let mut result = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            result.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }
        Ok(result)
    }
}

impl fmt::Debug for HeaderStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.headers.iter().map(|(name, value)| {
            let sensitive = name.eq_ignore_ascii_case(AUTHTOKEN_HEADER)
                || name.eq_ignore_ascii_case(AUTHORIZATION_HEADER);
            (name, if sensitive { "[REDACTED]" } else { value.as_str() })
        });
        f.debug_map().entries(entries).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for HeaderStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (name, value) in iter {
            result.insert(name, value);
        }
        result
    }
}
