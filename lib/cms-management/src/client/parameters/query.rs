use indexmap::IndexMap;

use super::ParamValue;
use crate::client::ManagementError;

/// Insertion-ordered query parameters of a request.
///
/// Keys are unique: inserting an existing key replaces its value but keeps its
/// original position, so the rendered query string stays stable across chained calls.
///
/// ```rust
/// use cms_management::ParamStore;
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let mut params = ParamStore::new();
/// params.insert("include_count", true);
/// params.insert("include_global_field_schema", true);
///
/// assert_eq!(
///     params.to_query_string()?.as_deref(),
///     Some("include_count=true&include_global_field_schema=true")
/// );
///
/// params.clear();
/// assert_eq!(params.to_query_string()?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamStore {
    params: IndexMap<String, ParamValue>,
}

impl ParamStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a parameter, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.params.shift_remove(key)
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Returns the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Checks whether a parameter is present.
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Checks if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Merges another store into this one.
    ///
    /// Parameters from `other` override parameters with the same key; new keys are
    /// appended after the existing ones.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.params {
            self.params.insert(key.clone(), value.clone());
        }
    }

    /// Renders the store as a URL-encoded query string, without the leading `?`.
    ///
    /// Returns `None` for an empty store so that no query component is emitted.
    ///
    /// # Errors
    ///
    /// Fails if the pairs cannot be URL-encoded.
    pub fn to_query_string(&self) -> Result<Option<String>, ManagementError> {
        if self.params.is_empty() {
            return Ok(None);
        }

        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            value.push_pairs(key, &mut pairs);
        }

        let query = serde_urlencoded::to_string(&pairs)?;
        Ok(Some(query))
    }
}

impl<K, V> FromIterator<(K, V)> for ParamStore
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (key, value) in iter {
            result.insert(key, value);
        }
        result
    }
}

impl<K, V> Extend<(K, V)> for ParamStore
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
