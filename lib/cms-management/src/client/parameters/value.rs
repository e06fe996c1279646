use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::client::ManagementError;

/// A query parameter value.
///
/// Values are kept as JSON so a single store can hold strings, numbers and booleans
/// side by side. Rendering into the query string follows these rules:
///
/// - strings are used as is
/// - numbers and booleans use their textual form
/// - `null` renders as an empty value
/// - arrays repeat the key once per element (`include[]=a&include[]=b`)
/// - objects render as compact JSON text, as expected by the `query` parameter
///
/// ```rust
/// use cms_management::ParamValue;
///
/// let value = ParamValue::from(true);
/// assert_eq!(value.to_string(), "true");
///
/// let value = ParamValue::from(vec!["title", "url"]);
/// assert_eq!(value.to_string(), "title,url");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValue(Value);

impl ParamValue {
    /// Creates a parameter value from any serializable value.
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented as JSON.
    pub fn serialize<T: Serialize>(value: &T) -> Result<Self, ManagementError> {
        let value = serde_json::to_value(value)?;
        Ok(Self(value))
    }

    /// Returns the underlying JSON value.
    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Appends the `(key, value)` pairs for this value, in order.
    pub(in crate::client) fn push_pairs(&self, key: &str, pairs: &mut Vec<(String, String)>) {
        match &self.0 {
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.to_string(), scalar_text(item)));
                }
            }
            other => pairs.push((key.to_string(), scalar_text(other))),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Array(items) => {
                let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(",");
                f.write_str(&joined)
            }
            other => f.write_str(&scalar_text(other)),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self(Value::String(value.clone()))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

macro_rules! param_value_from_number {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self(Value::from(value))
                }
            }
        )+
    };
}

param_value_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl<T> From<Vec<T>> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(values: Vec<T>) -> Self {
        let items = values.into_iter().map(|value| value.into().0).collect();
        Self(Value::Array(items))
    }
}

impl<T, const N: usize> From<[T; N]> for ParamValue
where
    T: Into<ParamValue>,
{
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}
