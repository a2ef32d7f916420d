//! Parameter values shared by route matching and query strings
//!
//! A route param (or query param) is either a single string or an ordered
//! list of strings. Catch-all segments and repeated query keys produce
//! `Multi`; everything else produces `Single`.

use serde::{Deserialize, Serialize};

/// A single-or-multi string value
///
/// # Examples
///
/// ```
/// use memory_router_routes::ParamValue;
///
/// let single = ParamValue::from("42");
/// assert_eq!(single.as_str(), Some("42"));
///
/// let multi = ParamValue::from(vec!["one", "two"]);
/// assert_eq!(multi.values().collect::<Vec<_>>(), vec!["one", "two"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// One value: `?id=42` or `[id]`
    Single(String),
    /// Ordered values: `?tag=a&tag=b` or `[...slug]`
    Multi(Vec<String>),
}

impl ParamValue {
    /// Returns the value when this is `Single`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multi(_) => None,
        }
    }

    /// Returns the values when this is `Multi`
    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Multi(values) => Some(values),
        }
    }

    /// Iterates over every value in order (one item for `Single`)
    pub fn values(&self) -> impl Iterator<Item = &str> + '_ {
        let slice: &[String] = match self {
            ParamValue::Single(value) => std::slice::from_ref(value),
            ParamValue::Multi(values) => values,
        };
        slice.iter().map(String::as_str)
    }

    /// Returns the first value, if any
    pub fn first(&self) -> Option<&str> {
        self.values().next()
    }

    /// Appends a value, promoting `Single` to `Multi`
    pub fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = ParamValue::Multi(vec![first, value]);
            }
            ParamValue::Multi(values) => values.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Multi(values)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(values: Vec<&str>) -> Self {
        ParamValue::Multi(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        ParamValue::Multi(values.iter().map(|v| v.to_string()).collect())
    }
}
