//! Insertion-ordered query strings
//!
//! Serialization follows insertion order so a displayed path is stable.
//! Equality ignores the order of distinct keys but keeps the order of values
//! inside a repeated key.

use std::borrow::Cow;
use std::fmt;

use memory_router_routes::ParamValue;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Query parameters, keyed by name
///
/// # Examples
///
/// ```
/// use memory_router::{ParamValue, Query};
///
/// let query = Query::parse("?foo=FOO&foo=BAR&five=");
/// assert_eq!(query.get("foo"), Some(&ParamValue::from(["FOO", "BAR"])));
/// assert_eq!(query.get("five"), Some(&ParamValue::from("")));
/// assert_eq!(query.to_query_string(), "foo=FOO&foo=BAR&five=");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    entries: Vec<(String, ParamValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `key=value&key=value`, with or without a leading `?`
    ///
    /// Repeated keys collect into [`ParamValue::Multi`]. Empty pairs are
    /// skipped, a pair without `=` has an empty value, `+` decodes to a space.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);

        input
            .split('&')
            .filter(|pair| !pair.is_empty())
            .fold(Self::new(), |mut query, pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                query.append(decode(key), decode(value));
                query
            })
    }

    /// Serializes to `key=value&key=value` in insertion order, without `?`
    pub fn to_query_string(&self) -> String {
        encode_entries(self.entries.iter())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets a value, keeping the key's original position when it exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Adds a value, promoting an existing key to multiple values
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => existing.push(value),
            None => self.entries.push((key, ParamValue::Single(value))),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Overlays `other` on top of `self`; values from `other` win
    pub fn merge(&mut self, other: &Query) {
        for (key, value) in &other.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> + '_ {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key-sorted serialization used for comparisons
    fn canonical(&self) -> String {
        let mut sorted: Vec<&(String, ParamValue)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        encode_entries(sorted.into_iter())
    }
}

fn encode_entries<'a>(entries: impl Iterator<Item = &'a (String, ParamValue)>) -> String {
    entries
        .flat_map(|(key, value)| value.values().map(move |v| (key, v)))
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| spaced.clone())
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Query {}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        query.extend(iter);
        query
    }
}

impl<K, V> Extend<(K, V)> for Query
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

impl<K, V, const N: usize> From<[(K, V); N]> for Query
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct QueryVisitor;

        impl<'de> Visitor<'de> for QueryVisitor {
            type Value = Query;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of query parameters")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Query, A::Error> {
                let mut query = Query::new();
                while let Some((key, value)) = access.next_entry::<String, ParamValue>()? {
                    query.insert(key, value);
                }
                Ok(query)
            }
        }

        deserializer.deserialize_map(QueryVisitor)
    }
}
