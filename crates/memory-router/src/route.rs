//! Route state types
//!
//! [`RouteState`] is what observers read from the router. [`DraftRoute`] is
//! the mutable intermediate that parser hooks rewrite before a commit.

use serde::{Deserialize, Serialize};

use crate::Query;

/// Committed, externally observable route state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    /// Canonical path, or the matched template (`/entity/[id]`)
    pub pathname: String,
    /// Query parameters merged with route params
    pub query: Query,
    /// Fragment including the leading `#`, or empty
    pub hash: String,
    /// Address-bar form: interpolated path, remaining query, hash
    pub as_path: String,
    /// Values extracted by template matching only
    pub route_params: Query,
    pub locale: Option<String>,
}

impl RouteState {
    /// Same as `pathname`; kept for `route` readers
    pub fn route(&self) -> &str {
        &self.pathname
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            query: Query::new(),
            hash: String::new(),
            as_path: "/".to_string(),
            route_params: Query::new(),
            locale: None,
        }
    }
}

/// A parsed navigation target, before it is committed
///
/// Parser hooks receive `&mut DraftRoute` and may rewrite `pathname` (to a
/// template) and `route_params`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRoute {
    pub pathname: String,
    pub query: Query,
    pub hash: String,
    pub route_params: Query,
}

/// Options accepted by `push_with` / `replace_with`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionOptions {
    pub shallow: bool,
    pub locale: Option<String>,
}

impl TransitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}
