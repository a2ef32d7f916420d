//! Navigation target parsing
//!
//! Converts a string href or a structured [`UrlObject`] into a [`DraftRoute`].
//! Parsing never fails: anything unrecognizable degrades to `/` with an
//! empty query and hash.

use memory_router_routes::remove_trailing_slash;

use crate::{DraftRoute, Query};

/// Structured navigation target, the `{ pathname, query, hash }` form
///
/// A missing `pathname` keeps the current pathname.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlObject {
    pub pathname: Option<String>,
    pub query: Option<Query>,
    pub hash: Option<String>,
}

impl UrlObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pathname(mut self, pathname: impl Into<String>) -> Self {
        self.pathname = Some(pathname.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }
}

/// A navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Url {
    /// `"/path?query#hash"`, optionally with scheme and host
    Href(String),
    Object(UrlObject),
}

impl From<&str> for Url {
    fn from(href: &str) -> Self {
        Url::Href(href.to_string())
    }
}

impl From<String> for Url {
    fn from(href: String) -> Self {
        Url::Href(href)
    }
}

impl From<&String> for Url {
    fn from(href: &String) -> Self {
        Url::Href(href.clone())
    }
}

impl From<UrlObject> for Url {
    fn from(object: UrlObject) -> Self {
        Url::Object(object)
    }
}

/// Parses a navigation target into a draft route
///
/// # Examples
///
/// ```
/// use memory_router::{parse_url, Url};
///
/// let draft = parse_url(&Url::from("https://example.com/one/two/?a=1#top"), "/");
/// assert_eq!(draft.pathname, "/one/two");
/// assert_eq!(draft.query.to_query_string(), "a=1");
/// assert_eq!(draft.hash, "#top");
/// ```
pub fn parse_url(url: &Url, current_pathname: &str) -> DraftRoute {
    match url {
        Url::Href(href) => parse_href(href),
        Url::Object(object) => DraftRoute {
            pathname: normalize_url_path(object.pathname.as_deref().unwrap_or(current_pathname)),
            query: object.query.clone().unwrap_or_default(),
            hash: normalize_hash(object.hash.as_deref().unwrap_or("")),
            route_params: Query::new(),
        },
    }
}

fn parse_href(href: &str) -> DraftRoute {
    let rest = strip_origin(href);

    let (before_hash, hash) = match rest.find('#') {
        Some(index) => (&rest[..index], &rest[index..]),
        None => (rest, ""),
    };
    let (path, query) = match before_hash.find('?') {
        Some(index) => (&before_hash[..index], &before_hash[index + 1..]),
        None => (before_hash, ""),
    };

    DraftRoute {
        pathname: normalize_url_path(path),
        query: Query::parse(query),
        hash: normalize_hash(hash),
        route_params: Query::new(),
    }
}

/// Drops `scheme://host` or `//host`, keeping path, query and fragment
fn strip_origin(href: &str) -> &str {
    let authority = match href.find("://") {
        Some(index) if index > 0 && is_scheme(&href[..index]) => Some(&href[index + 3..]),
        _ => href.strip_prefix("//"),
    };

    match authority {
        Some(rest) => rest.find(['/', '?', '#']).map_or("", |index| &rest[index..]),
        None => href,
    }
}

fn is_scheme(candidate: &str) -> bool {
    candidate.starts_with(|c: char| c.is_ascii_alphabetic())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Browser-style path normalization
///
/// Empty becomes `/`, a leading `/` is added, `.` and `..` segments are
/// resolved and a single trailing `/` is removed.
pub(crate) fn normalize_url_path(path: &str) -> String {
    let rooted = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };

    let segments: Vec<&str> = rooted.split('/').skip(1).collect();
    let last = segments.len().saturating_sub(1);
    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        // A trailing dot segment leaves the path pointing at a directory
        match *segment {
            "." => {}
            ".." => {
                resolved.pop();
            }
            other => {
                resolved.push(other);
                continue;
            }
        }
        if index == last {
            resolved.push("");
        }
    }

    let joined = format!("/{}", resolved.join("/"));
    remove_trailing_slash(&joined).to_string()
}

fn normalize_hash(hash: &str) -> String {
    match hash {
        "" | "#" => String::new(),
        _ if hash.starts_with('#') => hash.to_string(),
        _ => format!("#{}", hash),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_router_routes::ParamValue;

    fn href(input: &str) -> DraftRoute {
        parse_url(&Url::from(input), "/current")
    }

    #[test]
    fn test_href_parts() {
        let draft = href("/path?key=value#hash");
        assert_eq!(draft.pathname, "/path");
        assert_eq!(draft.query.get("key"), Some(&ParamValue::from("value")));
        assert_eq!(draft.hash, "#hash");
    }

    #[test]
    fn test_question_mark_after_hash_is_fragment() {
        let draft = href("/path#frag?not=query");
        assert!(draft.query.is_empty());
        assert_eq!(draft.hash, "#frag?not=query");
    }

    #[test]
    fn test_origin_is_ignored() {
        assert_eq!(href("https://example.com/a/b").pathname, "/a/b");
        assert_eq!(href("//cdn.example.com/a?x=1").pathname, "/a");
        assert_eq!(href("http://example.com").pathname, "/");
        assert_eq!(href("http://example.com?x=1").query.len(), 1);
    }

    #[test]
    fn test_empty_and_root() {
        assert_eq!(href("").pathname, "/");
        assert_eq!(href("/").pathname, "/");
        assert_eq!(href("#").hash, "");
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(normalize_url_path("/path/"), "/path");
        assert_eq!(normalize_url_path("relative"), "/relative");
        assert_eq!(normalize_url_path("/a/./b/../c"), "/a/c");
        assert_eq!(normalize_url_path("/a/b/.."), "/a");
        assert_eq!(normalize_url_path("/.."), "/");
    }

    #[test]
    fn test_relative_href_is_rooted_not_resolved() {
        let draft = parse_url(&Url::from("child?x=1"), "/parent/page");
        assert_eq!(draft.pathname, "/child");
        assert_eq!(draft.query.to_query_string(), "x=1");
    }

    #[test]
    fn test_object_defaults_to_current_pathname() {
        let object = UrlObject::new().with_query(Query::from([("id", "42")]));
        let draft = parse_url(&Url::from(object), "/path");
        assert_eq!(draft.pathname, "/path");
        assert_eq!(draft.query.to_query_string(), "id=42");
    }

    #[test]
    fn test_object_empty_pathname_is_root() {
        let draft = parse_url(&Url::from(UrlObject::new().with_pathname("")), "/path");
        assert_eq!(draft.pathname, "/");
    }

    #[test]
    fn test_object_hash_gets_prefix() {
        let object = UrlObject::new().with_pathname("/p").with_hash("top");
        assert_eq!(parse_url(&Url::from(object), "/").hash, "#top");
    }
}
