//! Display path construction
//!
//! Fills slug markers in a pathname from route params and query values, then
//! appends whatever query is left over and the hash.

use memory_router_routes::{classify_segment, ParamValue};

use crate::Query;

/// Builds the address-bar form of a route
///
/// Each `[name]`, `[...name]` or `[[...name]]` segment takes its value from
/// `route_params` first, then `query`. A consumed key is removed from the
/// query that gets appended. Missing values become empty segments and the
/// resulting trailing slashes are collapsed.
///
/// # Examples
///
/// ```
/// use memory_router::{interpolate_as_path, Query};
///
/// let query = Query::from([("id", "two"), ("four", "4")]);
/// let as_path = interpolate_as_path("/one/[id]/three", &query, &Query::new(), "#top");
/// assert_eq!(as_path, "/one/two/three?four=4#top");
/// ```
pub fn interpolate_as_path(
    pathname: &str,
    query: &Query,
    route_params: &Query,
    hash: &str,
) -> String {
    let mut remaining = query.clone();

    let interpolated = pathname
        .split('/')
        .map(|segment| match classify_segment(segment).param_name() {
            Some(name) => {
                let value = route_params
                    .get(name)
                    .or_else(|| query.get(name))
                    .map(encode_value)
                    .unwrap_or_default();
                remaining.remove(name);
                value
            }
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/");

    let trimmed = interpolated.trim_end_matches('/');
    let mut as_path = if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    };

    if !remaining.is_empty() {
        let query_string = remaining.to_query_string();
        if !query_string.is_empty() {
            as_path.push('?');
            as_path.push_str(&query_string);
        }
    }
    as_path.push_str(hash);

    as_path
}

fn encode_value(value: &ParamValue) -> String {
    value
        .values()
        .map(|v| urlencoding::encode(v).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_path_keeps_query() {
        let query = Query::parse("id=500");
        assert_eq!(
            interpolate_as_path("/entity/100", &query, &Query::new(), ""),
            "/entity/100?id=500"
        );
    }

    #[test]
    fn test_route_params_fill_before_query() {
        let params = Query::from([("id", "100")]);
        let query = Query::from([("id", "500"), ("filter", "abc")]);
        assert_eq!(
            interpolate_as_path("/entity/[id]", &query, &params, ""),
            "/entity/100?filter=abc"
        );
    }

    #[test]
    fn test_catch_all_joins_encoded_values() {
        let query = Query::from([("slug", ParamValue::from(["two", "a b"]))]);
        assert_eq!(
            interpolate_as_path("/one/[...slug]", &query, &Query::new(), ""),
            "/one/two/a%20b"
        );
    }

    #[test]
    fn test_missing_optional_catch_all_collapses() {
        assert_eq!(
            interpolate_as_path("/one/two/[[...slug]]", &Query::new(), &Query::new(), ""),
            "/one/two"
        );
        assert_eq!(
            interpolate_as_path("/[[...route]]", &Query::new(), &Query::new(), "#h"),
            "/#h"
        );
    }

    #[test]
    fn test_root() {
        assert_eq!(interpolate_as_path("/", &Query::new(), &Query::new(), ""), "/");
    }
}
