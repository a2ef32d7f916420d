//! Parser hook backed by a route table
//!
//! Resolves a concrete pathname such as `/entity/42` to its page template
//! (`/entity/[id]`) and records the extracted slug values as route params.

use memory_router_routes::{is_dynamic_route, RouteTable, TemplateError};

use crate::{DraftRoute, Query};

/// Builds a parser hook from page templates
///
/// Pass the result to [`MemoryRouter::use_parser`](crate::MemoryRouter::use_parser).
///
/// # Examples
///
/// ```
/// use memory_router::{create_dynamic_route_parser, MemoryRouter};
///
/// let router = MemoryRouter::new();
/// let _hook = router.use_parser(
///     create_dynamic_route_parser(["/entity/[id]/attribute/[name]", "/[...slug]"]).unwrap(),
/// );
///
/// router.set_current_url("/entity/101/attribute/everything");
/// assert_eq!(router.pathname(), "/entity/[id]/attribute/[name]");
/// assert_eq!(router.as_path(), "/entity/101/attribute/everything");
/// ```
pub fn create_dynamic_route_parser<I, S>(
    templates: I,
) -> Result<impl Fn(&mut DraftRoute) + Send + Sync + 'static, TemplateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = RouteTable::new(templates)?;
    Ok(move |draft: &mut DraftRoute| apply_route_table(&table, draft))
}

/// Rewrites `draft` using the first matching template
///
/// A pathname that already contains slug markers is the caller pushing the
/// template itself; it is left for interpolation from the query.
pub(crate) fn apply_route_table(table: &RouteTable, draft: &mut DraftRoute) {
    if is_dynamic_route(&draft.pathname) {
        tracing::trace!("Skipping route matching for template path {}", draft.pathname);
        return;
    }

    let Some(hit) = table.match_path(&draft.pathname) else {
        return;
    };

    draft.pathname = hit.template.as_str().to_string();
    draft.route_params = hit.params.into_iter().collect::<Query>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_router_routes::ParamValue;

    fn draft(pathname: &str) -> DraftRoute {
        DraftRoute {
            pathname: pathname.to_string(),
            ..DraftRoute::default()
        }
    }

    #[test]
    fn test_match_sets_template_and_params() {
        let parser = create_dynamic_route_parser(["/entity/[id]"]).unwrap();
        let mut route = draft("/entity/42");
        parser(&mut route);

        assert_eq!(route.pathname, "/entity/[id]");
        assert_eq!(route.route_params.get("id"), Some(&ParamValue::from("42")));
    }

    #[test]
    fn test_no_match_leaves_draft() {
        let parser = create_dynamic_route_parser(["/entity/[id]/attribute/[name]"]).unwrap();
        let mut route = draft("/one/two/three");
        parser(&mut route);

        assert_eq!(route, draft("/one/two/three"));
    }

    #[test]
    fn test_template_path_is_skipped() {
        let parser = create_dynamic_route_parser(["/entity/[id]"]).unwrap();
        let mut route = draft("/entity/[id]");
        parser(&mut route);

        assert!(route.route_params.is_empty());
    }

    #[test]
    fn test_invalid_templates_are_reported() {
        assert!(create_dynamic_route_parser(["/[...a]/b"]).is_err());
    }
}
