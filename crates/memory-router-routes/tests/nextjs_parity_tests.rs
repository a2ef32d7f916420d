// Integration tests comparing template matching with Next.js pages routing
//
// Each test names the equivalent pages/ file layout for reference.

use memory_router_routes::{ParamValue, RouteTable, TemplateError};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn params(table: &RouteTable, path: &str) -> Option<Vec<(String, ParamValue)>> {
    table.match_path(path).map(|hit| hit.params)
}

fn single(name: &str, value: &str) -> (String, ParamValue) {
    (name.to_string(), ParamValue::from(value))
}

// ============================================================================
// Dynamic Segments
// ============================================================================

#[test]
fn test_nextjs_nested_dynamic_segments() {
    // Next.js: pages/entity/[id]/attribute/[name].tsx
    let table = RouteTable::new(["/entity/[id]/attribute/[name]"]).unwrap();

    assert_eq!(
        params(&table, "/entity/101/attribute/everything"),
        Some(vec![single("id", "101"), single("name", "everything")])
    );
}

#[test]
fn test_nextjs_static_beats_dynamic() {
    // Next.js: pages/entity/list.tsx wins over pages/entity/[id].tsx
    let table = RouteTable::new(["/entity/[id]", "/entity/list"]).unwrap();

    let hit = table.match_path("/entity/list").unwrap();
    assert_eq!(hit.template.as_str(), "/entity/list");
    assert!(hit.params.is_empty());

    let hit = table.match_path("/entity/7").unwrap();
    assert_eq!(hit.template.as_str(), "/entity/[id]");
}

#[rstest]
#[case("/[...slug]", "/one/two/three", Some(vec!["one", "two", "three"]))]
#[case("/[...slug]", "/one", Some(vec!["one"]))]
#[case("/[[...slug]]", "/one/two", Some(vec!["one", "two"]))]
#[case("/docs/[...slug]", "/docs/a%20b/c", Some(vec!["a b", "c"]))]
fn test_nextjs_catch_all(
    #[case] template: &str,
    #[case] path: &str,
    #[case] expected: Option<Vec<&str>>,
) {
    let table = RouteTable::new([template]).unwrap();
    let expected = expected.map(|values| vec![("slug".to_string(), ParamValue::from(values))]);

    assert_eq!(params(&table, path), expected);
}

#[test]
fn test_nextjs_optional_catch_all_matches_root() {
    // Next.js: pages/[[...route]].tsx also serves /
    let table = RouteTable::new(["/[[...route]]"]).unwrap();

    assert_eq!(params(&table, "/"), Some(Vec::new()));
}

#[test]
fn test_nextjs_required_catch_all_rejects_root() {
    let table = RouteTable::new(["/[...route]"]).unwrap();

    assert!(table.match_path("/").is_none());
}

#[test]
fn test_nextjs_catch_all_ranks_last() {
    let table = RouteTable::new(["/[[...all]]", "/entity/[id]", "/about"]).unwrap();

    assert_eq!(
        table.match_path("/about").unwrap().template.as_str(),
        "/about"
    );
    assert_eq!(
        table.match_path("/entity/3").unwrap().template.as_str(),
        "/entity/[id]"
    );
    assert_eq!(
        table.match_path("/a/b/c").unwrap().template.as_str(),
        "/[[...all]]"
    );
}

// ============================================================================
// Template Normalization
// ============================================================================

#[test]
fn test_nextjs_index_pages() {
    // Next.js: pages/blog/index.tsx → /blog
    let table = RouteTable::new(["/blog/index", "index"]).unwrap();

    assert!(table.match_path("/blog").is_some());
    assert!(table.match_path("/").is_some());
}

#[test]
fn test_trailing_slash_in_path_is_tolerated() {
    let table = RouteTable::new(["/entity/[id]"]).unwrap();

    assert_eq!(params(&table, "/entity/42/"), Some(vec![single("id", "42")]));
}

// ============================================================================
// Invalid Tables
// ============================================================================

#[test]
fn test_nextjs_conflicting_slug_names() {
    // Next.js build error: "You cannot use different slug names for the same dynamic path"
    let err = RouteTable::new(["/post/[pid]", "/post/[id]"]).unwrap_err();

    assert!(matches!(err, TemplateError::ConflictingSlugNames { .. }));
    assert!(err.to_string().contains("different slug names"));
}

#[test]
fn test_nextjs_catch_all_must_be_last() {
    let err = RouteTable::new(["/docs/[...slug]/edit"]).unwrap_err();

    assert_eq!(
        err,
        TemplateError::CatchAllNotLast {
            template: "/docs/[...slug]/edit".to_string(),
            segment: "[...slug]".to_string(),
        }
    );
}
