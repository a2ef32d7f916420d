// Integration tests for dynamic route templates plugged into the router
//
// Each test documents the equivalent pages/ layout for reference.

use memory_router::{
    create_dynamic_route_parser, MemoryRouter, ParamValue, Query, RouterError, UrlObject,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn router_with(templates: &[&str], async_mode: bool) -> MemoryRouter {
    let router = MemoryRouter::new().with_async(async_mode);
    let _hook = router.use_parser(create_dynamic_route_parser(templates).unwrap());
    router
}

fn query<const N: usize>(pairs: [(&str, &str); N]) -> Query {
    Query::from(pairs)
}

#[rstest]
#[tokio::test]
async fn test_parses_variables_from_slug(#[values(false, true)] async_mode: bool) {
    // pages/entity/[id]/attribute/[name].tsx
    let router = router_with(&["/entity/[id]/attribute/[name]", "/[...slug]"], async_mode);

    router.push("/entity/101/attribute/everything").await;

    assert_eq!(router.pathname(), "/entity/[id]/attribute/[name]");
    assert_eq!(router.as_path(), "/entity/101/attribute/everything");
    assert_eq!(router.query(), query([("id", "101"), ("name", "everything")]));
    assert_eq!(router.route_params(), query([("id", "101"), ("name", "everything")]));
}

#[rstest]
#[tokio::test]
async fn test_parses_catch_all(#[values(false, true)] async_mode: bool) {
    // pages/[...slug].tsx
    let router = router_with(&["/entity/[id]/attribute/[name]", "/[...slug]"], async_mode);

    router.push("/one/two/three").await;

    assert_eq!(router.pathname(), "/[...slug]");
    assert_eq!(router.as_path(), "/one/two/three");
    assert_eq!(
        router.query(),
        Query::from([("slug", ParamValue::from(["one", "two", "three"]))])
    );
}

#[rstest]
#[tokio::test]
async fn test_no_match_leaves_literal_path(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/entity/[id]/attribute/[name]"], async_mode);

    router.push("/one/two/three").await;

    assert_eq!(router.pathname(), "/one/two/three");
    assert_eq!(router.as_path(), "/one/two/three");
    assert_eq!(router.query(), Query::new());
    assert!(router.route_params().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_static_path_wins(#[values(false, true)] async_mode: bool) {
    // pages/entity/list.tsx next to pages/entity/[id].tsx
    let router = router_with(&["/entity/[id]", "/entity/list"], async_mode);

    router.push("/entity/list").await;

    assert_eq!(router.pathname(), "/entity/list");
    assert_eq!(router.as_path(), "/entity/list");
    assert_eq!(router.query(), Query::new());
}

#[rstest]
#[tokio::test]
async fn test_path_param_beats_query_param(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/entity/[id]"], async_mode);

    router.push("/entity/100?id=500").await;

    assert_eq!(router.pathname(), "/entity/[id]");
    assert_eq!(router.query(), query([("id", "100")]));
    assert_eq!(router.as_path(), "/entity/100?id=500");
}

#[rstest]
#[tokio::test]
async fn test_template_pathname_interpolates_from_query(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/entity/[id]"], async_mode);

    router
        .push(
            UrlObject::new()
                .with_pathname("/entity/[id]")
                .with_query(query([("id", "42")])),
        )
        .await;
    assert_eq!(router.pathname(), "/entity/[id]");
    assert_eq!(router.as_path(), "/entity/42");
    assert_eq!(router.query(), query([("id", "42")]));

    router
        .push(
            UrlObject::new()
                .with_pathname("/entity/[id]")
                .with_query(query([("id", "42"), ("filter", "abc")])),
        )
        .await;
    assert_eq!(router.as_path(), "/entity/42?filter=abc");
    assert_eq!(router.query(), query([("id", "42"), ("filter", "abc")]));
}

#[rstest]
#[tokio::test]
async fn test_template_pathname_interpolates_catch_all(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/[...slug]"], async_mode);
    let slug = Query::from([("slug", ParamValue::from(["one", "two", "three"]))]);

    router
        .push(
            UrlObject::new()
                .with_pathname("/[...slug]")
                .with_query(slug.clone()),
        )
        .await;

    assert_eq!(router.pathname(), "/[...slug]");
    assert_eq!(router.as_path(), "/one/two/three");
    assert_eq!(router.query(), slug);
}

#[rstest]
#[tokio::test]
async fn test_concrete_object_path_keeps_query_dictionary(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/entity/[id]"], async_mode);

    router
        .push(
            UrlObject::new()
                .with_pathname("/entity/100")
                .with_query(query([("filter", "abc"), ("max", "1000")])),
        )
        .await;

    assert_eq!(router.pathname(), "/entity/[id]");
    assert_eq!(router.as_path(), "/entity/100?filter=abc&max=1000");
    assert_eq!(
        router.query(),
        query([("id", "100"), ("filter", "abc"), ("max", "1000")])
    );
}

#[rstest]
#[tokio::test]
async fn test_optional_catch_all(#[values(false, true)] async_mode: bool) {
    // pages/one/two/[[...slug]].tsx
    let router = router_with(&["/one/two/[[...slug]]"], async_mode);

    router.push("/one/two/three/four").await;
    assert_eq!(router.pathname(), "/one/two/[[...slug]]");
    assert_eq!(router.as_path(), "/one/two/three/four");
    assert_eq!(
        router.query(),
        Query::from([("slug", ParamValue::from(["three", "four"]))])
    );

    router.push("/one/two").await;
    assert_eq!(router.pathname(), "/one/two/[[...slug]]");
    assert_eq!(router.query(), Query::new());
}

#[rstest]
#[tokio::test]
async fn test_optional_catch_all_omitted(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/entity/[id]/[[...slug]]"], async_mode);

    router.push("/entity/42").await;

    assert_eq!(router.pathname(), "/entity/[id]/[[...slug]]");
    assert_eq!(router.as_path(), "/entity/42");
    assert_eq!(router.query(), query([("id", "42")]));
    assert!(router.query().get("slug").is_none());
}

#[rstest]
#[tokio::test]
async fn test_as_path_param_beats_href_param(#[values(false, true)] async_mode: bool) {
    let router = router_with(&["/path/[testParam]"], async_mode);

    router.push_as("/path/123", "/path/456").await;

    assert_eq!(router.as_path(), "/path/456");
    assert_eq!(router.pathname(), "/path/[testParam]");
    assert_eq!(router.query(), query([("testParam", "456")]));
}

#[test]
fn test_hashes_are_preserved() {
    let router = router_with(&["/entity/[id]"], false);

    router.set_current_url("/entity/42#hash");
    assert_eq!(router.as_path(), "/entity/42#hash");
    assert_eq!(router.pathname(), "/entity/[id]");
    assert_eq!(router.hash(), "#hash");

    router.set_current_url("/entity/42?key=value#hash");
    assert_eq!(router.as_path(), "/entity/42?key=value#hash");
    assert_eq!(router.pathname(), "/entity/[id]");
    assert_eq!(router.query(), query([("key", "value"), ("id", "42")]));
}

#[test]
fn test_percent_encoded_segments_are_decoded() {
    let router = router_with(&["/search/[term]"], false);

    router.set_current_url("/search/hello%20world");

    assert_eq!(router.query(), query([("term", "hello world")]));
    assert_eq!(router.as_path(), "/search/hello%20world");
}

#[test]
fn test_use_routes_and_reset() {
    let router = MemoryRouter::new();
    router.use_routes(["/entity/[id]"]).unwrap();

    router.set_current_url("/entity/7");
    assert_eq!(router.pathname(), "/entity/[id]");

    router.reset();
    router.set_current_url("/entity/7");
    assert_eq!(router.pathname(), "/entity/7");
}

#[test]
fn test_conflicting_templates_are_rejected() {
    let router = MemoryRouter::new();

    let err = router.use_routes(["/post/[pid]", "/post/[id]/edit"]).unwrap_err();

    assert!(matches!(err, RouterError::Template(_)));
}
