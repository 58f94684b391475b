//! Tests for route derivation from paths and the `action` parameter.

use frontpage::{DEFAULT_ACTION, RouteResolver};

fn resolver() -> RouteResolver {
    RouteResolver::new("pages")
}

#[test]
fn test_empty_path_is_index_route() {
    let route = resolver().resolve("", None);
    assert_eq!(route.page(), "pages.IndexPage");
    assert_eq!(route.action(), DEFAULT_ACTION);
    assert_eq!(route, resolver().index());
}

#[test]
fn test_root_slash_is_index_route() {
    let route = resolver().resolve("/", None);
    assert_eq!(route, resolver().index());
}

#[test]
fn test_last_segment_is_capitalized_and_suffixed() {
    let route = resolver().resolve("/ticTacToe", None);
    assert_eq!(route.page(), "pages.TicTacToePage");
}

#[test]
fn test_multi_segment_path_joins_with_dots() {
    let route = resolver().resolve("/admin/users", None);
    assert_eq!(route.page(), "pages.admin.UsersPage");
}

#[test]
fn test_repeated_slashes_are_dropped() {
    let route = resolver().resolve("//ticTacToe//", None);
    assert_eq!(route.page(), "pages.TicTacToePage");
}

#[test]
fn test_missing_action_defaults() {
    let route = resolver().resolve("/ticTacToe", None);
    assert_eq!(route.action(), DEFAULT_ACTION);
}

#[test]
fn test_empty_action_defaults() {
    let route = resolver().resolve("/ticTacToe", Some(""));
    assert_eq!(route.action(), DEFAULT_ACTION);
}

#[test]
fn test_supplied_action_is_kept() {
    let route = resolver().resolve("/ticTacToe", Some("onMove"));
    assert_eq!(route.action(), "onMove");
}

#[test]
fn test_not_found_route_is_fixed() {
    let route = resolver().not_found();
    assert_eq!(route.page(), "pages.NotFoundPage");
    assert_eq!(route.action(), DEFAULT_ACTION);
}

#[test]
fn test_unvalidated_segments_pass_through() {
    // Resolution never rejects odd segments; dispatch reports NotFound later.
    let route = resolver().resolve("/no-such.page!", None);
    assert_eq!(route.page(), "pages.No-such.page!Page");
}
