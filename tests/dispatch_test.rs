//! Tests for the action registry and the dispatcher's NotFound recovery.

use frontpage::{
    ActionFn, ActionOutcome, ActionResult, ActionSet, DispatchError, Dispatcher, Disposition,
    PageRegistry, PageSpec, RegistryError, RequestContext, RouteResolver, SessionStore, View,
};

fn render_marker(view: &mut View) -> ActionResult {
    view.put("marker", "own").expect("view insert");
    Ok(ActionOutcome::Render)
}

fn render_shared(view: &mut View) -> ActionResult {
    view.put("marker", "shared").expect("view insert");
    Ok(ActionOutcome::Render)
}

fn redirect_away() -> ActionResult {
    Ok(ActionOutcome::Redirect("elsewhere".to_string()))
}

fn failing() -> ActionResult {
    Err(frontpage::ActionError::new("boom"))
}

fn context() -> RequestContext {
    RequestContext::new("/test", Vec::new(), SessionStore::new(), "s1")
}

fn dispatcher(registry: PageRegistry) -> Dispatcher {
    Dispatcher::new(RouteResolver::new("pages"), registry)
}

fn not_found_page() -> PageSpec {
    PageSpec::new("NotFoundPage")
        .action("action", ActionFn::Bare(|| Ok(ActionOutcome::Render)))
        .expect("not-found page")
}

#[test]
fn test_duplicate_action_is_registration_error() {
    let result = PageSpec::new("TestPage")
        .action("action", ActionFn::View(render_marker))
        .expect("first registration")
        .action("action", ActionFn::Bare(redirect_away));

    assert_eq!(
        result.err(),
        Some(RegistryError::DuplicateAction {
            scope: "TestPage".to_string(),
            action: "action".to_string(),
        })
    );
}

#[test]
fn test_duplicate_page_is_registration_error() {
    let result = PageRegistry::new()
        .register("pages.TestPage", PageSpec::new("TestPage"))
        .expect("first registration")
        .register("pages.TestPage", PageSpec::new("TestPage"));

    assert_eq!(
        result.err(),
        Some(RegistryError::DuplicatePage {
            id: "pages.TestPage".to_string(),
        })
    );
}

#[test]
fn test_unknown_page_is_not_found() {
    let dispatcher = dispatcher(PageRegistry::new());
    let route = RouteResolver::new("pages").resolve("/nope", None);
    let result = dispatcher.handle(&route, &context());
    assert!(matches!(result, Err(DispatchError::NotFound)));
}

#[test]
fn test_unknown_action_is_not_found() {
    let page = PageSpec::new("TestPage")
        .action("action", ActionFn::View(render_marker))
        .expect("page");
    let registry = PageRegistry::new()
        .register("pages.TestPage", page)
        .expect("registry");
    let dispatcher = dispatcher(registry);

    let route = RouteResolver::new("pages").resolve("/test", Some("missing"));
    let result = dispatcher.handle(&route, &context());
    assert!(matches!(result, Err(DispatchError::NotFound)));
}

#[test]
fn test_not_found_retry_lands_on_not_found_page() {
    let registry = PageRegistry::new()
        .register("pages.NotFoundPage", not_found_page())
        .expect("registry");
    let dispatcher = dispatcher(registry);

    let route = RouteResolver::new("pages").resolve("/nope", None);
    let outcome = dispatcher
        .handle_with_retry(&route, &context())
        .expect("retry succeeds");
    assert_eq!(outcome.page_name, "NotFoundPage");
    assert!(matches!(outcome.disposition, Disposition::Rendered(_)));
}

#[test]
fn test_second_not_found_is_fatal_not_looped() {
    // No NotFoundPage registered: the retry itself fails and must terminate
    // with an internal error.
    let dispatcher = dispatcher(PageRegistry::new());
    let route = RouteResolver::new("pages").resolve("/nope", None);
    let result = dispatcher.handle_with_retry(&route, &context());
    assert!(matches!(result, Err(DispatchError::Internal { .. })));
}

#[test]
fn test_own_action_shadows_shared_set() {
    let shared = ActionSet::new("common")
        .action("action", ActionFn::View(render_shared))
        .expect("shared set")
        .action("extra", ActionFn::View(render_shared))
        .expect("shared set");
    let page = PageSpec::new("TestPage")
        .action("action", ActionFn::View(render_marker))
        .expect("page")
        .compose(shared);
    let registry = PageRegistry::new()
        .register("pages.TestPage", page)
        .expect("registry");
    let dispatcher = dispatcher(registry);
    let resolver = RouteResolver::new("pages");

    // Own action wins over the shared one of the same name.
    let outcome = dispatcher
        .handle(&resolver.resolve("/test", None), &context())
        .expect("dispatch");
    let Disposition::Rendered(view) = outcome.disposition else {
        panic!("expected render");
    };
    assert_eq!(view.get("marker").and_then(|v| v.as_str()), Some("own"));

    // Shared-only actions stay reachable.
    let outcome = dispatcher
        .handle(&resolver.resolve("/test", Some("extra")), &context())
        .expect("dispatch");
    let Disposition::Rendered(view) = outcome.disposition else {
        panic!("expected render");
    };
    assert_eq!(view.get("marker").and_then(|v| v.as_str()), Some("shared"));
}

#[test]
fn test_redirect_outcome_propagates() {
    let page = PageSpec::new("TestPage")
        .action("go", ActionFn::Bare(redirect_away))
        .expect("page");
    let registry = PageRegistry::new()
        .register("pages.TestPage", page)
        .expect("registry");
    let dispatcher = dispatcher(registry);

    let route = RouteResolver::new("pages").resolve("/test", Some("go"));
    let outcome = dispatcher.handle(&route, &context()).expect("dispatch");
    let Disposition::Redirected(target) = outcome.disposition else {
        panic!("expected redirect");
    };
    assert_eq!(target, "elsewhere");
}

#[test]
fn test_action_fault_is_internal_error() {
    let page = PageSpec::new("TestPage")
        .action("action", ActionFn::Bare(failing))
        .expect("page");
    let registry = PageRegistry::new()
        .register("pages.TestPage", page)
        .expect("registry");
    let dispatcher = dispatcher(registry);

    let route = RouteResolver::new("pages").resolve("/test", None);
    let result = dispatcher.handle_with_retry(&route, &context());
    assert!(matches!(result, Err(DispatchError::Internal { .. })));
}

#[test]
fn test_production_registry_builds() {
    let registry = frontpage::page_registry("pages").expect("production registry");
    let page = registry.page("pages.TicTacToePage").expect("game page");
    assert_eq!(page.action_names(), vec!["action", "newGame", "onMove"]);
    assert!(registry.page("pages.IndexPage").is_some());
    assert!(registry.page("pages.NotFoundPage").is_some());
}
