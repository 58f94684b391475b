//! Request dispatch: route to page to action, with the single NotFound retry.
//!
//! A request moves through `ROUTE_RESOLVED -> PAGE_RESOLVED -> ACTION_RESOLVED`
//! and ends in exactly one of rendered, redirected, or errored. Failure to
//! resolve the page or action is retried once against the fixed not-found
//! route; a second failure is fatal.

use crate::registry::{ActionOutcome, PageRegistry};
use crate::request::RequestContext;
use crate::route::{Route, RouteResolver};
use crate::view::View;
use derive_more::{Display, Error};
use tracing::{debug, instrument, warn};

/// Dispatch failure taxonomy.
#[derive(Debug, Clone, Display, Error)]
pub enum DispatchError {
    /// The route names no registered page or no action on the page.
    #[display("no page or action matches the route")]
    NotFound,
    /// An action faulted, or the not-found retry itself failed.
    #[display("internal dispatch error: {}", message)]
    Internal {
        /// What went wrong.
        message: String,
    },
}

/// How a successfully dispatched request ends.
#[derive(Debug)]
pub enum Disposition {
    /// Render the page template against this view.
    Rendered(View),
    /// Issue an HTTP redirect to this relative path.
    Redirected(String),
}

/// Result of dispatching one route.
#[derive(Debug)]
pub struct DispatchOutcome {
    /// Simple name of the page that handled the request; selects the template.
    pub page_name: String,
    /// Render or redirect.
    pub disposition: Disposition,
}

/// Resolves routes against the registry and invokes the matched action.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    resolver: RouteResolver,
    registry: PageRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher over a built registry.
    pub fn new(resolver: RouteResolver, registry: PageRegistry) -> Self {
        Self { resolver, registry }
    }

    /// The route resolver this dispatcher retries against.
    pub fn resolver(&self) -> &RouteResolver {
        &self.resolver
    }

    /// Dispatches one route: resolve the page, resolve the action, invoke it
    /// against a fresh view.
    #[instrument(skip(self, ctx), fields(page = %route.page(), action = %route.action()))]
    pub fn handle(
        &self,
        route: &Route,
        ctx: &RequestContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        let page = self
            .registry
            .page(route.page())
            .ok_or(DispatchError::NotFound)?;
        let action = page.find(route.action()).ok_or(DispatchError::NotFound)?;

        let mut view = View::new();
        match action.invoke(ctx, &mut view) {
            Ok(ActionOutcome::Render) => {
                debug!(entries = view.len(), "action rendered");
                Ok(DispatchOutcome {
                    page_name: page.simple_name().to_string(),
                    disposition: Disposition::Rendered(view),
                })
            }
            Ok(ActionOutcome::Redirect(target)) => {
                debug!(target = %target, "action redirected");
                Ok(DispatchOutcome {
                    page_name: page.simple_name().to_string(),
                    disposition: Disposition::Redirected(target),
                })
            }
            Err(e) => Err(DispatchError::Internal {
                message: format!(
                    "action '{}' on '{}' failed: {}",
                    route.action(),
                    route.page(),
                    e
                ),
            }),
        }
    }

    /// Dispatches with the NotFound recovery: an unresolved route is retried
    /// exactly once against the fixed not-found route, and a second failure is
    /// surfaced as an internal error rather than looped.
    #[instrument(skip(self, ctx), fields(page = %route.page(), action = %route.action()))]
    pub fn handle_with_retry(
        &self,
        route: &Route,
        ctx: &RequestContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        match self.handle(route, ctx) {
            Err(DispatchError::NotFound) => {
                warn!(page = %route.page(), action = %route.action(), "route not found, retrying with not-found route");
                self.handle(&self.resolver.not_found(), ctx)
                    .map_err(|e| match e {
                        DispatchError::NotFound => DispatchError::Internal {
                            message: "not-found page failed to resolve".to_string(),
                        },
                        other => other,
                    })
            }
            other => other,
        }
    }
}
