//! Fallback page rendered when a route resolves to nothing.
//!
//! Dispatched like any other page, so its template participates in the same
//! source and locale lookup.

use crate::registry::{ActionFn, ActionOutcome, ActionResult, PageSpec, RegistryError};
use crate::route::DEFAULT_ACTION;

/// The not-found page spec.
pub fn page() -> Result<PageSpec, RegistryError> {
    PageSpec::new("NotFoundPage").action(DEFAULT_ACTION, ActionFn::Bare(action))
}

fn action() -> ActionResult {
    Ok(ActionOutcome::Render)
}
