//! Landing page.

use crate::registry::{ActionFn, ActionOutcome, ActionResult, PageSpec, RegistryError};
use crate::route::DEFAULT_ACTION;
use crate::view::View;

/// The index page spec.
pub fn page() -> Result<PageSpec, RegistryError> {
    PageSpec::new("IndexPage").action(DEFAULT_ACTION, ActionFn::View(action))
}

fn action(view: &mut View) -> ActionResult {
    view.put("message", "Pick a game to play.")?;
    Ok(ActionOutcome::Render)
}
