//! Built-in pages and the production registry.

mod index;
mod not_found;
mod tictactoe;

use crate::registry::{PageRegistry, RegistryError};

/// Builds the full page registry under the given base namespace.
///
/// A registration error here is a page authoring bug and aborts startup.
pub fn registry(base: &str) -> Result<PageRegistry, RegistryError> {
    PageRegistry::new()
        .register(qualified(base, "IndexPage"), index::page()?)?
        .register(qualified(base, "NotFoundPage"), not_found::page()?)?
        .register(qualified(base, "TicTacToePage"), tictactoe::page()?)
}

fn qualified(base: &str, simple_name: &str) -> String {
    format!("{}.{}", base, simple_name)
}
