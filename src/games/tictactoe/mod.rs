//! Tic-tac-toe engine: board state, move application, win detection.

mod rules;
mod types;

pub use rules::{OutOfBounds, State};
pub use types::{Mark, Phase, Square};
