//! Game engines exposed to pages.

pub mod tictactoe;
