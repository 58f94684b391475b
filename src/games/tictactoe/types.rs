//! Core domain types for tic-tac-toe.

use serde::{Serialize, Serializer};

/// Side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
pub enum Mark {
    /// Crosses (go first).
    X,
    /// Noughts.
    O,
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    /// Unoccupied square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// The square's code as it appears in views: empty string, `X` or `O`.
    pub fn code(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(Mark::X) => "X",
            Square::Occupied(Mark::O) => "O",
        }
    }
}

// Views expose squares as bare codes so templates can print cells directly.
impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Phase of the game. Transitions only move forward from `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Phase {
    /// Game is ongoing.
    #[serde(rename = "RUNNING")]
    #[strum(serialize = "RUNNING")]
    Running,
    /// Board filled with no winning line.
    #[serde(rename = "DRAW")]
    #[strum(serialize = "DRAW")]
    Draw,
    /// Crosses completed a line.
    #[serde(rename = "WON_X")]
    #[strum(serialize = "WON_X")]
    WonX,
    /// Noughts completed a line.
    #[serde(rename = "WON_O")]
    #[strum(serialize = "WON_O")]
    WonO,
}
