//! Board state and the rules for applying moves and refreshing the phase.

use super::types::{Mark, Phase, Square};
use derive_more::{Display, Error};
use serde::Serialize;
use tracing::{debug, instrument};

/// Board edge length.
const SIZE: usize = 3;
/// Consecutive identical marks needed to win.
const IN_ROW_COUNT: usize = 3;

/// Coordinates outside the board were passed to [`State::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("cell ({}, {}) is outside the {}x{} board", row, col, size, size)]
pub struct OutOfBounds {
    /// Offending row index.
    pub row: usize,
    /// Offending column index.
    pub col: usize,
    /// Board edge length.
    pub size: usize,
}

/// Complete game state.
///
/// Serializes with camelCase keys so views read naturally in templates
/// (`state.crossesMove`, `state.freeCells`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    size: usize,
    in_row_count: usize,
    cells: Vec<Vec<Square>>,
    free_cells: usize,
    crosses_move: bool,
    phase: Phase,
}

impl State {
    /// Creates a fresh board with crosses to move.
    pub fn new() -> Self {
        Self {
            size: SIZE,
            in_row_count: IN_ROW_COUNT,
            cells: vec![vec![Square::Empty; SIZE]; SIZE],
            free_cells: SIZE * SIZE,
            crosses_move: true,
            phase: Phase::Running,
        }
    }

    /// Board edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether crosses move next.
    pub fn crosses_move(&self) -> bool {
        self.crosses_move
    }

    /// Number of unoccupied squares.
    pub fn free_cells(&self) -> usize {
        self.free_cells
    }

    /// The square at the given coordinates, if on the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<Square> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// The mark of the side to move: crosses play `X`, noughts play `O`.
    pub fn turn_code(&self) -> Mark {
        if self.crosses_move { Mark::X } else { Mark::O }
    }

    /// Sets the cell to `mark` only if it is currently empty, decrementing the
    /// free-cell counter on success. An occupied cell is silently ignored.
    ///
    /// Callers must validate coordinates strictly below [`State::size`];
    /// coordinates outside the board return [`OutOfBounds`] without mutating
    /// anything.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), OutOfBounds> {
        let size = self.size;
        let square = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(OutOfBounds { row, col, size })?;

        if *square == Square::Empty {
            *square = Square::Occupied(mark);
            self.free_cells -= 1;
            debug!(free_cells = self.free_cells, "mark placed");
        } else {
            debug!("cell occupied, move ignored");
        }
        Ok(())
    }

    /// Recomputes the phase for the mark that just moved, then flips whose
    /// turn it is. The flip is unconditional, even on a terminal phase, so
    /// callers must not apply further moves once the phase leaves `Running`.
    #[instrument(skip(self), fields(mover = %self.turn_code()))]
    pub fn refresh_phase(&mut self) {
        self.phase = self.check_phase();
        self.crosses_move = !self.crosses_move;
        debug!(phase = %self.phase, "phase refreshed");
    }

    fn check_phase(&self) -> Phase {
        let check = self.turn_code();
        let size = self.size;
        let mut won = false;

        // Rows and columns.
        for fixed in 0..size {
            won = won || self.check_line(check, |_| fixed, |i| i);
            won = won || self.check_line(check, |i| i, |_| fixed);
        }
        // Diagonals and antidiagonals, shifted by offset.
        for offset in 0..size {
            won = won || self.check_line(check, move |i| offset + i, |i| i);
            won = won || self.check_line(check, move |i| offset + size - 1 - i, |i| i);
        }

        if won {
            if self.crosses_move { Phase::WonX } else { Phase::WonO }
        } else if self.free_cells == 0 {
            Phase::Draw
        } else {
            Phase::Running
        }
    }

    /// Walks one candidate line, counting consecutive squares holding `check`.
    fn check_line(
        &self,
        check: Mark,
        row_at: impl Fn(usize) -> usize,
        col_at: impl Fn(usize) -> usize,
    ) -> bool {
        let mut count = 0;
        for i in 0..self.size {
            let row = row_at(i);
            let col = col_at(i);
            if row >= self.size || col >= self.size {
                break;
            }
            if self.cells[row][col] == Square::Occupied(check) {
                count += 1;
                if count == self.in_row_count {
                    return true;
                }
            } else {
                count = 0;
            }
        }
        false
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
