//! Tests for the tic-tac-toe board rules.

use frontpage::{Mark, OutOfBounds, Phase, Square, State};

/// Plays one full move the way the page does: place the mark of the side to
/// move, then refresh the phase (which flips the turn).
fn play(state: &mut State, row: usize, col: usize) {
    let mark = state.turn_code();
    state.apply_move(row, col, mark).expect("move on board");
    state.refresh_phase();
}

#[test]
fn test_new_board_is_empty_with_crosses_to_move() {
    let state = State::new();
    assert_eq!(state.size(), 3);
    assert_eq!(state.free_cells(), 9);
    assert!(state.crosses_move());
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.turn_code(), Mark::X);
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(state.cell(row, col), Some(Square::Empty));
        }
    }
}

#[test]
fn test_move_occupies_cell_and_decrements_free_count() {
    let mut state = State::new();
    state.apply_move(1, 1, Mark::X).expect("move on board");
    assert_eq!(state.cell(1, 1), Some(Square::Occupied(Mark::X)));
    assert_eq!(state.free_cells(), 8);
}

#[test]
fn test_occupied_cell_is_silently_ignored() {
    let mut state = State::new();
    state.apply_move(0, 0, Mark::X).expect("move on board");
    state.apply_move(0, 0, Mark::O).expect("move on board");
    assert_eq!(state.cell(0, 0), Some(Square::Occupied(Mark::X)));
    assert_eq!(state.free_cells(), 8);
}

#[test]
fn test_out_of_bounds_move_leaves_board_unchanged() {
    let mut state = State::new();
    let before = state.clone();
    let err = state.apply_move(3, 0, Mark::X).expect_err("off the board");
    assert_eq!(
        err,
        OutOfBounds {
            row: 3,
            col: 0,
            size: 3,
        }
    );
    assert_eq!(state, before);
}

#[test]
fn test_refresh_flips_turn_every_time() {
    let mut state = State::new();
    assert!(state.crosses_move());
    state.refresh_phase();
    assert!(!state.crosses_move());
    assert_eq!(state.turn_code(), Mark::O);
    state.refresh_phase();
    assert!(state.crosses_move());
}

#[test]
fn test_row_win_for_crosses() {
    let mut state = State::new();
    play(&mut state, 0, 0); // X
    play(&mut state, 1, 0); // O
    play(&mut state, 0, 1); // X
    play(&mut state, 1, 1); // O
    assert_eq!(state.phase(), Phase::Running);
    play(&mut state, 0, 2); // X completes the top row
    assert_eq!(state.phase(), Phase::WonX);
}

#[test]
fn test_column_win_for_noughts() {
    let mut state = State::new();
    play(&mut state, 0, 0); // X
    play(&mut state, 0, 2); // O
    play(&mut state, 0, 1); // X
    play(&mut state, 1, 2); // O
    play(&mut state, 1, 1); // X
    play(&mut state, 2, 2); // O completes the right column
    assert_eq!(state.phase(), Phase::WonO);
}

#[test]
fn test_diagonal_win() {
    let mut state = State::new();
    play(&mut state, 0, 0); // X
    play(&mut state, 0, 1); // O
    play(&mut state, 1, 1); // X
    play(&mut state, 0, 2); // O
    play(&mut state, 2, 2); // X completes the main diagonal
    assert_eq!(state.phase(), Phase::WonX);
}

#[test]
fn test_antidiagonal_win() {
    let mut state = State::new();
    play(&mut state, 0, 2); // X
    play(&mut state, 0, 0); // O
    play(&mut state, 1, 1); // X
    play(&mut state, 0, 1); // O
    play(&mut state, 2, 0); // X completes the antidiagonal
    assert_eq!(state.phase(), Phase::WonX);
}

#[test]
fn test_full_board_without_line_is_a_draw() {
    let mut state = State::new();
    // X X O
    // O O X
    // X O X
    play(&mut state, 0, 0); // X
    play(&mut state, 0, 2); // O
    play(&mut state, 0, 1); // X
    play(&mut state, 1, 0); // O
    play(&mut state, 1, 2); // X
    play(&mut state, 1, 1); // O
    play(&mut state, 2, 0); // X
    play(&mut state, 2, 1); // O
    play(&mut state, 2, 2); // X
    assert_eq!(state.free_cells(), 0);
    assert_eq!(state.phase(), Phase::Draw);
}

#[test]
fn test_refresh_flips_turn_even_after_a_win() {
    let mut state = State::new();
    play(&mut state, 0, 0); // X
    play(&mut state, 1, 0); // O
    play(&mut state, 0, 1); // X
    play(&mut state, 1, 1); // O
    play(&mut state, 0, 2); // X wins
    assert_eq!(state.phase(), Phase::WonX);
    // The refresh inside `play` already flipped the turn past the win.
    assert!(!state.crosses_move());
}

#[test]
fn test_ignored_move_still_flips_turn_on_refresh() {
    // The page refreshes unconditionally, so a move against an occupied cell
    // passes the turn without changing the board.
    let mut state = State::new();
    play(&mut state, 0, 0); // X
    let free_before = state.free_cells();
    play(&mut state, 0, 0); // O against X's square: ignored, turn passes
    assert_eq!(state.cell(0, 0), Some(Square::Occupied(Mark::X)));
    assert_eq!(state.free_cells(), free_before);
    assert!(state.crosses_move());
}

#[test]
fn test_state_serializes_with_camel_case_keys_and_square_codes() {
    let mut state = State::new();
    play(&mut state, 1, 1); // X
    let value = serde_json::to_value(&state).expect("serialize state");
    assert_eq!(value["phase"], "RUNNING");
    assert_eq!(value["crossesMove"], false);
    assert_eq!(value["freeCells"], 8);
    assert_eq!(value["cells"][1][1], "X");
    assert_eq!(value["cells"][0][0], "");
}
