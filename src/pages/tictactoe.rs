//! Tic-tac-toe page: session-scoped game state over the engine.
//!
//! `onMove` never renders; it only mutates the session game and redirects
//! back to the game view.

use crate::games::tictactoe::{Phase, State};
use crate::registry::{ActionError, ActionFn, ActionOutcome, ActionResult, PageSpec, RegistryError};
use crate::request::RequestContext;
use crate::route::DEFAULT_ACTION;
use crate::view::View;
use tracing::{debug, instrument, warn};

/// Relative path actions redirect back to. Resolves to this page again; the
/// leading capital is absorbed by route capitalization.
const GAME_PATH: &str = "TicTacToe";

/// Prefix of the request parameter naming the target cell.
const CELL_PARAM_PREFIX: &str = "cell_";

/// The tic-tac-toe page spec.
pub fn page() -> Result<PageSpec, RegistryError> {
    PageSpec::new("TicTacToePage")
        .action(DEFAULT_ACTION, ActionFn::RequestView(action))?
        .action("newGame", ActionFn::RequestView(new_game))?
        .action("onMove", ActionFn::RequestView(on_move))
}

/// Default view action: expose the session's game, creating one on first
/// visit, without mutating an existing game.
#[instrument(skip_all, fields(session_id = %ctx.session_id()))]
fn action(ctx: &RequestContext, view: &mut View) -> ActionResult {
    let state = ctx.with_session(|s| s.game.get_or_insert_with(State::new).clone());
    view.put("state", &state)?;
    Ok(ActionOutcome::Render)
}

/// Replaces the session's game with a fresh one and redirects back.
#[instrument(skip_all, fields(session_id = %ctx.session_id()))]
fn new_game(ctx: &RequestContext, view: &mut View) -> ActionResult {
    let state = State::new();
    view.put("state", &state)?;
    ctx.with_session(|s| s.game = Some(state));
    debug!("new game stored");
    Ok(ActionOutcome::Redirect(GAME_PATH.to_string()))
}

/// What one move attempt did to the session game.
enum MoveAttempt {
    /// No game stored in the session.
    NoGame,
    /// Game already over; nothing touched.
    Finished,
    /// Malformed or out-of-range cell input; nothing touched.
    Rejected,
    /// Move applied and phase refreshed.
    Applied(State),
}

/// Applies one move. Every non-faulting path redirects back to the game view.
#[instrument(skip_all, fields(session_id = %ctx.session_id()))]
fn on_move(ctx: &RequestContext, view: &mut View) -> ActionResult {
    let target = ctx
        .param_names()
        .find(|name| name.starts_with(CELL_PARAM_PREFIX))
        .map(str::to_string)
        .and_then(|name| parse_cell(&name));

    let attempt = ctx.with_session(|s| {
        let Some(state) = s.game.as_mut() else {
            return MoveAttempt::NoGame;
        };
        if state.phase() != Phase::Running {
            return MoveAttempt::Finished;
        }
        let Some((row, col)) = target else {
            return MoveAttempt::Rejected;
        };
        // Intentionally `>` not `>=`: index == size slips through here and is
        // stopped only by the board's checked access below. Documented
        // contract of the engine; see `State::apply_move`.
        if row > state.size() || col > state.size() {
            return MoveAttempt::Rejected;
        }
        let mark = state.turn_code();
        if state.apply_move(row, col, mark).is_err() {
            return MoveAttempt::Rejected;
        }
        state.refresh_phase();
        MoveAttempt::Applied(state.clone())
    });

    match attempt {
        MoveAttempt::NoGame => Err(ActionError::new("no game stored in session")),
        MoveAttempt::Finished => {
            debug!("game already over, move refused");
            Ok(ActionOutcome::Redirect(GAME_PATH.to_string()))
        }
        MoveAttempt::Rejected => {
            warn!("move input rejected");
            Ok(ActionOutcome::Redirect(GAME_PATH.to_string()))
        }
        MoveAttempt::Applied(state) => {
            view.put("state", &state)?;
            Ok(ActionOutcome::Redirect(GAME_PATH.to_string()))
        }
    }
}

/// Reads the row and column encoded at fixed offsets of a `cell_RC` name.
fn parse_cell(name: &str) -> Option<(usize, usize)> {
    let mut digits = name.chars().skip(CELL_PARAM_PREFIX.len());
    let row = digits.next()?.to_digit(10)? as usize;
    let col = digits.next()?.to_digit(10)? as usize;
    Some((row, col))
}
