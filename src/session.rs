//! In-memory session store keyed by session id.

use crate::games::tictactoe::State;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Unique identifier for a session, carried in the `sid` cookie.
pub type SessionId = String;

/// Durable per-session attributes.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Current game, if one has been started.
    pub game: Option<State>,
    /// Preferred language, persisted once a supplied `lang` is accepted.
    pub lang: Option<String>,
}

/// Shared store of all sessions.
///
/// Mutation goes through [`SessionStore::with_session`], which runs the whole
/// read-modify-write under the store lock, so concurrent requests in the same
/// session cannot interleave mid-update.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh session id.
    pub fn fresh_id(&self) -> SessionId {
        Uuid::new_v4().to_string()
    }

    /// Runs `f` against the session's state under the store lock, creating the
    /// session on first touch.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap();
        let state = sessions.entry(id.to_string()).or_default();
        f(state)
    }

    /// Drops a session and everything stored in it.
    #[instrument(skip(self))]
    pub fn invalidate(&self, id: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.remove(id).is_some() {
            debug!("session invalidated");
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Whether no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
