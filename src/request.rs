//! Read-only request surface handed to actions.

use crate::session::{SessionId, SessionState, SessionStore};

/// What an action may see of the incoming request: the path, the merged
/// query/form parameters, and a handle to the request's session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    path: String,
    params: Vec<(String, String)>,
    sessions: SessionStore,
    session_id: SessionId,
}

impl RequestContext {
    /// Builds a context. `params` holds query parameters first, then form
    /// parameters, in arrival order.
    pub fn new(
        path: impl Into<String>,
        params: Vec<(String, String)>,
        sessions: SessionStore,
        session_id: impl Into<SessionId>,
    ) -> Self {
        Self {
            path: path.into(),
            params,
            sessions,
            session_id: session_id.into(),
        }
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value supplied for `name`, query parameters winning over form.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All parameter names, in arrival order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Session id of this request.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Runs `f` against this request's session state, atomically.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        self.sessions.with_session(&self.session_id, f)
    }
}
