//! Explicit action registry.
//!
//! Pages register their actions up front as statically typed functions, so an
//! ambiguous action name is a registration-time error instead of something
//! discovered while serving a request. A page may layer in shared action sets;
//! its own actions shadow shared ones.

use crate::request::RequestContext;
use crate::view::View;
use derive_more::{Display, Error};
use std::collections::{BTreeSet, HashMap};
use tracing::instrument;

/// What an action instructs the front controller to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Render the page's template against the populated view.
    Render,
    /// Skip rendering and redirect to the given relative path.
    Redirect(String),
}

/// Failure inside an action body. Surfaced as an internal error, never retried.
#[derive(Debug, Clone, Display, Error)]
#[display("action error: {} at {}:{}", message, file, line)]
pub struct ActionError {
    /// Error message.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl ActionError {
    /// Creates an action error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for ActionError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("can't serialize view value: {}", err))
    }
}

/// Result of one action invocation.
pub type ActionResult = Result<ActionOutcome, ActionError>;

/// The recognized action signatures: a view writer and/or a request reader,
/// each at most once, at most two parameters, no other shapes.
#[derive(Debug, Clone, Copy)]
pub enum ActionFn {
    /// Takes nothing; renders an empty view or redirects.
    Bare(fn() -> ActionResult),
    /// Takes only the view mapping.
    View(fn(&mut View) -> ActionResult),
    /// Takes only the request.
    Request(fn(&RequestContext) -> ActionResult),
    /// Takes the request and the view mapping.
    RequestView(fn(&RequestContext, &mut View) -> ActionResult),
}

impl ActionFn {
    pub(crate) fn invoke(&self, ctx: &RequestContext, view: &mut View) -> ActionResult {
        match self {
            ActionFn::Bare(f) => f(),
            ActionFn::View(f) => f(view),
            ActionFn::Request(f) => f(ctx),
            ActionFn::RequestView(f) => f(ctx, view),
        }
    }
}

/// Registration fault: a page authoring bug, fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    /// Two actions were registered under the same name in one scope.
    #[display("action '{}' registered twice in '{}'", action, scope)]
    DuplicateAction {
        /// Page simple name or shared-set label.
        scope: String,
        /// Conflicting action name.
        action: String,
    },
    /// Two pages were registered under the same identifier.
    #[display("page '{}' registered twice", id)]
    DuplicatePage {
        /// Conflicting page identifier.
        id: String,
    },
}

/// A named map of actions. Used both as a page's own table and as a shared
/// set composed into several pages.
#[derive(Debug, Clone, Default)]
pub struct ActionSet {
    scope: String,
    actions: HashMap<String, ActionFn>,
}

impl ActionSet {
    /// Creates an empty set labelled `scope` (for error messages).
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            actions: HashMap::new(),
        }
    }

    /// Adds an action. A duplicate name is the ambiguity fault and is never
    /// silently resolved in favor of either entry.
    pub fn action(mut self, name: &str, f: ActionFn) -> Result<Self, RegistryError> {
        if self.actions.contains_key(name) {
            return Err(RegistryError::DuplicateAction {
                scope: self.scope.clone(),
                action: name.to_string(),
            });
        }
        self.actions.insert(name.to_string(), f);
        Ok(self)
    }

    fn get(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }
}

/// One registered page: its simple name, its own actions, and any shared sets
/// composed in. Lookup tries own actions first, then shared sets in order.
#[derive(Debug, Clone)]
pub struct PageSpec {
    simple_name: String,
    own: ActionSet,
    shared: Vec<ActionSet>,
}

impl PageSpec {
    /// Creates a page with the given simple name (also its template name).
    pub fn new(simple_name: impl Into<String>) -> Self {
        let simple_name = simple_name.into();
        let own = ActionSet::new(simple_name.clone());
        Self {
            simple_name,
            own,
            shared: Vec::new(),
        }
    }

    /// Adds one of the page's own actions.
    pub fn action(mut self, name: &str, f: ActionFn) -> Result<Self, RegistryError> {
        self.own = self.own.action(name, f)?;
        Ok(self)
    }

    /// Layers in a shared action set. Own actions shadow it; earlier composed
    /// sets shadow later ones.
    pub fn compose(mut self, set: ActionSet) -> Self {
        self.shared.push(set);
        self
    }

    /// The page's simple name, used to pick its template.
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Every reachable action name, shadowing applied, sorted.
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: BTreeSet<&str> = self.own.names().collect();
        for set in &self.shared {
            names.extend(set.names());
        }
        names.into_iter().collect()
    }

    pub(crate) fn find(&self, name: &str) -> Option<&ActionFn> {
        self.own
            .get(name)
            .or_else(|| self.shared.iter().find_map(|set| set.get(name)))
    }
}

/// Identifier-keyed table of all registered pages. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
    pages: HashMap<String, PageSpec>,
}

impl PageRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page under its full identifier, e.g. `pages.IndexPage`.
    #[instrument(skip_all, fields(page = %spec.simple_name()))]
    pub fn register(
        mut self,
        id: impl Into<String>,
        spec: PageSpec,
    ) -> Result<Self, RegistryError> {
        let id = id.into();
        if self.pages.contains_key(&id) {
            return Err(RegistryError::DuplicatePage { id });
        }
        self.pages.insert(id, spec);
        Ok(self)
    }

    /// Looks up a page by identifier.
    pub fn page(&self, id: &str) -> Option<&PageSpec> {
        self.pages.get(id)
    }

    /// All (identifier, page) entries, sorted by identifier.
    pub fn entries(&self) -> Vec<(&str, &PageSpec)> {
        let mut entries: Vec<_> = self
            .pages
            .iter()
            .map(|(id, spec)| (id.as_str(), spec))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}
