//! Route resolution: request path + `action` parameter to a page identifier
//! and an action name.

use derive_getters::Getters;
use tracing::{debug, instrument};

/// Action name used when the request supplies none.
pub const DEFAULT_ACTION: &str = "action";

/// Suffix appended to the capitalized last path segment.
const PAGE_SUFFIX: &str = "Page";

const INDEX_PAGE: &str = "IndexPage";
const NOT_FOUND_PAGE: &str = "NotFoundPage";

/// A resolved (page identifier, action name) pair. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Route {
    page: String,
    action: String,
}

/// Derives routes under a fixed base namespace.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    base: String,
}

impl RouteResolver {
    /// Creates a resolver rooted at the given namespace, e.g. `pages`.
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Resolves a request path and optional `action` parameter.
    ///
    /// Path segments join with `.` under the base namespace; the last segment
    /// has its first character uppercased and gets the `Page` suffix. An empty
    /// path yields the index route. A missing or empty action parameter yields
    /// [`DEFAULT_ACTION`]. Segment characters are not validated here; unknown
    /// identifiers surface as NotFound at dispatch.
    #[instrument(skip(self))]
    pub fn resolve(&self, path: &str, action: Option<&str>) -> Route {
        let mut segments: Vec<String> = path
            .split('/')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        if segments.is_empty() {
            return self.index();
        }

        if let Some(last) = segments.last_mut() {
            *last = format!("{}{}", capitalize(last), PAGE_SUFFIX);
        }
        let page = format!("{}.{}", self.base, segments.join("."));

        let action = match action {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => DEFAULT_ACTION.to_string(),
        };

        let route = Route { page, action };
        debug!(page = %route.page, action = %route.action, "route resolved");
        route
    }

    /// The fixed index route.
    pub fn index(&self) -> Route {
        self.fixed(INDEX_PAGE)
    }

    /// The fixed not-found route, used for the single dispatch retry.
    pub fn not_found(&self) -> Route {
        self.fixed(NOT_FOUND_PAGE)
    }

    fn fixed(&self, page: &str) -> Route {
        Route {
            page: format!("{}.{}", self.base, page),
            action: DEFAULT_ACTION.to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
