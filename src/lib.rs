//! frontpage - a minimal page-controller web server.
//!
//! An HTTP front controller maps any request path to a registered page,
//! resolves an action by name from an explicit registry, invokes it against a
//! per-request view and a per-session store, and renders a template chosen by
//! page name and negotiated language with a two-source fallback chain.
//!
//! # Architecture
//!
//! - **Route**: path and `action` parameter become a (page id, action) pair
//! - **Registry**: statically typed actions registered per page; duplicate
//!   names fail at startup
//! - **Dispatch**: registry lookup, invocation, and the single NotFound retry
//! - **Templates**: ordered directory sources with locale-aware lookup
//! - **Pages**: the index, not-found, and tic-tac-toe pages

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dispatch;
mod games;
mod pages;
mod registry;
mod request;
mod route;
mod server;
mod session;
mod templates;
mod view;

pub use config::{AppConfig, ConfigError};

pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher, Disposition};

pub use registry::{
    ActionError, ActionFn, ActionOutcome, ActionResult, ActionSet, PageRegistry, PageSpec,
    RegistryError,
};

pub use request::RequestContext;

pub use route::{DEFAULT_ACTION, Route, RouteResolver};

pub use server::{App, router};

pub use session::{SessionId, SessionState, SessionStore};

pub use templates::{
    DEFAULT_LOCALE, DirSource, Template, TemplateError, TemplateResolver, TemplateSource,
    negotiate_locale,
};

pub use view::View;

pub use games::tictactoe::{Mark, OutOfBounds, Phase, Square, State};

pub use pages::registry as page_registry;
