//! HTTP front controller: one axum fallback service accepting any path.

use crate::config::AppConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher, Disposition};
use crate::registry::PageRegistry;
use crate::request::RequestContext;
use crate::route::RouteResolver;
use crate::session::{SessionId, SessionStore};
use crate::templates::{DEFAULT_LOCALE, DirSource, TemplateError, TemplateResolver, negotiate_locale};
use crate::view::View;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Largest accepted urlencoded form body.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Session cookie name.
const SESSION_COOKIE: &str = "sid";

/// Everything one request needs: dispatcher, template chain, session store.
#[derive(Debug)]
pub struct App {
    dispatcher: Dispatcher,
    templates: TemplateResolver,
    sessions: SessionStore,
}

impl App {
    /// Wires the app from configuration and a built registry.
    #[instrument(skip(registry))]
    pub fn new(config: &AppConfig, registry: PageRegistry) -> Self {
        let resolver = RouteResolver::new(config.base_namespace().clone());

        let mut templates = TemplateResolver::new();
        if let Some(source) = DirSource::open(config.source_templates(), config.template_ext(), true)
        {
            templates.push(Box::new(source));
        }
        if let Some(target) =
            DirSource::open(config.target_templates(), config.template_ext(), false)
        {
            templates.push(Box::new(target));
        }
        info!(sources = templates.sources(), "template chain ready");

        Self {
            dispatcher: Dispatcher::new(resolver, registry),
            templates,
            sessions: SessionStore::new(),
        }
    }

    /// The session store, exposed for scenario tests.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Builds the router: every path and method goes through the front controller.
pub fn router(app: Arc<App>) -> Router {
    Router::new().fallback(front).with_state(app)
}

/// Handles one request end to end: build the context, resolve the route,
/// dispatch with the NotFound retry, then render or redirect.
#[instrument(skip_all, fields(method = %req.method(), path = %req.uri().path()))]
async fn front(State(app): State<Arc<App>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    let mut params: Vec<(String, String)> = Vec::new();
    if let Some(query) = parts.uri.query() {
        params.extend(url::form_urlencoded::parse(query.as_bytes()).into_owned());
    }
    if is_urlencoded_form(&parts.headers) {
        match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
            Ok(bytes) => params.extend(url::form_urlencoded::parse(&bytes).into_owned()),
            Err(e) => warn!(error = %e, "can't read form body, parameters dropped"),
        }
    }

    let (session_id, fresh) = match cookie_session(&parts.headers) {
        Some(id) => (id, false),
        None => (app.sessions.fresh_id(), true),
    };
    let ctx = RequestContext::new(&path, params, app.sessions.clone(), session_id.clone());

    let route = app
        .dispatcher
        .resolver()
        .resolve(&path, ctx.param("action"));

    let response = match app.dispatcher.handle_with_retry(&route, &ctx) {
        Ok(DispatchOutcome {
            page_name,
            disposition: Disposition::Rendered(view),
        }) => match render_page(&app, &ctx, &page_name, &view) {
            Ok(html) => html_response(html),
            Err(e) => {
                error!(error = %e, page = %page_name, "template resolution failed");
                server_error()
            }
        },
        Ok(DispatchOutcome {
            disposition: Disposition::Redirected(target),
            ..
        }) => {
            debug!(target = %target, "redirecting");
            redirect_response(&target)
        }
        Err(e) => {
            error!(error = %e, "request failed");
            server_error()
        }
    };

    attach_session_cookie(response, fresh.then_some(session_id))
}

/// Picks and renders the page's template: negotiated locale first, then one
/// silent retry with the default locale before giving up.
fn render_page(
    app: &App,
    ctx: &RequestContext,
    page_name: &str,
    view: &View,
) -> Result<String, TemplateError> {
    let locale = negotiate_locale(ctx);
    let template = match app.templates.resolve(page_name, &locale) {
        Ok(template) => template,
        Err(_) if locale != DEFAULT_LOCALE => app.templates.resolve(page_name, DEFAULT_LOCALE)?,
        Err(e) => return Err(e),
    };
    template.render(view)
}

fn is_urlencoded_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

fn cookie_session(headers: &HeaderMap) -> Option<SessionId> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .find_map(|pair| pair.trim().strip_prefix("sid="))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn html_response(html: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response()
}

fn redirect_response(target: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, target.to_string())],
        String::new(),
    )
        .into_response()
}

fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "<html><body><h1>Internal Server Error</h1></body></html>".to_string(),
    )
        .into_response()
}

fn attach_session_cookie(mut response: Response, fresh: Option<SessionId>) -> Response {
    if let Some(id) = fresh {
        let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, id);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(error = %e, "can't set session cookie"),
        }
    }
    response
}
