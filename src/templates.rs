//! Template sources, locale negotiation, and rendering.
//!
//! Templates live in an ordered chain of sources: the live source directory
//! (present during development, rendered in debug mode) and the deployed
//! directory. Each source answers found or not-found; the first hit wins.

use crate::request::RequestContext;
use crate::view::View;
use derive_more::{Display, Error};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Locale used when no valid language is supplied or stored.
pub const DEFAULT_LOCALE: &str = "en";

/// Template failure taxonomy.
#[derive(Debug, Clone, Display, Error)]
pub enum TemplateError {
    /// No source holds the template.
    #[display("can't find template '{}'", name)]
    NotFound {
        /// Requested template name.
        name: String,
    },
    /// A source exists but could not be read.
    #[display("can't load template '{}': {}", name, message)]
    Io {
        /// Requested template name.
        name: String,
        /// Underlying IO failure.
        message: String,
    },
    /// The template referenced a view value that does not exist.
    #[display("can't render template: {}", message)]
    Render {
        /// What went wrong.
        message: String,
    },
}

/// A loaded template, ready to render.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    debug: bool,
}

impl Template {
    /// Wraps raw template text. In debug mode render faults are written into
    /// the output for visibility instead of failing the request.
    pub fn new(text: impl Into<String>, debug: bool) -> Self {
        Self {
            text: text.into(),
            debug,
        }
    }

    /// Substitutes `{{dotted.path}}` placeholders from the view, escaping
    /// values for HTML.
    pub fn render(&self, view: &View) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                // Unterminated marker: emit literally.
                out.push_str(&rest[start..]);
                return Ok(out);
            };
            let key = after[..end].trim();
            match view.get_path(key) {
                Some(value) => out.push_str(&escape(&value_text(value))),
                None if self.debug => {
                    out.push_str(&format!("<!-- unresolved view key: {} -->", key));
                }
                None => {
                    return Err(TemplateError::Render {
                        message: format!("view has no value for '{}'", key),
                    });
                }
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// A provider of templates by (name, locale).
pub trait TemplateSource: Send + Sync + std::fmt::Debug {
    /// Loads the template, or `None` if this source has no mapping for it.
    /// Only IO trouble is an error.
    fn load(&self, name: &str, locale: &str) -> Result<Option<Template>, TemplateError>;
}

/// Directory-backed template source.
///
/// Tries the locale-qualified file first (`Name_en.html`), then the plain one
/// (`Name.html`).
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    ext: String,
    debug: bool,
}

impl DirSource {
    /// Opens a source over `root`, or `None` if `root` is not a directory.
    pub fn open(root: impl AsRef<Path>, ext: impl Into<String>, debug: bool) -> Option<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            warn!(root = %root.display(), "template directory missing, source disabled");
            return None;
        }
        Some(Self {
            root,
            ext: ext.into(),
            debug,
        })
    }
}

impl TemplateSource for DirSource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, name: &str, locale: &str) -> Result<Option<Template>, TemplateError> {
        let candidates = [
            format!("{}_{}.{}", name, locale, self.ext),
            format!("{}.{}", name, self.ext),
        ];
        for candidate in candidates {
            let path = self.root.join(&candidate);
            if !path.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&path).map_err(|e| TemplateError::Io {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            debug!(file = %path.display(), "template loaded");
            return Ok(Some(Template::new(text, self.debug)));
        }
        Ok(None)
    }
}

/// Ordered chain of template sources.
#[derive(Debug, Default)]
pub struct TemplateResolver {
    sources: Vec<Box<dyn TemplateSource>>,
}

impl TemplateResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source. Earlier sources take priority.
    pub fn push(&mut self, source: Box<dyn TemplateSource>) {
        self.sources.push(source);
    }

    /// Number of active sources.
    pub fn sources(&self) -> usize {
        self.sources.len()
    }

    /// Resolves (name, locale) against the chain; the first source with a
    /// mapping wins.
    #[instrument(skip(self))]
    pub fn resolve(&self, name: &str, locale: &str) -> Result<Template, TemplateError> {
        for source in &self.sources {
            if let Some(template) = source.load(name, locale)? {
                return Ok(template);
            }
        }
        Err(TemplateError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Negotiates the request's locale and persists an accepted language.
///
/// Preference order: the `lang` parameter, then the session's stored language,
/// then [`DEFAULT_LOCALE`]. A language counts as accepted only if its first
/// two characters are lowercase ASCII letters; acceptance stores it in the
/// session, anything else silently falls back to the default.
#[instrument(skip(ctx))]
pub fn negotiate_locale(ctx: &RequestContext) -> String {
    let supplied = ctx
        .param("lang")
        .map(str::to_string)
        .or_else(|| ctx.with_session(|s| s.lang.clone()));

    if let Some(lang) = supplied {
        if accepted(&lang) {
            ctx.with_session(|s| s.lang = Some(lang.clone()));
            return lang.chars().take(2).collect();
        }
        debug!(lang = %lang, "language rejected, using default locale");
    }
    DEFAULT_LOCALE.to_string()
}

fn accepted(lang: &str) -> bool {
    let mut chars = lang.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(a), Some(b)) if a.is_ascii_lowercase() && b.is_ascii_lowercase()
    )
}
