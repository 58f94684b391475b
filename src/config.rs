//! Application configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Server configuration, loaded from a TOML file with CLI overrides.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Namespace page identifiers are rooted under.
    #[serde(default = "default_namespace")]
    base_namespace: String,

    /// Live/editable template directory, checked first, rendered in debug
    /// mode. Skipped when it does not exist.
    #[serde(default = "default_source_templates")]
    source_templates: PathBuf,

    /// Deployed template directory, the fallback source.
    #[serde(default = "default_target_templates")]
    target_templates: PathBuf,

    /// Template file extension.
    #[serde(default = "default_template_ext")]
    template_ext: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_namespace() -> String {
    "pages".to_string()
}

fn default_source_templates() -> PathBuf {
    PathBuf::from("templates")
}

fn default_target_templates() -> PathBuf {
    PathBuf::from("dist/templates")
}

fn default_template_ext() -> String {
    "html".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_namespace: default_namespace(),
            source_templates: default_source_templates(),
            target_templates: default_target_templates(),
            template_ext: default_template_ext(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML, falling back to defaults when the file
    /// does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("config file not found, using defaults");
            return Ok(Self::default());
        }
        debug!("loading config from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("can't read config file: {}", e)))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("can't parse config: {}", e)))?;
        info!(host = %config.host, port = config.port, "config loaded");
        Ok(config)
    }

    /// Overrides the bind host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the bind port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides both template directories. Used by tests.
    pub fn with_template_dirs(
        mut self,
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
    ) -> Self {
        self.source_templates = source.into();
        self.target_templates = target.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error with caller location tracking.
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
