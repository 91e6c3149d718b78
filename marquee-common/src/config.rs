//! Configuration loading and API endpoint resolution

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Compiled default for the content API endpoint
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

/// Environment variable consulted when no CLI argument is given
pub const API_URL_ENV_VAR: &str = "MARQUEE_API_URL";

/// Resolved runtime configuration, built once at application start and
/// injected into the client/store context.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
}

/// Optional TOML config file shape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api_base_url: Option<String>,
}

impl TomlConfig {
    /// Load a TOML config file. A missing file is not an error; it
    /// degrades to defaults with a warning so startup never blocks on
    /// configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }
}

/// Resolve the API base URL following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`MARQUEE_API_URL`)
/// 3. TOML config file
/// 4. Compiled default (fallback)
pub fn resolve_api_base_url(cli_arg: Option<&str>, file: &TomlConfig) -> String {
    if let Some(url) = cli_arg {
        return url.to_string();
    }
    if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
        if !url.is_empty() {
            return url;
        }
    }
    if let Some(url) = &file.api_base_url {
        return url.clone();
    }
    DEFAULT_API_BASE_URL.to_string()
}

impl Config {
    /// Build the runtime configuration from an optional CLI argument and
    /// an optional config file path.
    pub fn resolve(cli_arg: Option<&str>, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self {
            api_base_url: resolve_api_base_url(cli_arg, &file),
        })
    }
}
