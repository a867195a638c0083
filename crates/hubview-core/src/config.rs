//! Configuration management for hubview.
//!
//! Loads configuration from ${HUBVIEW_HOME}/config.toml with sensible defaults,
//! then applies environment overrides.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "HUBVIEW_BASE_URL";

/// Environment variable overriding `session_cookie`.
pub const SESSION_COOKIE_ENV: &str = "HUBVIEW_SESSION_COOKIE";

pub mod paths {
    //! Path resolution for hubview configuration and data directories.
    //!
    //! HUBVIEW_HOME resolution order:
    //! 1. HUBVIEW_HOME environment variable (if set)
    //! 2. ~/.config/hubview (default)
    //! 3. ./.hubview when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the hubview home directory.
    pub fn hubview_home() -> PathBuf {
        if let Ok(home) = std::env::var("HUBVIEW_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".hubview"),
            |h| h.join(".config").join("hubview"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        hubview_home().join("config.toml")
    }

    /// Returns the directory where the TUI writes its log files.
    pub fn logs_dir() -> PathBuf {
        hubview_home().join("logs")
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the OAuth demo backend.
    pub base_url: String,
    /// Name of the backend's session cookie.
    pub session_cookie_name: String,
    /// Session cookie value attached to every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            session_cookie_name: Self::DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_cookie: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    pub const DEFAULT_SESSION_COOKIE_NAME: &str = "gh_demo_session";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

    /// Loads configuration from the default path and applies environment overrides.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies overrides from a variable lookup (the process environment in `load`).
    ///
    /// Empty values are treated as unset.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(cookie) = lookup(SESSION_COOKIE_ENV) {
            self.session_cookie = Some(cookie);
        }
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Parses `base_url`, normalised to end with `/` so endpoint paths join beneath it.
    ///
    /// # Errors
    /// Returns an error if the URL is malformed or not http(s).
    pub fn base_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())
            .with_context(|| format!("Invalid base URL: {}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Base URL must use http or https: {}", self.base_url);
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Writes the commented default config to `path`.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
