//! Client configuration
//!
//! ## Configuration Resolution
//!
//! Config is resolved in layers, later layers winning:
//! 1. Built-in defaults
//! 2. TOML file (explicit path, else ~/.config/courtside/config.toml if present)
//! 3. Environment variables (`COURTSIDE_API_URL`, `COURTSIDE_SESSION`)
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ```toml
//! base_url = "https://admin.example.com/api"
//! session = "connect.sid=..."
//! page_limit = 50
//! timeout_secs = 30
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::query::DEFAULT_PAGE_LIMIT;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "COURTSIDE_API_URL";
/// Environment variable carrying the session cookie
pub const SESSION_ENV: &str = "COURTSIDE_SESSION";

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Admin API base URL (endpoints are appended, e.g. `/admin/logs`)
    pub base_url: String,
    /// Raw `Cookie` header value for the admin session
    pub session: Option<String>,
    /// Entries per page, fixed for the session
    pub page_limit: u32,
    /// Request timeout; `None` keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            session: None,
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout_secs: None,
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    base_url: Option<String>,
    session: Option<String>,
    page_limit: Option<u32>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load defaults, then the config file, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let file = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(file) = file {
            let content = fs::read_to_string(&file).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", file.display(), e))
            })?;
            config.apply_toml(&content)?;
        }

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the current values
    pub fn apply_toml(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(url) = raw.base_url {
            self.base_url = url;
        }
        if let Some(session) = raw.session {
            self.session = Some(session);
        }
        if let Some(limit) = raw.page_limit {
            self.page_limit = limit;
        }
        if let Some(timeout) = raw.timeout_secs {
            self.timeout_secs = Some(timeout);
        }
        Ok(())
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(session) = lookup(SESSION_ENV).filter(|v| !v.trim().is_empty()) {
            self.session = Some(session);
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }
        if self.page_limit == 0 {
            return Err(Error::Config("page_limit must be at least 1".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("courtside").join("config.toml"))
}
