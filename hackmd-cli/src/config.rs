//! CLI configuration management
//!
//! Resolves the API base URL, the web base URL for note links, and the API
//! token. The config file is read-only from this tool's point of view; it is
//! never created or rewritten.

use hackmd_core::{default_config_path, HackmdError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default HackMD API base URL
pub const DEFAULT_API_URL: &str = "https://api.hackmd.io/v1";

/// Default base for note view links
pub const DEFAULT_WEB_URL: &str = "https://hackmd.io";

pub const TOKEN_ENV: &str = "HACKMD_API_TOKEN";
pub const API_URL_ENV: &str = "HACKMD_API_URL";
pub const WEB_URL_ENV: &str = "HACKMD_WEB_URL";

/// Resolved CLI configuration
#[derive(Clone, PartialEq)]
pub struct CliConfig {
    /// API base URL, without trailing slash
    pub api_url: String,

    /// Web base URL used to build note links
    pub web_url: String,

    /// Bearer token for every API call
    pub api_token: String,
}

// Keep the token out of debug logs
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_url", &self.api_url)
            .field("web_url", &self.web_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl CliConfig {
    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Contents of `cli.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub web_url: Option<String>,
}

impl FileConfig {
    /// Load a config file; a missing file yields `None`
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            HackmdError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = toml::from_str(&content).map_err(|e| {
            HackmdError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        info!(path = %path.display(), "loaded config file");
        Ok(Some(config))
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables
/// 4. CLI arguments
///
/// Apply the layers in that order; each one overwrites what came before.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_url: Option<String>,
    web_url: Option<String>,
    api_token: Option<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API base URL (with validation)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Self::validate_url("API URL", &url)?;
        self.api_url = Some(url);
        Ok(self)
    }

    /// Set web base URL (with validation)
    pub fn with_web_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Self::validate_url("Web URL", &url)?;
        self.web_url = Some(url);
        Ok(self)
    }

    /// Set API token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Load values from a config file.
    ///
    /// `None` means the default location, which may be absent. A path the
    /// user named must exist. Unreadable or malformed files are errors.
    pub fn with_config_file(self, path: Option<&Path>) -> Result<Self> {
        let explicit = path.is_some();
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let Some(file) = FileConfig::load(&path)? else {
            if explicit {
                return Err(HackmdError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(self);
        };

        let mut builder = self;
        if let Some(url) = file.api_url {
            builder = builder.with_api_url(url)?;
        }
        if let Some(url) = file.web_url {
            builder = builder.with_web_url(url)?;
        }
        Ok(builder)
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if let Some(previous) = self.api_url.as_deref().filter(|p| *p != url) {
                warn!(
                    previous,
                    env = API_URL_ENV,
                    "environment overrides API URL from config file"
                );
            }
            self = self.with_api_url(url)?;
        }

        if let Ok(url) = std::env::var(WEB_URL_ENV) {
            if let Some(previous) = self.web_url.as_deref().filter(|p| *p != url) {
                warn!(
                    previous,
                    env = WEB_URL_ENV,
                    "environment overrides web URL from config file"
                );
            }
            self = self.with_web_url(url)?;
        }

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            self.api_token = Some(token);
        }

        Ok(self)
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let api_token = self
            .api_token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(HackmdError::MissingToken)?;

        let api_url = self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let web_url = self.web_url.unwrap_or_else(|| DEFAULT_WEB_URL.to_string());

        Self::validate_url("API URL", &api_url)?;
        Self::validate_url("Web URL", &web_url)?;

        Ok(CliConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            web_url: web_url.trim_end_matches('/').to_string(),
            api_token,
        })
    }

    /// Validate URL format
    fn validate_url(what: &str, url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(HackmdError::Config(format!("{} cannot be empty", what)));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(HackmdError::Config(format!(
                "{} must start with http:// or https://",
                what
            )));
        }

        Ok(())
    }
}
