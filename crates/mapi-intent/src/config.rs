//! Keyword collaborator configuration.
//!
//! Stored in TOML format. When no file is given, the default location is
//! tried:
//! - Linux: `~/.config/mapi/intent.toml`
//! - macOS: `~/Library/Application Support/mapi/intent.toml`
//! - Windows: `%APPDATA%\mapi\intent.toml`
//!
//! A missing default file is not an error; every field has a default.

use mapi_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MAX_TIMEOUT_SECS: u64 = 600;

/// Settings for the LLM keyword collaborator.
///
/// # Examples
///
/// ```toml
/// model = "claude-3-5-haiku-20241022"
/// max_tokens = 200
/// api_url = "https://api.anthropic.com/v1/messages"
/// api_key_env = "ANTHROPIC_API_KEY"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntentConfig {
    /// Model used for keyword generation
    pub model: String,

    /// Maximum tokens in the model response
    pub max_tokens: u32,

    /// Messages API endpoint
    pub api_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 200,
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            timeout_secs: 30,
        }
    }
}

impl IntentConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the text is not valid TOML for
    /// this structure or fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapi_intent::IntentConfig;
    ///
    /// let config = IntentConfig::from_toml("max_tokens = 64").unwrap();
    /// assert_eq!(config.max_tokens, 64);
    /// assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("invalid intent configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        debug!(path = %path.display(), "loaded intent configuration");
        Self::from_toml(&text)
    }

    /// Loads `path` when given, else the default file if it exists, else
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a file exists but is invalid.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if a value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::ConfigError {
                message: "model must not be empty".to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(Error::ConfigError {
                message: "max_tokens must be greater than 0".to_string(),
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::ConfigError {
                message: format!("timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"),
            });
        }
        Ok(())
    }

    /// Reads the API key from the configured environment variable.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Default configuration file location.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mapi").join("intent.toml"))
}
