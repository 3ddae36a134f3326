//! Client configuration.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file still yields a usable configuration. Environment
//! variables override the file.

use odonto_core::{OdontoError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::OdontoPaths;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "ODONTO_API_URL";
/// Overrides the configuration file location.
pub const ENV_CONFIG: &str = "ODONTO_CONFIG";
/// API key for the prompt based summarizer.
pub const ENV_ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

const DEFAULT_BASE_URL: &str = "http://localhost:3333/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SUMMARY_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub summarizer: SummarizerConfig,
    pub users: UsersConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Where the session file lives; defaults to the platform data dir.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerProvider {
    /// Prompt based text generation over HTTP
    Anthropic,
    /// Offline summary built locally, no network involved
    #[default]
    Canned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub provider: SummarizerProvider,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Falls back to `ANTHROPIC_API_KEY` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: SummarizerProvider::default(),
            model: DEFAULT_SUMMARY_MODEL.to_string(),
            max_tokens: 1024,
            timeout_secs: 120,
            api_key: None,
        }
    }
}

/// Accounts the user management view refuses to delete.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    pub protected_emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Also write a daily rolling log file under the logs dir
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: true,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from `path`, `ODONTO_CONFIG`, or the default
    /// location, in that order, then applies environment overrides.
    pub fn load(path: Option<&Path>, paths: &OdontoPaths) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(ENV_CONFIG) {
                Some(env_path) => PathBuf::from(env_path),
                None => paths
                    .config_file()
                    .map_err(|e| OdontoError::config(e.to_string()))?,
            },
        };

        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a config file; a missing or empty file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from `lookup` (the process environment in production).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if self.summarizer.api_key.is_none() {
            self.summarizer.api_key = lookup(ENV_ANTHROPIC_API_KEY).filter(|v| !v.trim().is_empty());
        }
    }

    fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(OdontoError::config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        Ok(())
    }

    /// Session storage directory: the configured one or the platform data dir.
    pub fn storage_dir(&self, paths: &OdontoPaths) -> Result<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => paths
                .data_dir()
                .map_err(|e| OdontoError::config(e.to_string())),
        }
    }
}
