//! Console configuration
//!
//! `ConsoleConfig` is resolved once at startup from, in order:
//!
//! 1. `plotline.toml` in the working directory, if it exists (keys are the
//!    environment variable names; a key missing from the file falls back to
//!    the environment)
//! 2. the process environment
//!
//! | Key | Required | Default |
//! |---|---|---|
//! | `PLOTLINE_API_BASE_URL` | yes | |
//! | `PLOTLINE_API_TOKEN` | no | |
//! | `PLOTLINE_TIMEOUT_MS` | no | 15000 |

use crate::services::ClientConfig;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_BASE_URL: &str = "PLOTLINE_API_BASE_URL";
pub const ENV_API_TOKEN: &str = "PLOTLINE_API_TOKEN";
pub const ENV_TIMEOUT_MS: &str = "PLOTLINE_TIMEOUT_MS";

pub const DEFAULT_CONFIG_FILE_NAME: &str = "plotline.toml";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {key}")]
    Missing { key: &'static str },

    #[error("setting {key} is empty")]
    Empty { key: &'static str },

    #[error("invalid {key} value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("failed to read config file {path}: {message}")]
    ReadFile { path: String, message: String },

    #[error("failed to parse config file {path}: {message}")]
    ParseFile { path: String, message: String },
}

/// Settings the console needs to reach the registry API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub timeout_ms: u64,
}

impl ConsoleConfig {
    pub fn from_default_sources() -> Result<Self, ConfigError> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE_NAME);
        if config_path.exists() {
            return Self::from_config_file(config_path);
        }
        Self::from_env()
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::ReadFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let table: toml::Table = toml::from_str(&content).map_err(|err| ConfigError::ParseFile {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        Self::from_lookup(|key| {
            table
                .get(key)
                .and_then(toml_value_to_string)
                .or_else(|| std::env::var(key).ok())
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every setting through `getter`
    pub fn from_lookup<F>(mut getter: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_base_url = required(&mut getter, ENV_API_BASE_URL)?;
        let api_token = getter(ENV_API_TOKEN).filter(|value| !value.trim().is_empty());
        let timeout_ms = match getter(ENV_TIMEOUT_MS) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid {
                    key: ENV_TIMEOUT_MS,
                    value,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            api_base_url,
            api_token,
            timeout_ms,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            api_token: self.api_token.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

fn toml_value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(value) => Some(value.clone()),
        toml::Value::Integer(value) => Some(value.to_string()),
        toml::Value::Float(value) => Some(value.to_string()),
        toml::Value::Boolean(value) => Some(value.to_string()),
        _ => None,
    }
}

fn required<F>(getter: &mut F, key: &'static str) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    let value = getter(key).ok_or(ConfigError::Missing { key })?;
    if value.trim().is_empty() {
        return Err(ConfigError::Empty { key });
    }
    Ok(value.trim().to_string())
}
