//! Configuration for subgrab.
//!
//! Read from `$XDG_CONFIG_HOME/subgrab/config.toml` (or `~/.config/subgrab/config.toml`).
//! Every key is optional; a missing file yields `Config::default()`. The API key
//! comes from `OPENSUBTITLES_API_KEY` first and the file's `api_key` second.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::client::{default_user_agent, ApiConfig, API_KEY_ENV, DEFAULT_BASE_URL};
use crate::error::ConfigError;

/// Languages offered by the language selector when the config lists none.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ru", "ko", "ja"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme name: `dark`, `light`, or `catppuccin-mocha`.
    pub theme: Option<String>,
    /// Language selected at startup.
    pub language: Option<String>,
    /// Languages offered by the selector, in cycle order.
    pub languages: Option<Vec<String>>,
    pub download_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    /// `tracing` filter directive; enables file logging when set.
    pub log_level: Option<String>,
}

/// Returns the path to the subgrab config file.
///
/// Prefers `$XDG_CONFIG_HOME/subgrab/config.toml`; falls back to
/// `~/.config/subgrab/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("subgrab").join("config.toml")
}

impl Config {
    /// Loads the config at `path`. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or("dark")
    }

    pub fn languages(&self) -> Vec<String> {
        match &self.languages {
            Some(list) if !list.is_empty() => list.clone(),
            _ => DEFAULT_LANGUAGES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Index into [`Config::languages`] of the startup language (0 if unknown).
    pub fn initial_language_index(&self) -> usize {
        let wanted = self.language.as_deref().unwrap_or("en");
        self.languages()
            .iter()
            .position(|l| l == wanted)
            .unwrap_or(0)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(crate::session::default_download_dir)
    }

    /// Resolves the API key: environment variable first, then the config file.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            api_key: self.api_key(),
            user_agent: default_user_agent(),
        }
    }
}
