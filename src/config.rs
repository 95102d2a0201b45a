//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Environment variable holding the remove.bg API key.
pub const API_KEY_ENV: &str = "REMOVEBG_API_KEY";

/// Timeout used when neither the CLI nor the config file sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Default values used when CLI flags are absent.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// remove.bg API key.
    pub removebg: Option<String>,
}

/// Default parameter values from config file.
#[derive(Debug, Deserialize)]
pub struct DefaultsConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the remove.bg API key, preferring the environment variable.
    ///
    /// Blank keys are treated as absent.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        let non_blank = |k: String| Some(k.trim().to_string()).filter(|k| !k.is_empty());
        env_value.and_then(non_blank).or_else(|| self.keys.removebg.clone().and_then(non_blank))
    }

    /// Resolve the request timeout, letting an explicit CLI value win.
    #[must_use]
    pub fn timeout(&self, cli_override: Option<u64>) -> Duration {
        Duration::from_secs(cli_override.unwrap_or(self.defaults.timeout_secs))
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `REMOVEBG_CONFIG` environment variable
/// 3. `~/.config/removebg/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("REMOVEBG_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/removebg/config.toml")
    } else {
        PathBuf::from("removebg.toml")
    }
}
