//! Plugin configuration.
//!
//! Built from defaults with `with_*` setters, or from `ORBDECK_*`
//! environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::models::settings::parse_key_combo;

pub const ENV_MODE: &str = "ORBDECK_MODE";
pub const ENV_LISTEN: &str = "ORBDECK_LISTEN";
pub const ENV_SOURCE_URL: &str = "ORBDECK_SOURCE_URL";
pub const ENV_POLL_MS: &str = "ORBDECK_POLL_MS";
pub const ENV_TIMEOUT_MS: &str = "ORBDECK_TIMEOUT_MS";
pub const ENV_ASSETS: &str = "ORBDECK_ASSETS";
pub const ENV_KEY_COMMAND: &str = "ORBDECK_KEY_COMMAND";
pub const ENV_MAP_KEYS: &str = "ORBDECK_MAP_KEYS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// How game state reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// The game client POSTs snapshots to a local endpoint.
    #[default]
    Push,
    /// The plugin polls the game client while buttons are visible.
    Pull,
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "push" => Ok(UpdateMode::Push),
            "pull" | "poll" => Ok(UpdateMode::Pull),
            other => Err(format!("expected `push` or `pull`, got `{}`", other)),
        }
    }
}

/// Runtime configuration for the plugin.
///
/// # Example
///
/// ```ignore
/// use orbdeck::config::{PluginConfig, UpdateMode};
///
/// let config = PluginConfig::default()
///     .with_update_mode(UpdateMode::Pull)
///     .with_poll_interval(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PluginConfig {
    pub update_mode: UpdateMode,
    /// Address of the push endpoint.
    pub listen_addr: SocketAddr,
    /// Game client state URL polled in pull mode.
    pub source_url: String,
    pub poll_interval: Duration,
    /// Upper bound for one pull fetch.
    pub fetch_timeout: Duration,
    pub assets_dir: PathBuf,
    /// Program used to inject key presses.
    pub key_command: String,
    /// Combination sent by the map toggle button.
    pub map_keys: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::Push,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8085)),
            source_url: "http://127.0.0.1:8080/state".to_string(),
            poll_interval: Duration::from_millis(200),
            fetch_timeout: Duration::from_millis(1000),
            assets_dir: PathBuf::from("assets"),
            key_command: "xdotool".to_string(),
            map_keys: vec!["ctrl".to_string(), "m".to_string()],
        }
    }
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn with_listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = addr;
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_key_command(mut self, command: impl Into<String>) -> Self {
        self.key_command = command.into();
        self
    }

    pub fn with_map_keys(mut self, keys: Vec<String>) -> Self {
        self.map_keys = keys;
        self
    }

    /// Defaults overridden by any `ORBDECK_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_MODE) {
            config.update_mode = value
                .parse()
                .map_err(|reason: String| ConfigError::invalid(ENV_MODE, &value, reason))?;
        }
        if let Some(value) = get(ENV_LISTEN) {
            config.listen_addr = value
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| {
                    ConfigError::invalid(ENV_LISTEN, &value, e.to_string())
                })?;
        }
        if let Some(value) = get(ENV_SOURCE_URL) {
            let url = value.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    ENV_SOURCE_URL,
                    &value,
                    "expected an http(s) URL",
                ));
            }
            config.source_url = url.to_string();
        }
        if let Some(value) = get(ENV_POLL_MS) {
            config.poll_interval = parse_millis(ENV_POLL_MS, &value)?;
        }
        if let Some(value) = get(ENV_TIMEOUT_MS) {
            config.fetch_timeout = parse_millis(ENV_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = get(ENV_ASSETS) {
            config.assets_dir = PathBuf::from(value.trim());
        }
        if let Some(value) = get(ENV_KEY_COMMAND) {
            config.key_command = value.trim().to_string();
        }
        if let Some(value) = get(ENV_MAP_KEYS) {
            let keys = parse_key_combo(&value);
            if keys.is_empty() {
                return Err(ConfigError::invalid(ENV_MAP_KEYS, &value, "no keys given"));
            }
            config.map_keys = keys;
        }

        Ok(config)
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid(var, value, "must be greater than zero")),
        Ok(ms) => Ok(Duration::from_millis(ms)),
        Err(e) => Err(ConfigError::invalid(var, value, e.to_string())),
    }
}
