//! Application settings loaded from `config.toml` and the environment.
//!
//! Business defaults (starting balance, tier, history size, token lifetime) come from
//! an optional TOML file; secrets and deployment knobs come from environment
//! variables so they can be supplied through `.env`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

const DEFAULT_JWT_SECRET: &str = "secret";
const DEFAULT_PORT: u16 = 3000;

/// Upper bound for `starting_points`, far below where balances could overflow.
pub const MAX_STARTING_POINTS: i64 = 1_000_000_000;

/// Business settings read from `config.toml`. Every field has a default.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Points credited to every new account
    pub starting_points: i64,
    /// Tier assigned to every new account
    pub default_tier: String,
    /// Entries returned by the recent-history endpoint
    pub history_limit: u64,
    /// Lifetime of issued login tokens, in hours
    pub token_ttl_hours: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_points: 15_420,
            default_tier: "Gold".to_string(),
            history_limit: crate::core::history::DEFAULT_HISTORY_LIMIT,
            token_ttl_hours: 24,
        }
    }
}

impl Settings {
    fn validate(self) -> Result<Self> {
        if !(0..=MAX_STARTING_POINTS).contains(&self.starting_points) {
            return Err(Error::Config {
                message: format!(
                    "starting_points must be between 0 and {MAX_STARTING_POINTS}, got {}",
                    self.starting_points
                ),
            });
        }
        if self.history_limit == 0 {
            return Err(Error::Config {
                message: "history_limit must be at least 1".to_string(),
            });
        }
        if self.token_ttl_hours <= 0 {
            return Err(Error::Config {
                message: format!("token_ttl_hours must be positive, got {}", self.token_ttl_hours),
            });
        }
        Ok(self)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is malformed or a value is out of range.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    settings.validate()
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_settings(&contents)
}

/// Loads `./config.toml` if present, otherwise the built-in defaults.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_settings(path)
    } else {
        debug!("No config.toml found, using default settings");
        Ok(Settings::default())
    }
}

/// Secret used to sign login tokens, from `JWT_SECRET`.
#[must_use]
pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET not set, falling back to the development secret");
        DEFAULT_JWT_SECRET.to_string()
    })
}

/// Port the HTTP listener binds to, from `PORT`.
pub fn listen_port() -> Result<u16> {
    match std::env::var("PORT") {
        Ok(raw) => raw.parse().map_err(|e| Error::Config {
            message: format!("PORT must be a port number, got {raw:?}: {e}"),
        }),
        Err(_) => Ok(DEFAULT_PORT),
    }
}
