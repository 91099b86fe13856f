//! Environment-driven configuration, read once at startup.

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct Config {
    /// Port the REST service binds to.
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Round duration for new game sessions, in seconds.
    pub round_seconds: u32,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self {
            port: try_load("MATCH_PORT", "3000"),
            database_url: try_load("MATCH_DATABASE_URL", "sqlite:colleagues.sqlite?mode=rwc"),
            round_seconds: try_load("MATCH_ROUND_SECONDS", "35"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
