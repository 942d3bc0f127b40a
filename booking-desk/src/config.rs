use std::{env, fmt::Display, str::FromStr};

use log::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected text or json, got {other:?}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://bespoke_booking.db".to_string(),
            max_connections: 5,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reads the environment, falling back to the defaults for anything
    /// missing or unparsable.
    ///
    /// - DATABASE_URL (default "sqlite://bespoke_booking.db")
    /// - DB_MAX_CONNECTIONS (default 5)
    /// - LOG_FORMAT: text | json (default text)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env_string("DATABASE_URL", &defaults.database_url),
            max_connections: env_parse("DB_MAX_CONNECTIONS", defaults.max_connections),
            log_format: env_parse("LOG_FORMAT", defaults.log_format),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default");
            default
        }),
        Err(_) => default,
    }
}
