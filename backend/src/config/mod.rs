//! Application configuration management

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable, one line per event
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite connection URL (`sqlite:./data/recipebook.db`, `sqlite::memory:`)
    pub database_url: String,

    /// Upper bound on pooled connections
    pub database_max_connections: u32,

    /// Token signing secret. When unset, one is generated and kept in the database.
    pub jwt_secret: Option<String>,

    /// How long an issued token stays valid, in seconds
    pub token_lifetime_secs: i64,

    /// Bcrypt cost factor for password hashes
    pub bcrypt_cost: u32,

    /// Largest `first`/`last` accepted on any connection field
    pub max_page_size: i32,

    /// Bootstrap user created at startup when both are set and the user is missing
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,

    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            database_url: "sqlite:./data/recipebook.db".to_string(),
            database_max_connections: 10,
            jwt_secret: None,
            token_lifetime_secs: 7 * 24 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_page_size: 100,
            admin_username: None,
            admin_password: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),

            port: parse_var("PORT", defaults.port)?,

            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),

            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,

            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),

            token_lifetime_secs: parse_var("TOKEN_LIFETIME_SECS", defaults.token_lifetime_secs)?,

            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,

            max_page_size: parse_var("MAX_PAGE_SIZE", defaults.max_page_size)?,

            admin_username: env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),

            log_format: env::var("LOG_FORMAT")
                .map(|v| LogFormat::from_env_value(&v))
                .unwrap_or_default(),
        })
    }
}

/// Parse an optional environment variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
