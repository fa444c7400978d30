//! Database connection settings.
//!
//! Every setting is taken from a flag or its environment variable. A
//! missing or malformed value is a [`ConfigError`] raised before any phase
//! runs.

use clap::Args;
use thiserror::Error;
use tokio_postgres::config::SslMode;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid DB_PORT {0:?}: expected a port number")]
    InvalidPort(String),

    #[error("invalid DB_SSLMODE {0:?}: expected disable, prefer or require")]
    InvalidSslMode(String),
}

/// PostgreSQL connection options
#[derive(Args, Clone, Debug, Default)]
pub struct DatabaseArgs {
    /// Database host
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "DB_PORT")]
    pub db_port: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// SSL mode (disable, prefer or require)
    #[arg(long, env = "DB_SSLMODE")]
    pub db_sslmode: Option<String>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

pub fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value.to_string()))
}

pub fn parse_ssl_mode(value: &str) -> Result<SslMode, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        _ => Err(ConfigError::InvalidSslMode(value.to_string())),
    }
}

impl DatabaseArgs {
    /// Validate every setting and build the driver configuration.
    pub fn to_pg_config(&self) -> Result<tokio_postgres::Config, ConfigError> {
        let host = required(&self.db_host, "DB_HOST")?;
        let port = parse_port(required(&self.db_port, "DB_PORT")?)?;
        let user = required(&self.db_user, "DB_USER")?;
        // An empty password is allowed; an unset one is not.
        let password = self
            .db_password
            .as_deref()
            .ok_or(ConfigError::Missing("DB_PASSWORD"))?;
        let name = required(&self.db_name, "DB_NAME")?;
        let ssl_mode = parse_ssl_mode(required(&self.db_sslmode, "DB_SSLMODE")?)?;

        let mut config = tokio_postgres::Config::new();
        config
            .host(host)
            .port(port)
            .user(user)
            .password(password)
            .dbname(name)
            .ssl_mode(ssl_mode);
        Ok(config)
    }

    /// `host:port/name` for log lines; never includes the password.
    pub fn display_target(&self) -> String {
        format!(
            "{}:{}/{}",
            self.db_host.as_deref().unwrap_or("?"),
            self.db_port.as_deref().unwrap_or("?"),
            self.db_name.as_deref().unwrap_or("?")
        )
    }
}
