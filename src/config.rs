use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://nautical.db";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub database_url_set: bool,
    pub database_name: Option<String>,
    pub max_connections: u32,
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let explicit_url = non_empty("DATABASE_URL");
        let database_url_set = explicit_url.is_some();
        let database_url = explicit_url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = match non_empty("HOST") {
            Some(v) => parse("HOST", v)?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match non_empty("PORT") {
            Some(v) => parse("PORT", v)?,
            None => DEFAULT_PORT,
        };
        let max_connections = match non_empty("DB_MAX_CONNECTIONS") {
            Some(v) => parse::<u32>("DB_MAX_CONNECTIONS", v.clone())
                .ok()
                .filter(|n| *n >= 1)
                .ok_or(ConfigError::Invalid {
                    key: "DB_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && *s != "*")
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            database_url,
            database_url_set,
            database_name: non_empty("DATABASE_NAME"),
            max_connections,
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
