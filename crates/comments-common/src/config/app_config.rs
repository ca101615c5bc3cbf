//! Environment-driven application configuration
//!
//! A `.env` file is honored when present. `SERVER_PORT`, `DATABASE_URL`,
//! and `SESSION_SECRET` are required; everything else has a default.

use std::env;
use std::str::FromStr;

use serde::Deserialize;

/// Top-level configuration assembled from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub cors: CorsConfig,
    pub limits: LimitsConfig,
    pub snowflake: SnowflakeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Deployment environment, selected via `APP_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Shared secret for verifying identity-provider session tokens
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed in production; empty means browsers are locked out
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// How long a handler waits on a storage mutation before reporting a
    /// timeout (the write itself keeps running)
    pub storage_wait_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeConfig {
    /// Distinguishes id generators across replicas
    #[serde(default)]
    pub worker_id: u16,
}

impl AppConfig {
    /// Assemble configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; real env vars still apply
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: optional("APP_NAME").unwrap_or_else(|| "comments-server".to_string()),
                env: parsed_or("APP_ENV", Environment::Development)?,
            },
            server: ServerConfig {
                host: optional("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: required_parsed("SERVER_PORT")?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 20)?,
                min_connections: parsed_or("DATABASE_MIN_CONNECTIONS", 5)?,
            },
            session: SessionConfig {
                secret: required("SESSION_SECRET")?,
            },
            cors: CorsConfig {
                allowed_origins: optional("CORS_ALLOWED_ORIGINS")
                    .map(|v| v.split(',').map(|o| o.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            limits: LimitsConfig {
                request_timeout_secs: parsed_or("REQUEST_TIMEOUT_SECS", 30)?,
                storage_wait_secs: parsed_or("STORAGE_WAIT_SECS", 10)?,
            },
            snowflake: SnowflakeConfig {
                worker_id: parsed_or("WORKER_ID", 0)?,
            },
        })
    }
}

fn optional(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::MissingVar(name))
}

fn required_parsed<T: FromStr>(name: &'static str) -> Result<T, ConfigError> {
    let raw = required(name)?;
    raw.parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw))
}

fn parsed_or<T: FromStr>(name: &'static str, fallback: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(fallback),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("environment variable {0} has invalid value {1:?}")]
    InvalidValue(&'static str, String),
}
