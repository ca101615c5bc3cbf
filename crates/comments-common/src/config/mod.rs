//! Configuration module

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, LimitsConfig,
    ServerConfig, SessionConfig, SnowflakeConfig,
};
