//! Configuration loading and validation

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, IngestConfig, PolicyConfig,
    ReconcileConfig, RuntimeEnv, SnowflakeConfig,
};
