//! # steward-common
//!
//! Shared utilities: configuration loading/validation and telemetry.

pub mod config;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, IngestConfig, PolicyConfig,
    ReconcileConfig, RuntimeEnv, SnowflakeConfig,
};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing_with_config, TracingConfig,
    TracingError,
};
