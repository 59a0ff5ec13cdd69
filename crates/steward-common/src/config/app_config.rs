//! Application configuration structs
//!
//! Layered loading: `steward.toml` (or an explicit path), then `STEWARD_*`
//! environment overrides, with `.env` support. Promotion rules and toggle
//! pairs are structured data, so the file source is the primary one and
//! environment variables override scalar settings.

use config::{Config, Environment as EnvSource, File};
use serde::Deserialize;
use validator::Validate;

use steward_core::policy::{PromotionRule, TogglePair, ToggleRegistry};
use steward_core::value_objects::Snowflake;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[serde(default)]
    #[validate(nested)]
    pub app: AppSettings,
    #[validate(nested)]
    pub database: DatabaseConfig,
    #[serde(default)]
    #[validate(nested)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
    #[serde(default)]
    #[validate(nested)]
    pub policies: PolicyConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub env: RuntimeEnv,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnv {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Event ingestion tuning
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngestConfig {
    /// Worker shards; same-user events always land on the same shard
    #[serde(default = "default_worker_shards")]
    #[validate(range(min = 1, max = 64))]
    pub worker_shards: usize,
    /// Per-shard queue depth before the feed applies backpressure
    #[serde(default = "default_queue_depth")]
    #[validate(range(min = 1))]
    pub queue_depth: usize,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Role policy configuration consumed by the engine
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PolicyConfig {
    /// Promotion rules, evaluated in the order listed here
    #[serde(default)]
    pub promotion_rules: Vec<PromotionRule>,
    /// Mutually exclusive role pairs
    #[serde(default)]
    pub toggled_roles: Vec<TogglePair>,
    /// Roles granted to members joining with no saved snapshot
    #[serde(default)]
    pub default_roles: Vec<Snowflake>,
    /// Roles users may grant or revoke for themselves
    #[serde(default)]
    pub self_assignable_roles: Vec<Snowflake>,
}

/// Reconciler tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    /// Attempts at the platform audit-trail lookup before giving up
    #[serde(default = "default_source_lookup_attempts")]
    pub source_lookup_attempts: u32,
    /// Delay between attempts, in milliseconds (the trail lags the event)
    #[serde(default = "default_source_lookup_delay_ms")]
    pub source_lookup_delay_ms: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            source_lookup_attempts: default_source_lookup_attempts(),
            source_lookup_delay_ms: default_source_lookup_delay_ms(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: RuntimeEnv::default(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            worker_shards: default_worker_shards(),
            queue_depth: default_queue_depth(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "steward".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_worker_shards() -> usize {
    4
}

fn default_queue_depth() -> usize {
    256
}

fn default_source_lookup_attempts() -> u32 {
    3
}

fn default_source_lookup_delay_ms() -> u64 {
    2000
}

impl AppConfig {
    /// Load configuration from `steward.toml` plus environment overrides
    ///
    /// # Errors
    /// Returns an error if no source provides the required settings or if
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("steward")
    }

    /// Load configuration from an explicit file stem plus environment
    /// overrides (`STEWARD_DATABASE__URL=...` style)
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(EnvSource::with_prefix("STEWARD").separator("__"))
            .build()?;

        let config: Self = raw.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    /// Validate field constraints and cross-field policy invariants
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        for rule in &self.policies.promotion_rules {
            if rule.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "promotion rule with empty name".to_string(),
                ));
            }
            if rule.source_role == rule.target_role {
                return Err(ConfigError::Invalid(format!(
                    "promotion rule '{}' maps a role to itself",
                    rule.name
                )));
            }
        }

        // Surface degenerate toggle pairs at load time, not at first grant
        ToggleRegistry::from_pairs(&self.policies.toggled_roles)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Build the symmetric toggle lookup from the configured pairs
    ///
    /// # Panics
    /// Never panics after `check()` has succeeded.
    pub fn toggle_registry(&self) -> Result<ToggleRegistry, ConfigError> {
        ToggleRegistry::from_pairs(&self.policies.toggled_roles)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
