//! Service context - dependency container for services
//!
//! Holds the repositories, platform port, audit sink, and policy
//! configuration every service needs. Services borrow the context; the
//! dispatcher shares it across worker shards behind an `Arc`.

use std::sync::Arc;

use steward_common::{AppConfig, IngestConfig, PolicyConfig, ReconcileConfig};
use steward_core::policy::ToggleRegistry;
use steward_core::traits::{ActivityEventRepository, AuditSink, RolePlatform, RoleStateRepository};
use steward_core::value_objects::{Snowflake, SnowflakeGenerator};
use steward_core::PromotionRule;
use steward_db::{PgActivityEventRepository, PgPool, PgRoleStateRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    events: Arc<dyn ActivityEventRepository>,
    role_state: Arc<dyn RoleStateRepository>,
    platform: Arc<dyn RolePlatform>,
    audit: Arc<dyn AuditSink>,

    // Policy configuration
    policies: PolicyConfig,
    toggles: ToggleRegistry,
    reconcile: ReconcileConfig,
    ingest: IngestConfig,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Build a context backed by PostgreSQL repositories
    ///
    /// The platform port and audit sink come from the gateway adapter;
    /// everything else is wired from configuration.
    pub fn with_postgres(
        pool: PgPool,
        config: &AppConfig,
        platform: Arc<dyn RolePlatform>,
        audit: Arc<dyn AuditSink>,
    ) -> ServiceResult<Self> {
        let toggles = config
            .toggle_registry()
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(Self {
            events: Arc::new(PgActivityEventRepository::new(pool.clone())),
            role_state: Arc::new(PgRoleStateRepository::new(pool)),
            platform,
            audit,
            policies: config.policies.clone(),
            toggles,
            reconcile: config.reconcile.clone(),
            ingest: config.ingest.clone(),
            snowflake_generator: Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
        })
    }

    // === Ports ===

    /// Get the activity event store
    pub fn events(&self) -> &dyn ActivityEventRepository {
        self.events.as_ref()
    }

    /// Get the role state store
    pub fn role_state(&self) -> &dyn RoleStateRepository {
        self.role_state.as_ref()
    }

    /// Get the chat platform port
    pub fn platform(&self) -> &dyn RolePlatform {
        self.platform.as_ref()
    }

    /// Get the audit sink
    pub fn audit(&self) -> &dyn AuditSink {
        self.audit.as_ref()
    }

    // === Policy configuration ===

    /// Promotion rules in evaluation order
    pub fn rules(&self) -> &[PromotionRule] {
        &self.policies.promotion_rules
    }

    /// Symmetric toggle-pair lookup
    pub fn toggles(&self) -> &ToggleRegistry {
        &self.toggles
    }

    /// Roles granted on a cold-start join
    pub fn default_roles(&self) -> &[Snowflake] {
        &self.policies.default_roles
    }

    /// Roles users may toggle for themselves
    pub fn self_assignable_roles(&self) -> &[Snowflake] {
        &self.policies.self_assignable_roles
    }

    /// Reconciler tuning
    pub fn reconcile(&self) -> &ReconcileConfig {
        &self.reconcile
    }

    /// Ingestion tuning
    pub fn ingest(&self) -> &IngestConfig {
        &self.ingest
    }

    // === Services ===

    /// Generate a new Snowflake ID for an ingestion-owned row
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("rules", &self.policies.promotion_rules.len())
            .field("toggle_pairs", &self.toggles.pair_count())
            .finish()
    }
}

/// Builder for creating a ServiceContext with custom ports
///
/// Used directly by tests, which plug in in-memory implementations.
#[derive(Default)]
pub struct ServiceContextBuilder {
    events: Option<Arc<dyn ActivityEventRepository>>,
    role_state: Option<Arc<dyn RoleStateRepository>>,
    platform: Option<Arc<dyn RolePlatform>>,
    audit: Option<Arc<dyn AuditSink>>,
    policies: PolicyConfig,
    reconcile: ReconcileConfig,
    ingest: IngestConfig,
    snowflake_worker_id: u16,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(mut self, repo: Arc<dyn ActivityEventRepository>) -> Self {
        self.events = Some(repo);
        self
    }

    pub fn role_state(mut self, repo: Arc<dyn RoleStateRepository>) -> Self {
        self.role_state = Some(repo);
        self
    }

    pub fn platform(mut self, platform: Arc<dyn RolePlatform>) -> Self {
        self.platform = Some(platform);
        self
    }

    pub fn audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn policies(mut self, policies: PolicyConfig) -> Self {
        self.policies = policies;
        self
    }

    pub fn reconcile(mut self, reconcile: ReconcileConfig) -> Self {
        self.reconcile = reconcile;
        self
    }

    pub fn ingest(mut self, ingest: IngestConfig) -> Self {
        self.ingest = ingest;
        self
    }

    pub fn snowflake_worker_id(mut self, worker_id: u16) -> Self {
        self.snowflake_worker_id = worker_id;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required port is missing or
    /// the toggle pairs are degenerate.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let toggles = ToggleRegistry::from_pairs(&self.policies.toggled_roles)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(ServiceContext {
            events: self
                .events
                .ok_or_else(|| ServiceError::internal("events repository is required"))?,
            role_state: self
                .role_state
                .ok_or_else(|| ServiceError::internal("role_state repository is required"))?,
            platform: self
                .platform
                .ok_or_else(|| ServiceError::internal("platform port is required"))?,
            audit: self
                .audit
                .ok_or_else(|| ServiceError::internal("audit sink is required"))?,
            policies: self.policies,
            toggles,
            reconcile: self.reconcile,
            ingest: self.ingest,
            snowflake_generator: Arc::new(SnowflakeGenerator::new(self.snowflake_worker_id)),
        })
    }
}
