//! # steward-core
//!
//! Domain layer containing entities, policy types, value objects, ports,
//! and gateway event definitions. This crate has zero dependencies on
//! infrastructure (database, platform SDKs, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityEvent, ActivityKind, ActivityPayload, AuditRecord, ReactionAction, RoleAction,
    RoleHistoryEntry, RoleSnapshot, UserStats, VoiceStateChange, VoiceTransition,
};
pub use error::DomainError;
pub use events::GatewayEvent;
pub use policy::{PromotionRule, RuleLogic, TogglePair, TogglePairError, ToggleRegistry};
pub use traits::{
    ActivityEventRepository, AuditSink, PlatformError, PlatformResult, PlatformRole, RepoResult,
    RoleChangeActor, RolePlatform, RoleStateRepository,
};
pub use value_objects::{Provenance, Snowflake, SnowflakeGenerator, SnowflakeParseError};
