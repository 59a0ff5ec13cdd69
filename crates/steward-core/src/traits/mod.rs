//! Ports - traits the infrastructure and platform adapters implement

mod platform;
mod repositories;

pub use platform::{
    AuditSink, PlatformError, PlatformResult, PlatformRole, RoleChangeActor, RolePlatform,
};
pub use repositories::{ActivityEventRepository, RepoResult, RoleStateRepository};
