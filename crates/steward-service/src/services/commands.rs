//! Command facade
//!
//! The operations exposed to the command/interaction front-end. Errors
//! from these paths carry user-visible messages; the front-end renders
//! `ServiceError::user_message()` back to the invoking moderator or user.

use tracing::{info, instrument};

use steward_core::entities::UserStats;
use steward_core::error::DomainError;
use steward_core::value_objects::{Provenance, Snowflake};

use super::activity::ActivityService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::reconcile::{MemberRoles, ReconcileService};
use super::roles::{MutationResult, RoleService};

/// What a self-service toggle ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfRoleOutcome {
    Added,
    Removed,
}

/// Front-end command service
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Moderator-initiated role grant
    #[instrument(skip(self, reason))]
    pub async fn grant_role_manual(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: Option<&str>,
        actor_id: Snowflake,
    ) -> ServiceResult<MutationResult> {
        RoleService::new(self.ctx)
            .grant_role(
                user_id,
                role_id,
                reason.unwrap_or("Manual role grant"),
                "Manual Role Added",
                Provenance::moderator(actor_id),
            )
            .await
    }

    /// Moderator-initiated role revocation; `false` when the user did not
    /// hold the role
    #[instrument(skip(self, reason))]
    pub async fn revoke_role_manual(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: Option<&str>,
        actor_id: Snowflake,
    ) -> ServiceResult<bool> {
        RoleService::new(self.ctx)
            .revoke_role(
                user_id,
                role_id,
                reason.unwrap_or("Manual role removal"),
                "Manual Role Removed",
                Provenance::moderator(actor_id),
            )
            .await
    }

    /// Grant or revoke a self-assignable role for the invoking user
    ///
    /// Roles outside the configured self-assignable set are refused.
    #[instrument(skip(self))]
    pub async fn toggle_self_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<SelfRoleOutcome> {
        if !self.ctx.self_assignable_roles().contains(&role_id) {
            return Err(ServiceError::NotSelfAssignable { role_id });
        }

        let held = self
            .ctx
            .platform()
            .member_roles(user_id)
            .await
            .map_err(DomainError::from)?;

        let roles = RoleService::new(self.ctx);
        if held.contains(&role_id) {
            roles
                .revoke_role(
                    user_id,
                    role_id,
                    "Self-assigned role removal",
                    "Self Role Removed",
                    Provenance::SelfService,
                )
                .await?;
            info!(user_id = %user_id, role_id = %role_id, "Self-service role removed");
            Ok(SelfRoleOutcome::Removed)
        } else {
            roles
                .grant_role(
                    user_id,
                    role_id,
                    "Self-assigned role",
                    "Self Role Added",
                    Provenance::SelfService,
                )
                .await?;
            info!(user_id = %user_id, role_id = %role_id, "Self-service role added");
            Ok(SelfRoleOutcome::Added)
        }
    }

    /// Scan-and-save snapshots for all supplied members; returns the
    /// number recorded
    #[instrument(skip(self, members))]
    pub async fn rebuild_role_snapshots(&self, members: &[MemberRoles]) -> ServiceResult<usize> {
        ReconcileService::new(self.ctx).rebuild_snapshots(members).await
    }

    /// Current derived statistics for a user
    #[instrument(skip(self))]
    pub async fn get_user_stats(&self, user_id: Snowflake) -> ServiceResult<UserStats> {
        ActivityService::new(self.ctx).compute_stats(user_id).await
    }
}
