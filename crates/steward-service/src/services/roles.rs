//! Role mutation & toggle coordinator
//!
//! The single choke point for granting a role. Every grant runs the same
//! sequence: no-op guard, platform addition, toggle-conflict removal, one
//! consolidated audit record. The platform boundary has no transaction
//! spanning two mutations, so a failure mid-sequence keeps the partial
//! state and reports the error instead of rolling back.

use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use steward_core::entities::AuditRecord;
use steward_core::error::DomainError;
use steward_core::value_objects::{Provenance, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of a grant: whether the role was added and which conflicting
/// role, if any, was removed by the toggle rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MutationResult {
    pub added: bool,
    pub removed_conflict: Option<Snowflake>,
}

impl MutationResult {
    /// The no-op outcome for a user who already held the role
    pub const NOOP: Self = Self {
        added: false,
        removed_conflict: None,
    };
}

/// Role mutation service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Grant a role, resolving toggle conflicts
    ///
    /// Idempotent: a user who already holds the role gets `NOOP` back and
    /// no audit record is emitted. On success exactly one consolidated
    /// record describes the addition and any toggle removal.
    #[instrument(skip(self, reason, audit_title, actor))]
    pub async fn grant_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: &str,
        audit_title: &str,
        actor: Provenance,
    ) -> ServiceResult<MutationResult> {
        let held = self
            .ctx
            .platform()
            .member_roles(user_id)
            .await
            .map_err(DomainError::from)?;

        if held.contains(&role_id) {
            debug!(user_id = %user_id, role_id = %role_id, "Grant skipped, role already held");
            return Ok(MutationResult::NOOP);
        }

        self.ctx
            .platform()
            .add_role(user_id, role_id, reason)
            .await
            .map_err(DomainError::from)?;

        let mut removed_conflict = None;
        if let Some(conflict) = self.ctx.toggles().conflict_for(role_id) {
            if held.contains(&conflict) {
                let toggle_reason = format!("Toggled by adding role {role_id}");
                match self
                    .ctx
                    .platform()
                    .remove_role(user_id, conflict, &toggle_reason)
                    .await
                {
                    Ok(()) => removed_conflict = Some(conflict),
                    Err(err) => {
                        // No rollback across two remote mutations: the new
                        // role stays, the conflicting role stays, and the
                        // failure is reported
                        error!(
                            user_id = %user_id,
                            added_role = %role_id,
                            conflicting_role = %conflict,
                            error = %err,
                            "Toggle removal failed after role addition; partial state kept"
                        );
                        return Err(DomainError::from(err).into());
                    }
                }
            }
        }

        let mut details = format!("Added role {role_id}");
        if let Some(conflict) = removed_conflict {
            details.push_str(&format!(
                "; removed conflicting role {conflict} (toggle pair)"
            ));
        }
        if !reason.is_empty() {
            details.push_str(&format!("\nReason: {reason}"));
        }

        let record = AuditRecord::new(audit_title, user_id, actor, details);
        self.ctx
            .audit()
            .record(&record)
            .await
            .map_err(DomainError::from)?;

        Ok(MutationResult {
            added: true,
            removed_conflict,
        })
    }

    /// Revoke a role
    ///
    /// Idempotent: returns `false` without auditing when the user does not
    /// hold the role.
    #[instrument(skip(self, reason, audit_title, actor))]
    pub async fn revoke_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        reason: &str,
        audit_title: &str,
        actor: Provenance,
    ) -> ServiceResult<bool> {
        let held = self
            .ctx
            .platform()
            .member_roles(user_id)
            .await
            .map_err(DomainError::from)?;

        if !held.contains(&role_id) {
            debug!(user_id = %user_id, role_id = %role_id, "Revoke skipped, role not held");
            return Ok(false);
        }

        self.ctx
            .platform()
            .remove_role(user_id, role_id, reason)
            .await
            .map_err(DomainError::from)?;

        let mut details = format!("Removed role {role_id}");
        if !reason.is_empty() {
            details.push_str(&format!("\nReason: {reason}"));
        }

        let record = AuditRecord::new(audit_title, user_id, actor, details);
        if let Err(err) = self.ctx.audit().record(&record).await {
            warn!(user_id = %user_id, error = %err, "Audit sink rejected revoke record");
            return Err(DomainError::from(err).into());
        }

        Ok(true)
    }
}
