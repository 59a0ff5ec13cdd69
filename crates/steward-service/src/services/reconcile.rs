//! Role-state reconciler
//!
//! Keeps the role snapshot and history in step with what the platform
//! reports, restores saved roles when a member rejoins, and applies
//! cold-start defaults for first-time members.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use steward_core::entities::{AuditRecord, RoleAction, RoleHistoryEntry};
use steward_core::error::DomainError;
use steward_core::value_objects::{Provenance, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::roles::RoleService;

/// One member's current roles, as supplied by a snapshot rebuild command
#[derive(Debug, Clone)]
pub struct MemberRoles {
    pub user_id: Snowflake,
    pub role_ids: Vec<Snowflake>,
    pub is_bot: bool,
}

/// Role-state reconciliation service
pub struct ReconcileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReconcileService<'a> {
    /// Create a new ReconcileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Handle a platform role-set change for a user
    ///
    /// The snapshot is overwritten unconditionally; one history entry is
    /// appended per individual role delta, all with the same best-effort
    /// provenance.
    #[instrument(skip(self, before, after))]
    pub async fn roles_changed(
        &self,
        user_id: Snowflake,
        before: &[Snowflake],
        after: &[Snowflake],
    ) -> ServiceResult<()> {
        self.ctx.role_state().set_snapshot(user_id, after).await?;

        let before_set: HashSet<Snowflake> = before.iter().copied().collect();
        let after_set: HashSet<Snowflake> = after.iter().copied().collect();

        let added: Vec<Snowflake> = after_set.difference(&before_set).copied().collect();
        let removed: Vec<Snowflake> = before_set.difference(&after_set).copied().collect();

        if added.is_empty() && removed.is_empty() {
            return Ok(());
        }

        let source = self.resolve_source(user_id).await;

        for role_id in added {
            let entry = RoleHistoryEntry::new(
                self.ctx.generate_id(),
                user_id,
                role_id,
                RoleAction::Added,
                source.clone(),
            );
            self.ctx.role_state().append_history(&entry).await?;
        }
        for role_id in removed {
            let entry = RoleHistoryEntry::new(
                self.ctx.generate_id(),
                user_id,
                role_id,
                RoleAction::Removed,
                source.clone(),
            );
            self.ctx.role_state().append_history(&entry).await?;
        }

        Ok(())
    }

    /// Handle a member (re)joining
    ///
    /// A non-empty saved snapshot takes the restoration path; otherwise
    /// the configured default roles are granted through the coordinator.
    #[instrument(skip(self))]
    pub async fn member_joined(&self, user_id: Snowflake) -> ServiceResult<()> {
        let snapshot = self.ctx.role_state().snapshot(user_id).await?;

        match snapshot {
            Some(snapshot) if !snapshot.is_empty() => {
                self.restore_roles(user_id, &snapshot.role_ids).await
            }
            _ => self.apply_cold_start(user_id).await,
        }
    }

    /// Overwrite snapshots from a full member scan; returns how many
    /// members were recorded
    #[instrument(skip(self, members), fields(member_count = members.len()))]
    pub async fn rebuild_snapshots(&self, members: &[MemberRoles]) -> ServiceResult<usize> {
        let mut count = 0;
        for member in members {
            if member.is_bot || member.role_ids.is_empty() {
                continue;
            }
            self.ctx
                .role_state()
                .set_snapshot(member.user_id, &member.role_ids)
                .await?;
            count += 1;
        }
        info!(count, "Role snapshots rebuilt");
        Ok(count)
    }

    /// Restore saved roles, filtered to what the platform still allows
    ///
    /// Restoration is not a promotion: it goes through the batched,
    /// toggle-free primitive, so mutually exclusive restored roles are
    /// left for moderators to resolve from the history trail.
    async fn restore_roles(&self, user_id: Snowflake, saved: &[Snowflake]) -> ServiceResult<()> {
        let ceiling = self
            .ctx
            .platform()
            .bot_top_position()
            .await
            .map_err(DomainError::from)?;

        let mut to_restore = Vec::with_capacity(saved.len());
        for role_id in saved {
            match self
                .ctx
                .platform()
                .find_role(*role_id)
                .await
                .map_err(DomainError::from)?
            {
                Some(role) if !role.managed && role.position < ceiling => {
                    to_restore.push(*role_id);
                }
                Some(role) => {
                    debug!(
                        role_id = %role_id,
                        managed = role.managed,
                        position = role.position,
                        "Saved role not restorable"
                    );
                }
                None => {
                    debug!(role_id = %role_id, "Saved role no longer exists");
                }
            }
        }

        if to_restore.is_empty() {
            debug!(user_id = %user_id, "No restorable roles for returning member");
            return Ok(());
        }

        self.ctx
            .platform()
            .apply_roles(
                user_id,
                &to_restore,
                "Automatic role restoration for returning member",
            )
            .await
            .map_err(DomainError::from)?;

        let details = format!(
            "Restored {} of {} saved roles",
            to_restore.len(),
            saved.len()
        );
        let record = AuditRecord::new("Roles Restored", user_id, Provenance::Restoration, details);
        self.ctx
            .audit()
            .record(&record)
            .await
            .map_err(DomainError::from)?;

        info!(user_id = %user_id, count = to_restore.len(), "Roles restored for returning member");
        Ok(())
    }

    /// Grant configured default roles to a first-time member
    async fn apply_cold_start(&self, user_id: Snowflake) -> ServiceResult<()> {
        let roles = RoleService::new(self.ctx);
        for role_id in self.ctx.default_roles() {
            roles
                .grant_role(
                    user_id,
                    *role_id,
                    "Default role assignment for new member",
                    "Default Role Assigned",
                    Provenance::system("default-assignment"),
                )
                .await?;
        }
        Ok(())
    }

    /// Best-effort provenance lookup via the platform audit trail
    ///
    /// The trail lags the gateway event, so the lookup waits and retries a
    /// configured number of times before settling on `Unknown`.
    async fn resolve_source(&self, user_id: Snowflake) -> Provenance {
        let cfg = self.ctx.reconcile();

        for attempt in 0..cfg.source_lookup_attempts {
            if cfg.source_lookup_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(cfg.source_lookup_delay_ms)).await;
            }

            match self.ctx.platform().recent_role_actor(user_id).await {
                Ok(Some(actor)) => {
                    return if actor.is_self {
                        Provenance::system(actor.reason.unwrap_or_else(|| "automatic".to_string()))
                    } else {
                        Provenance::moderator(actor.actor_id)
                    };
                }
                Ok(None) => {
                    debug!(user_id = %user_id, attempt, "Audit trail has no matching entry yet");
                }
                Err(err) => {
                    warn!(user_id = %user_id, error = %err, "Audit trail lookup failed");
                    return Provenance::Unknown;
                }
            }
        }

        Provenance::Unknown
    }
}
