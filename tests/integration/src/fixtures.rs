//! In-memory port implementations for scenario tests
//!
//! Each fixture records enough of what happened for assertions: the event
//! store keeps every appended event, the platform tracks role membership
//! and honors failure injection, and the audit sink captures every record
//! it is handed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use steward_core::entities::{
    ActivityEvent, ActivityKind, ActivityPayload, AuditRecord, RoleHistoryEntry, RoleSnapshot,
    VoiceTransition,
};
use steward_core::traits::{
    ActivityEventRepository, AuditSink, PlatformError, PlatformResult, PlatformRole, RepoResult,
    RoleChangeActor, RolePlatform, RoleStateRepository,
};
use steward_core::value_objects::Snowflake;

/// Counter for unique test ids
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique Snowflake for test data
pub fn unique_id() -> Snowflake {
    Snowflake::new(COUNTER.fetch_add(1, Ordering::SeqCst) as i64)
}

/// Fixed base instant for deterministic event timestamps
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// A voice session event at `base_time() + offset_secs`
pub fn voice_event(
    user_id: Snowflake,
    offset_secs: i64,
    transition: VoiceTransition,
) -> ActivityEvent {
    ActivityEvent {
        id: unique_id(),
        user_id,
        channel_id: Snowflake::new(500),
        recorded_at: base_time() + Duration::seconds(offset_secs),
        payload: ActivityPayload::VoiceSession { transition },
    }
}

/// A message-sent event at `base_time() + offset_secs`
pub fn message_event(user_id: Snowflake, offset_secs: i64) -> ActivityEvent {
    ActivityEvent {
        id: unique_id(),
        user_id,
        channel_id: Snowflake::new(400),
        recorded_at: base_time() + Duration::seconds(offset_secs),
        payload: ActivityPayload::MessageSent {
            message_id: unique_id(),
        },
    }
}

// ============================================================================
// Event Store
// ============================================================================

/// In-memory activity event store
#[derive(Default)]
pub struct MemoryEventStore {
    events: Mutex<Vec<ActivityEvent>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far, in insertion order
    pub fn all_events(&self) -> Vec<ActivityEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Count of stored events of one kind
    pub fn count_of(&self, kind: ActivityKind) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind() == kind)
            .count()
    }
}

#[async_trait]
impl ActivityEventRepository for MemoryEventStore {
    async fn append(&self, event: &ActivityEvent) -> RepoResult<()> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: Snowflake,
        kind: ActivityKind,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<ActivityEvent>> {
        let mut matching: Vec<ActivityEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| {
                e.user_id == user_id
                    && e.kind() == kind
                    && since.is_none_or(|s| e.recorded_at >= s)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|e| e.recorded_at);
        Ok(matching)
    }
}

// ============================================================================
// Role State Store
// ============================================================================

/// In-memory role snapshot and history store
#[derive(Default)]
pub struct MemoryRoleStateStore {
    snapshots: Mutex<HashMap<Snowflake, RoleSnapshot>>,
    history: Mutex<Vec<RoleHistoryEntry>>,
}

impl MemoryRoleStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All history entries in insertion order
    pub fn history_entries(&self) -> Vec<RoleHistoryEntry> {
        self.history.lock().unwrap().clone()
    }

    /// Current snapshot contents for a user, if any
    pub fn snapshot_of(&self, user_id: Snowflake) -> Option<Vec<Snowflake>> {
        self.snapshots
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|s| s.role_ids.clone())
    }
}

#[async_trait]
impl RoleStateRepository for MemoryRoleStateStore {
    async fn snapshot(&self, user_id: Snowflake) -> RepoResult<Option<RoleSnapshot>> {
        Ok(self.snapshots.lock().unwrap().get(&user_id).cloned())
    }

    async fn set_snapshot(&self, user_id: Snowflake, role_ids: &[Snowflake]) -> RepoResult<()> {
        self.snapshots
            .lock()
            .unwrap()
            .insert(user_id, RoleSnapshot::new(user_id, role_ids.to_vec()));
        Ok(())
    }

    async fn append_history(&self, entry: &RoleHistoryEntry) -> RepoResult<()> {
        self.history.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn history_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<RoleHistoryEntry>> {
        let mut entries: Vec<RoleHistoryEntry> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.recorded_at);
        Ok(entries)
    }
}

// ============================================================================
// Platform
// ============================================================================

/// In-memory chat platform with failure injection
pub struct FakePlatform {
    member_roles: Mutex<HashMap<Snowflake, Vec<Snowflake>>>,
    roles: Mutex<HashMap<Snowflake, PlatformRole>>,
    recent_actor: Mutex<Option<RoleChangeActor>>,
    bot_top_position: i32,
    deny_additions: AtomicBool,
    deny_removals: AtomicBool,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            member_roles: Mutex::new(HashMap::new()),
            roles: Mutex::new(HashMap::new()),
            recent_actor: Mutex::new(None),
            bot_top_position: 100,
            deny_additions: AtomicBool::new(false),
            deny_removals: AtomicBool::new(false),
        }
    }
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a member's current roles
    pub fn set_member_roles(&self, user_id: Snowflake, roles: Vec<Snowflake>) {
        self.member_roles.lock().unwrap().insert(user_id, roles);
    }

    /// Current roles of a member as the platform sees them
    pub fn roles_of(&self, user_id: Snowflake) -> Vec<Snowflake> {
        self.member_roles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Register a role with the platform
    pub fn define_role(&self, role_id: Snowflake, position: i32, managed: bool) {
        self.roles.lock().unwrap().insert(
            role_id,
            PlatformRole {
                id: role_id,
                name: format!("role-{role_id}"),
                position,
                managed,
            },
        );
    }

    /// Seed the audit-trail lookup result
    pub fn set_recent_actor(&self, actor: Option<RoleChangeActor>) {
        *self.recent_actor.lock().unwrap() = actor;
    }

    /// All subsequent role removals fail with PermissionDenied
    pub fn deny_removals(&self) {
        self.deny_removals.store(true, Ordering::SeqCst);
    }

    /// All subsequent role additions fail with PermissionDenied
    pub fn deny_additions(&self) {
        self.deny_additions.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl RolePlatform for FakePlatform {
    async fn member_roles(&self, user_id: Snowflake) -> PlatformResult<Vec<Snowflake>> {
        Ok(self.roles_of(user_id))
    }

    async fn add_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        _reason: &str,
    ) -> PlatformResult<()> {
        if self.deny_additions.load(Ordering::SeqCst) {
            return Err(PlatformError::PermissionDenied {
                action: format!("add role {role_id}"),
            });
        }
        let mut members = self.member_roles.lock().unwrap();
        let roles = members.entry(user_id).or_default();
        if !roles.contains(&role_id) {
            roles.push(role_id);
        }
        Ok(())
    }

    async fn remove_role(
        &self,
        user_id: Snowflake,
        role_id: Snowflake,
        _reason: &str,
    ) -> PlatformResult<()> {
        if self.deny_removals.load(Ordering::SeqCst) {
            return Err(PlatformError::PermissionDenied {
                action: format!("remove role {role_id}"),
            });
        }
        let mut members = self.member_roles.lock().unwrap();
        if let Some(roles) = members.get_mut(&user_id) {
            roles.retain(|r| *r != role_id);
        }
        Ok(())
    }

    async fn apply_roles(
        &self,
        user_id: Snowflake,
        role_ids: &[Snowflake],
        _reason: &str,
    ) -> PlatformResult<()> {
        if self.deny_additions.load(Ordering::SeqCst) {
            return Err(PlatformError::PermissionDenied {
                action: "apply roles".to_string(),
            });
        }
        let mut members = self.member_roles.lock().unwrap();
        let roles = members.entry(user_id).or_default();
        for role_id in role_ids {
            if !roles.contains(role_id) {
                roles.push(*role_id);
            }
        }
        Ok(())
    }

    async fn find_role(&self, role_id: Snowflake) -> PlatformResult<Option<PlatformRole>> {
        Ok(self.roles.lock().unwrap().get(&role_id).cloned())
    }

    async fn bot_top_position(&self) -> PlatformResult<i32> {
        Ok(self.bot_top_position)
    }

    async fn recent_role_actor(
        &self,
        _user_id: Snowflake,
    ) -> PlatformResult<Option<RoleChangeActor>> {
        Ok(self.recent_actor.lock().unwrap().clone())
    }
}

// ============================================================================
// Audit Sink
// ============================================================================

/// Audit sink that captures every record for assertions
#[derive(Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in delivery order
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, record: &AuditRecord) -> PlatformResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
