//! Gateway event ingestion
//!
//! One dispatcher entry point per platform event, plus a sharded worker
//! pool. Events are routed to a shard by user id, so events for the same
//! user are processed in the order they were received while different
//! users proceed concurrently. A failure while processing one event is
//! logged and dropped; re-delivery is not guaranteed by the source, so
//! there is no retry loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use steward_core::entities::{ActivityEvent, ActivityPayload, VoiceStateChange, VoiceTransition};
use steward_core::events::{
    GatewayEvent, MessageDeletedEvent, MessageEditedEvent, MessageSentEvent, ReactionChangedEvent,
    VoiceStateChangedEvent,
};
use steward_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::promotion::PromotionService;
use super::reconcile::ReconcileService;

/// Dispatches one gateway event through the engine
pub struct EventDispatcher {
    ctx: Arc<ServiceContext>,
}

impl EventDispatcher {
    /// Create a new EventDispatcher
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Process a single gateway event to completion
    #[instrument(skip(self, event), fields(event_type = event.event_type(), user_id = %event.user_id()))]
    pub async fn handle_event(&self, event: GatewayEvent) -> ServiceResult<()> {
        match event {
            GatewayEvent::MessageSent(e) => self.on_message_sent(e).await,
            GatewayEvent::MessageEdited(e) => self.on_message_edited(e).await,
            GatewayEvent::MessageDeleted(e) => self.on_message_deleted(e).await,
            GatewayEvent::ReactionChanged(e) => self.on_reaction_changed(e).await,
            GatewayEvent::VoiceStateChanged(e) => self.on_voice_state_changed(e).await,
            GatewayEvent::MemberRolesChanged(e) => {
                ReconcileService::new(&self.ctx)
                    .roles_changed(e.user_id, &e.before_roles, &e.after_roles)
                    .await
            }
            GatewayEvent::MemberJoined(e) => {
                ReconcileService::new(&self.ctx).member_joined(e.user_id).await
            }
        }
    }

    async fn on_message_sent(&self, e: MessageSentEvent) -> ServiceResult<()> {
        // Bot chatter, DMs, and command invocations are not engagement
        if e.author_is_bot || !e.guild_present || e.content.starts_with('/') {
            return Ok(());
        }

        let event = ActivityEvent::new(
            self.ctx.generate_id(),
            e.user_id,
            e.channel_id,
            ActivityPayload::MessageSent {
                message_id: e.message_id,
            },
        );
        self.ctx.events().append(&event).await?;

        PromotionService::new(&self.ctx)
            .check_for_promotion(e.user_id)
            .await?;
        Ok(())
    }

    async fn on_message_edited(&self, e: MessageEditedEvent) -> ServiceResult<()> {
        // Recorded for audit only; does not affect the message count
        let event = ActivityEvent::new(
            self.ctx.generate_id(),
            e.user_id,
            e.channel_id,
            ActivityPayload::MessageEdited {
                message_id: e.message_id,
                old_content: e.old_content,
            },
        );
        Ok(self.ctx.events().append(&event).await?)
    }

    async fn on_message_deleted(&self, e: MessageDeletedEvent) -> ServiceResult<()> {
        let event = ActivityEvent::new(
            self.ctx.generate_id(),
            e.user_id,
            e.channel_id,
            ActivityPayload::MessageDeleted {
                message_id: e.message_id,
            },
        );
        Ok(self.ctx.events().append(&event).await?)
    }

    async fn on_reaction_changed(&self, e: ReactionChangedEvent) -> ServiceResult<()> {
        let event = ActivityEvent::new(
            self.ctx.generate_id(),
            e.user_id,
            e.channel_id,
            ActivityPayload::Reaction {
                message_id: e.message_id,
                emoji: e.emoji,
                action: e.action,
            },
        );
        Ok(self.ctx.events().append(&event).await?)
    }

    async fn on_voice_state_changed(&self, e: VoiceStateChangedEvent) -> ServiceResult<()> {
        let left_channel = matches!((e.before_channel, e.after_channel), (Some(_), None));

        for (channel_id, payload) in voice_activity(&e) {
            let event =
                ActivityEvent::new(self.ctx.generate_id(), e.user_id, channel_id, payload);
            self.ctx.events().append(&event).await?;
        }

        // A closed session may have pushed the user over a threshold
        if left_channel {
            PromotionService::new(&self.ctx)
                .check_for_promotion(e.user_id)
                .await?;
        }
        Ok(())
    }
}

/// Derive activity payloads from a raw voice-state transition
///
/// Only entering from nowhere and leaving to nowhere are session
/// boundaries; a channel move keeps the session running. Mute, deafen,
/// and stream flips are recorded against the channel the user is (or
/// was) in.
pub fn voice_activity(e: &VoiceStateChangedEvent) -> Vec<(Snowflake, ActivityPayload)> {
    let mut out = Vec::new();

    match (e.before_channel, e.after_channel) {
        (None, Some(channel)) => out.push((
            channel,
            ActivityPayload::VoiceSession {
                transition: VoiceTransition::Join,
            },
        )),
        (Some(channel), None) => out.push((
            channel,
            ActivityPayload::VoiceSession {
                transition: VoiceTransition::Leave,
            },
        )),
        _ => {}
    }

    let Some(channel) = e.after_channel.or(e.before_channel) else {
        return out;
    };

    let flips = [
        (e.before_mute, e.after_mute, VoiceStateChange::Mute, VoiceStateChange::Unmute),
        (e.before_deaf, e.after_deaf, VoiceStateChange::Deafen, VoiceStateChange::Undeafen),
        (
            e.before_stream,
            e.after_stream,
            VoiceStateChange::StreamStart,
            VoiceStateChange::StreamStop,
        ),
    ];
    for (before, after, on, off) in flips {
        if before != after {
            let change = if after { on } else { off };
            out.push((channel, ActivityPayload::VoiceState { change }));
        }
    }

    out
}

/// Sharded worker pool draining the gateway feed
pub struct EventWorker {
    dispatcher: Arc<EventDispatcher>,
    shards: usize,
    queue_depth: usize,
}

impl EventWorker {
    /// Create a worker pool sized from the context's ingest configuration
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let ingest = ctx.ingest().clone();
        Self {
            dispatcher: Arc::new(EventDispatcher::new(ctx)),
            shards: ingest.worker_shards.max(1),
            queue_depth: ingest.queue_depth.max(1),
        }
    }

    /// Drain the feed until it closes, then let the shards run dry
    pub async fn run(self, mut feed: mpsc::Receiver<GatewayEvent>) {
        let mut senders = Vec::with_capacity(self.shards);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(self.shards);

        for shard in 0..self.shards {
            let (tx, mut rx) = mpsc::channel::<GatewayEvent>(self.queue_depth);
            senders.push(tx);

            let dispatcher = Arc::clone(&self.dispatcher);
            handles.push(tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    let event_type = event.event_type();
                    let user_id = event.user_id();
                    if let Err(err) = dispatcher.handle_event(event).await {
                        // One user's failing event must never block the
                        // other shards; the event is dropped here
                        error!(
                            shard,
                            event_type,
                            user_id = %user_id,
                            error = %err,
                            "Event processing failed"
                        );
                    } else {
                        debug!(shard, event_type, user_id = %user_id, "Event processed");
                    }
                }
            }));
        }

        info!(shards = self.shards, "Event worker pool started");

        while let Some(event) = feed.recv().await {
            let shard = shard_for(event.user_id(), self.shards);
            if senders[shard].send(event).await.is_err() {
                break;
            }
        }

        drop(senders);
        for handle in handles {
            let _ = handle.await;
        }
        info!("Event worker pool drained");
    }
}

/// Stable user-to-shard routing
fn shard_for(user_id: Snowflake, shards: usize) -> usize {
    (user_id.into_inner().unsigned_abs() as usize) % shards
}
