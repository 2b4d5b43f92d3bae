//! Chat driver — owns one live session and simulates clinician replies on
//! a timer.
//!
//! Replies are scheduled as single-shot tokio tasks; `shutdown()` aborts
//! whatever is pending so a torn-down screen never receives a stale
//! arrival. The machine's out-of-phase arrival check is the second line of
//! defense against a timer that fires anyway.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;

use crate::config::ConsultConfig;
use crate::context::ContextHandle;
use crate::error::{ChatError, Result};
use crate::model::Message;
use crate::replies::{ReplySlot, ReplySource};

use super::phase::ChatPhase;
use super::session::ChatSession;

/// Emitted after each successful session mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    ClinicianReplied { slot: ReplySlot },
    FollowupSent,
    /// The session completed and was archived to history.
    Completed,
}

/// Drives one consultation chat from opening concern to archived session.
pub struct ChatDriver {
    config: ConsultConfig,
    context: ContextHandle,
    replies: Arc<dyn ReplySource>,
    session: Arc<RwLock<ChatSession>>,
    events: broadcast::Sender<ChatEvent>,
    /// At most one reply timer is outstanding at a time.
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ChatDriver {
    /// Open a session from the context's concern and schedule the first
    /// clinician reply.
    pub async fn start(
        config: ConsultConfig,
        context: ContextHandle,
        replies: Arc<dyn ReplySource>,
    ) -> Result<Arc<Self>> {
        let concern = context.get()?.concern().await;
        let (events, _) = broadcast::channel(32);

        let driver = Arc::new(Self {
            session: Arc::new(RwLock::new(ChatSession::open(concern))),
            events,
            pending: Mutex::new(None),
            replies,
            context,
            config,
        });

        driver
            .schedule_reply(ReplySlot::First, driver.config.first_reply_delay)
            .await;
        Ok(driver)
    }

    pub async fn phase(&self) -> ChatPhase {
        self.session.read().await.phase()
    }

    /// Transcript snapshot for rendering.
    pub async fn messages(&self) -> Vec<Message> {
        self.session.read().await.messages().to_vec()
    }

    /// Register for re-render notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    /// Submit the user's follow-up. On success the final clinician reply is
    /// scheduled; on validation failure nothing changes.
    pub async fn submit_followup(&self, text: &str) -> std::result::Result<(), ChatError> {
        self.session.write().await.submit_followup(text)?;
        let _ = self.events.send(ChatEvent::FollowupSent);
        self.schedule_reply(ReplySlot::Second, self.config.final_reply_delay)
            .await;
        Ok(())
    }

    /// Cancel any pending reply timer. Call before discarding the driver.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.pending.lock().await.take() {
            handle.abort();
            tracing::debug!("Pending clinician reply cancelled");
        }
    }

    async fn schedule_reply(&self, slot: ReplySlot, delay: Duration) {
        let session = Arc::clone(&self.session);
        let replies = Arc::clone(&self.replies);
        let events = self.events.clone();
        let context = self.context.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Self::deliver_reply(session, replies, events, context, slot).await;
        });
        *self.pending.lock().await = Some(handle);
    }

    async fn deliver_reply(
        session: Arc<RwLock<ChatSession>>,
        replies: Arc<dyn ReplySource>,
        events: broadcast::Sender<ChatEvent>,
        context: ContextHandle,
        slot: ReplySlot,
    ) {
        let text = replies.reply_for(slot).await;
        let applied = session.write().await.apply_reply(slot, text);
        if !applied {
            return;
        }
        let _ = events.send(ChatEvent::ClinicianReplied { slot });

        if slot == ReplySlot::Second {
            Self::archive(&session, &events, &context).await;
        }
    }

    /// Persist the finished session to history, exactly once.
    async fn archive(
        session: &RwLock<ChatSession>,
        events: &broadcast::Sender<ChatEvent>,
        context: &ContextHandle,
    ) {
        let ctx = match context.get() {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!("Completed session not archived: {e}");
                return;
            }
        };

        let Some(archived) = session.write().await.take_completed() else {
            return;
        };
        ctx.add_to_history(archived).await;
        let _ = events.send(ChatEvent::Completed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ConsultContext;
    use crate::replies::ScriptedReplies;

    async fn started_driver() -> (Arc<ConsultContext>, Arc<ChatDriver>) {
        let config = ConsultConfig::default();
        let ctx = Arc::new(ConsultContext::new(&config));
        ctx.set_concern("toddler won't sleep").await;
        let driver = ChatDriver::start(config, ctx.handle(), Arc::new(ScriptedReplies))
            .await
            .unwrap();
        (ctx, driver)
    }

    #[tokio::test(start_paused = true)]
    async fn opens_with_concern_and_locked_input() {
        let (_ctx, driver) = started_driver().await;
        assert_eq!(driver.phase().await, ChatPhase::WaitingFirstReply);

        let messages = driver.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "toddler won't sleep");

        let err = driver.submit_followup("too early").await.unwrap_err();
        assert!(matches!(err, ChatError::InputLocked { .. }));

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn start_fails_after_context_drop() {
        let config = ConsultConfig::default();
        let ctx = Arc::new(ConsultContext::new(&config));
        let handle = ctx.handle();
        drop(ctx);

        assert!(
            ChatDriver::start(config, handle, Arc::new(ScriptedReplies))
                .await
                .is_err()
        );
    }
}
