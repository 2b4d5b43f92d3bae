//! Consultation context — the single source of truth shared by the wizard
//! steps (concern entry, checkout, chat, completion).

use std::sync::{Arc, Weak};

use tokio::sync::{RwLock, broadcast};

use crate::config::ConsultConfig;
use crate::error::ContextError;
use crate::history::SessionHistory;
use crate::model::{ConsultationSession, SupportType};

/// Emitted after every successful context mutation so views can re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextEvent {
    ConcernChanged,
    SupportTypeChanged,
    SessionArchived,
    Reset,
}

#[derive(Debug)]
struct ConsultState {
    concern: String,
    support_type: SupportType,
    history: SessionHistory,
}

/// Shared wizard state.
///
/// Constructed once at application start and passed by reference; consumers
/// that may outlive it hold a [`ContextHandle`] instead of the `Arc`. The
/// setters are unconditional — input validation belongs to the step that
/// calls them.
#[derive(Debug)]
pub struct ConsultContext {
    state: RwLock<ConsultState>,
    events: broadcast::Sender<ContextEvent>,
}

impl ConsultContext {
    pub fn new(config: &ConsultConfig) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            state: RwLock::new(ConsultState {
                concern: String::new(),
                support_type: SupportType::default(),
                history: SessionHistory::new(config.history_capacity),
            }),
            events,
        }
    }

    pub async fn concern(&self) -> String {
        self.state.read().await.concern.clone()
    }

    pub async fn set_concern(&self, text: impl Into<String>) {
        self.state.write().await.concern = text.into();
        self.notify(ContextEvent::ConcernChanged);
    }

    pub async fn support_type(&self) -> SupportType {
        self.state.read().await.support_type
    }

    pub async fn set_support_type(&self, kind: SupportType) {
        self.state.write().await.support_type = kind;
        self.notify(ContextEvent::SupportTypeChanged);
    }

    /// Append a completed session to the bounded history.
    pub async fn add_to_history(&self, session: ConsultationSession) {
        let mut state = self.state.write().await;
        state.history.add(session);
        tracing::info!(history_len = state.history.len(), "Session archived");
        drop(state);
        self.notify(ContextEvent::SessionArchived);
    }

    /// Snapshot of the history, newest first.
    pub async fn history(&self) -> Vec<ConsultationSession> {
        self.state.read().await.history.sessions()
    }

    /// Clear the concern and support type back to defaults. History is
    /// preserved.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.concern.clear();
        state.support_type = SupportType::default();
        drop(state);
        self.notify(ContextEvent::Reset);
    }

    /// Register for change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<ContextEvent> {
        self.events.subscribe()
    }

    /// A weak handle for consumers that may outlive the context scope.
    pub fn handle(self: &Arc<Self>) -> ContextHandle {
        ContextHandle(Arc::downgrade(self))
    }

    fn notify(&self, event: ContextEvent) {
        // No receivers is fine; mutation must never block on listeners.
        let _ = self.events.send(event);
    }
}

/// Weak reference to the consultation context.
///
/// `get()` fails once the owning scope has dropped the context, turning a
/// use-after-teardown wiring defect into an explicit error instead of a
/// silent mutation of discarded state.
#[derive(Clone)]
pub struct ContextHandle(Weak<ConsultContext>);

impl ContextHandle {
    pub fn get(&self) -> Result<Arc<ConsultContext>, ContextError> {
        self.0.upgrade().ok_or(ContextError::ScopeEnded)
    }
}
