//! ConsultWizard — coordinates the wizard steps over a shared context.

use std::sync::Arc;

use crate::chat::ChatDriver;
use crate::checkout::Checkout;
use crate::config::ConsultConfig;
use crate::context::ConsultContext;
use crate::error::{Result, WizardError};
use crate::model::SupportType;
use crate::replies::ReplySource;

/// Walks a consultation through concern entry, checkout, chat, and
/// completion. The context it owns outlives individual steps; history
/// accumulates across consultations for the lifetime of the wizard.
pub struct ConsultWizard {
    config: ConsultConfig,
    context: Arc<ConsultContext>,
}

impl ConsultWizard {
    pub fn new(config: ConsultConfig) -> Self {
        let context = Arc::new(ConsultContext::new(&config));
        Self { config, context }
    }

    pub fn context(&self) -> &Arc<ConsultContext> {
        &self.context
    }

    /// Step 1: store the concern. Rejects blank input; the context is not
    /// touched on failure.
    pub async fn submit_concern(&self, text: &str) -> std::result::Result<(), WizardError> {
        if text.trim().is_empty() {
            return Err(WizardError::EmptyConcern);
        }
        self.context.set_concern(text).await;
        Ok(())
    }

    pub async fn choose_support(&self, kind: SupportType) {
        self.context.set_support_type(kind).await;
    }

    /// Step 2: build a checkout for the chosen support type.
    pub async fn checkout(&self) -> Checkout {
        Checkout::new(self.context.support_type().await, &self.config)
    }

    /// Step 3: open the chat session and start the reply simulation.
    pub async fn begin_chat(&self, replies: Arc<dyn ReplySource>) -> Result<Arc<ChatDriver>> {
        ChatDriver::start(self.config.clone(), self.context.handle(), replies).await
    }

    /// Completion: clear the in-progress state. History is preserved.
    pub async fn finish(&self) {
        self.context.reset().await;
    }
}
