//! Provider selection and mock checkout.
//!
//! The payment "backend" is a fixed delay; the only validation is the
//! consent acknowledgment, which must be set before `confirm()` succeeds.

use std::time::Duration;

use serde::Serialize;

use crate::config::ConsultConfig;
use crate::error::CheckoutError;
use crate::model::SupportType;

/// Consent copy the user must acknowledge before paying.
pub const CONSENT_TEXT: &str =
    "I understand that this is non-medical advice and not a replacement for emergency care.";

/// The matched expert shown on the checkout step.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderProfile {
    pub name: String,
    pub title: String,
    pub bio: String,
}

impl Default for ProviderProfile {
    fn default() -> Self {
        Self {
            name: "Dr. Chen".to_string(),
            title: "Pediatric Sleep Consultant".to_string(),
            bio: "10+ years helping families building healthy sleep habits. \
                  Compassionate and evidence-based approach."
                .to_string(),
        }
    }
}

/// Where the wizard goes after a successful payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Chat consultation paid; proceed to the chat session.
    ChatReady,
    /// Video consultation booked; proceed straight to completion.
    VideoBooked,
}

/// One checkout attempt for the chosen support type.
#[derive(Debug)]
pub struct Checkout {
    support_type: SupportType,
    payment_delay: Duration,
    consented: bool,
}

impl Checkout {
    pub fn new(support_type: SupportType, config: &ConsultConfig) -> Self {
        Self {
            support_type,
            payment_delay: config.payment_delay,
            consented: false,
        }
    }

    pub fn set_consent(&mut self, agreed: bool) {
        self.consented = agreed;
    }

    pub fn consented(&self) -> bool {
        self.consented
    }

    /// Run the mock payment.
    ///
    /// Fails immediately when consent has not been acknowledged; otherwise
    /// waits out the simulated processing delay and reports where the
    /// wizard should go next.
    pub async fn confirm(&self) -> Result<CheckoutOutcome, CheckoutError> {
        if !self.consented {
            return Err(CheckoutError::ConsentRequired);
        }

        tokio::time::sleep(self.payment_delay).await;
        tracing::info!(support_type = %self.support_type, "Payment simulated");

        Ok(match self.support_type {
            SupportType::Chat => CheckoutOutcome::ChatReady,
            SupportType::Video => CheckoutOutcome::VideoBooked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn consent_required_before_payment() {
        let checkout = Checkout::new(SupportType::Chat, &ConsultConfig::default());
        assert_eq!(
            checkout.confirm().await.unwrap_err(),
            CheckoutError::ConsentRequired
        );
    }

    #[tokio::test(start_paused = true)]
    async fn chat_checkout_proceeds_to_chat() {
        let mut checkout = Checkout::new(SupportType::Chat, &ConsultConfig::default());
        checkout.set_consent(true);
        assert_eq!(checkout.confirm().await.unwrap(), CheckoutOutcome::ChatReady);
    }

    #[tokio::test(start_paused = true)]
    async fn video_checkout_books_and_skips_chat() {
        let mut checkout = Checkout::new(SupportType::Video, &ConsultConfig::default());
        checkout.set_consent(true);
        assert_eq!(
            checkout.confirm().await.unwrap(),
            CheckoutOutcome::VideoBooked
        );
    }

    #[tokio::test(start_paused = true)]
    async fn consent_can_be_withdrawn() {
        let mut checkout = Checkout::new(SupportType::Chat, &ConsultConfig::default());
        checkout.set_consent(true);
        checkout.set_consent(false);
        assert!(!checkout.consented());
        assert!(checkout.confirm().await.is_err());
    }
}
