//! Configuration types.

use std::time::Duration;

/// Consultation core configuration.
#[derive(Debug, Clone)]
pub struct ConsultConfig {
    /// Simulated latency before the first clinician reply arrives.
    pub first_reply_delay: Duration,
    /// Simulated latency before the final clinician reply arrives.
    pub final_reply_delay: Duration,
    /// Simulated payment-processing latency in the checkout step.
    pub payment_delay: Duration,
    /// Maximum number of completed sessions retained in history.
    pub history_capacity: usize,
}

impl Default for ConsultConfig {
    fn default() -> Self {
        Self {
            first_reply_delay: Duration::from_millis(4000),
            final_reply_delay: Duration::from_millis(3000),
            payment_delay: Duration::from_millis(2000),
            history_capacity: 5,
        }
    }
}
