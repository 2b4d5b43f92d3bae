//! Error types for Coddle Consult.

use crate::chat::phase::ChatPhase;

/// Top-level error type for the consultation core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Context error: {0}")]
    Context(#[from] ContextError),
}

/// Chat turn-taking errors. These are validation outcomes surfaced to the
/// user; the session state is unchanged when they occur.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("Follow-up message is empty")]
    EmptyFollowup,

    #[error("Input is locked while the chat is {phase}")]
    InputLocked { phase: ChatPhase },
}

/// Checkout step errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Please acknowledge the consent form to proceed.")]
    ConsentRequired,
}

/// Wizard step validation errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please describe your concern to proceed.")]
    EmptyConcern,
}

/// Consultation-context wiring errors. These signal a programming defect
/// (a consumer outliving the context scope), not a recoverable condition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Consultation context accessed outside its scope")]
    ScopeEnded,
}

/// Result type alias for the consultation core.
pub type Result<T> = std::result::Result<T, Error>;
