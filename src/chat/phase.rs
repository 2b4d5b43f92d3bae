//! Chat phase machine — tracks where a consultation chat is in its
//! fixed two-round exchange.

use serde::{Deserialize, Serialize};

/// The phases of a consultation chat.
///
/// Progresses linearly: WaitingFirstReply → Unlocked → WaitingFinalReply →
/// Complete. The user may type only while `Unlocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatPhase {
    WaitingFirstReply,
    Unlocked,
    WaitingFinalReply,
    Complete,
}

impl ChatPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: ChatPhase) -> bool {
        use ChatPhase::*;
        matches!(
            (self, target),
            (WaitingFirstReply, Unlocked)
                | (Unlocked, WaitingFinalReply)
                | (WaitingFinalReply, Complete)
        )
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(&self) -> Option<ChatPhase> {
        use ChatPhase::*;
        match self {
            WaitingFirstReply => Some(Unlocked),
            Unlocked => Some(WaitingFinalReply),
            WaitingFinalReply => Some(Complete),
            Complete => None,
        }
    }

    /// Whether this phase is terminal (the exchange is over).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether the input control should accept a user follow-up.
    pub fn input_open(&self) -> bool {
        matches!(self, Self::Unlocked)
    }

    /// Whether a clinician reply is pending (drives the typing indicator).
    pub fn clinician_typing(&self) -> bool {
        matches!(self, Self::WaitingFirstReply | Self::WaitingFinalReply)
    }
}

impl Default for ChatPhase {
    fn default() -> Self {
        Self::WaitingFirstReply
    }
}

impl std::fmt::Display for ChatPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::WaitingFirstReply => "waiting_first_reply",
            Self::Unlocked => "unlocked",
            Self::WaitingFinalReply => "waiting_final_reply",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}
