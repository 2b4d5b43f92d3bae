//! Clinician reply source — the seam between the turn-taking machine and
//! whatever produces reply text.
//!
//! The shipped implementation is scripted: two fixed strings standing in
//! for a real clinician backend. Swapping in a live source only requires a
//! new `ReplySource` impl; the machine and driver are unchanged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which of the two clinician replies is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySlot {
    First,
    Second,
}

impl std::fmt::Display for ReplySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::First => "first",
            Self::Second => "second",
        };
        write!(f, "{s}")
    }
}

/// Provides clinician reply text for a given slot.
#[async_trait]
pub trait ReplySource: Send + Sync {
    async fn reply_for(&self, slot: ReplySlot) -> String;
}

/// The default scripted reply source.
pub struct ScriptedReplies;

const FIRST_REPLY: &str = "Hi there. I understand this is stressful. Based on what you've shared, it sounds like typical regression. Have there been any recent changes in the household?";

const SECOND_REPLY: &str = "Thanks for sharing that. It does confirm my suspicion. I recommend sticking to a consistent routine for 3 days. If it persists, let's do a video check-in.";

#[async_trait]
impl ReplySource for ScriptedReplies {
    async fn reply_for(&self, slot: ReplySlot) -> String {
        match slot {
            ReplySlot::First => FIRST_REPLY.to_string(),
            ReplySlot::Second => SECOND_REPLY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replies_differ_per_slot() {
        let source = ScriptedReplies;
        let first = source.reply_for(ReplySlot::First).await;
        let second = source.reply_for(ReplySlot::Second).await;
        assert!(!first.is_empty());
        assert!(!second.is_empty());
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn scripted_replies_are_stable() {
        let source = ScriptedReplies;
        let a = source.reply_for(ReplySlot::First).await;
        let b = source.reply_for(ReplySlot::First).await;
        assert_eq!(a, b);
    }
}
