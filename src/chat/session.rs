//! Chat turn-taking machine.
//!
//! A consultation chat is a fixed two-round exchange: the user's concern
//! opens the session, the clinician replies, the user sends one follow-up,
//! and the clinician's final reply closes it. Exactly four messages, always
//! user/clinician/user/clinician. This type is the pure synchronous core;
//! timing and persistence live in the driver.

use crate::error::ChatError;
use crate::model::{ConsultationSession, Message, Sender};
use crate::replies::ReplySlot;

use super::phase::ChatPhase;

/// One live consultation chat.
#[derive(Debug)]
pub struct ChatSession {
    phase: ChatPhase,
    messages: Vec<Message>,
    archived: bool,
}

impl ChatSession {
    /// Open a session with the user's concern as the first message.
    pub fn open(concern: impl Into<String>) -> Self {
        Self {
            phase: ChatPhase::WaitingFirstReply,
            messages: vec![Message::new(Sender::User, concern)],
            archived: false,
        }
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// The transcript so far, in exchange order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Apply a clinician reply arrival.
    ///
    /// Only accepted when the session is in the waiting phase matching the
    /// slot; duplicate or late arrivals return `false` and leave the session
    /// untouched. At-most-one delivery per slot is thus enforced here, not
    /// just by the scheduling driver.
    pub fn apply_reply(&mut self, slot: ReplySlot, text: impl Into<String>) -> bool {
        let target = match (slot, self.phase) {
            (ReplySlot::First, ChatPhase::WaitingFirstReply) => ChatPhase::Unlocked,
            (ReplySlot::Second, ChatPhase::WaitingFinalReply) => ChatPhase::Complete,
            _ => {
                tracing::debug!(%slot, phase = %self.phase, "Ignoring reply arrival out of phase");
                return false;
            }
        };

        self.messages.push(Message::new(Sender::Clinician, text));
        self.phase = target;
        tracing::info!(%slot, phase = %self.phase, "Clinician reply applied");
        true
    }

    /// Submit the user's single follow-up message.
    ///
    /// Rejected without any state change when the input is locked (any
    /// phase other than `Unlocked`) or the trimmed text is empty. The text
    /// is stored as submitted, untrimmed.
    pub fn submit_followup(&mut self, text: &str) -> Result<(), ChatError> {
        if !self.phase.input_open() {
            return Err(ChatError::InputLocked { phase: self.phase });
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyFollowup);
        }

        self.messages.push(Message::new(Sender::User, text));
        self.phase = ChatPhase::WaitingFinalReply;
        tracing::info!(phase = %self.phase, "Follow-up submitted");
        Ok(())
    }

    /// Hand off the finished transcript for archival, exactly once.
    ///
    /// Returns `None` before the session completes and on every call after
    /// the first successful one, so re-entering the completion path cannot
    /// duplicate a history entry.
    pub fn take_completed(&mut self) -> Option<ConsultationSession> {
        if !self.is_complete() || self.archived {
            return None;
        }
        self.archived = true;
        Some(ConsultationSession::new(self.messages.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed_session() -> ChatSession {
        let mut session = ChatSession::open("toddler won't sleep");
        assert!(session.apply_reply(ReplySlot::First, "first reply"));
        session.submit_followup("still happening").unwrap();
        assert!(session.apply_reply(ReplySlot::Second, "second reply"));
        session
    }

    #[test]
    fn opens_with_concern_as_user_message() {
        let session = ChatSession::open("toddler won't sleep");
        assert_eq!(session.phase(), ChatPhase::WaitingFirstReply);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::User);
        assert_eq!(session.messages()[0].text, "toddler won't sleep");
    }

    #[test]
    fn full_exchange_is_four_messages_in_sender_order() {
        let session = completed_session();
        assert_eq!(session.phase(), ChatPhase::Complete);

        let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::Clinician, Sender::User, Sender::Clinician]
        );
    }

    #[test]
    fn empty_followup_is_rejected_without_state_change() {
        let mut session = ChatSession::open("concern");
        session.apply_reply(ReplySlot::First, "reply");

        for input in ["", "   "] {
            let err = session.submit_followup(input).unwrap_err();
            assert_eq!(err, ChatError::EmptyFollowup);
            assert_eq!(session.phase(), ChatPhase::Unlocked);
            assert_eq!(session.messages().len(), 2);
        }
    }

    #[test]
    fn followup_rejected_when_input_locked() {
        let mut session = ChatSession::open("concern");
        assert_eq!(
            session.submit_followup("too early").unwrap_err(),
            ChatError::InputLocked {
                phase: ChatPhase::WaitingFirstReply
            }
        );
        assert_eq!(session.messages().len(), 1);

        session.apply_reply(ReplySlot::First, "reply");
        session.submit_followup("on time").unwrap();

        assert_eq!(
            session.submit_followup("second attempt").unwrap_err(),
            ChatError::InputLocked {
                phase: ChatPhase::WaitingFinalReply
            }
        );
        assert_eq!(session.messages().len(), 3);

        session.apply_reply(ReplySlot::Second, "final");
        assert_eq!(
            session.submit_followup("after complete").unwrap_err(),
            ChatError::InputLocked {
                phase: ChatPhase::Complete
            }
        );
        assert_eq!(session.messages().len(), 4);
    }

    #[test]
    fn followup_text_kept_untrimmed() {
        let mut session = ChatSession::open("concern");
        session.apply_reply(ReplySlot::First, "reply");
        session.submit_followup("  still happening  ").unwrap();
        assert_eq!(session.messages()[2].text, "  still happening  ");
    }

    #[test]
    fn duplicate_reply_arrivals_are_ignored() {
        let mut session = ChatSession::open("concern");
        assert!(session.apply_reply(ReplySlot::First, "reply"));
        assert!(!session.apply_reply(ReplySlot::First, "duplicate"));
        assert_eq!(session.phase(), ChatPhase::Unlocked);
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn reply_for_wrong_slot_is_ignored() {
        let mut session = ChatSession::open("concern");
        // Second reply cannot land before the first.
        assert!(!session.apply_reply(ReplySlot::Second, "out of order"));
        assert_eq!(session.phase(), ChatPhase::WaitingFirstReply);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn take_completed_yields_once() {
        let mut session = completed_session();

        let archived = session.take_completed().expect("first take should succeed");
        assert_eq!(archived.messages.len(), 4);
        assert!(session.take_completed().is_none());
    }

    #[test]
    fn take_completed_before_complete_is_none() {
        let mut session = ChatSession::open("concern");
        assert!(session.take_completed().is_none());
        session.apply_reply(ReplySlot::First, "reply");
        assert!(session.take_completed().is_none());
    }
}
