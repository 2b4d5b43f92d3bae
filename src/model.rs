//! Core data types: messages, sessions, support type.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message.
///
/// `System` is reserved for future notices (e.g. session banners); no
/// current transition produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Clinician,
    System,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Clinician => "clinician",
            Self::System => "system",
        };
        write!(f, "{s}")
    }
}

/// The consultation modality chosen in the concern step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    Chat,
    Video,
}

impl Default for SupportType {
    fn default() -> Self {
        Self::Chat
    }
}

impl std::fmt::Display for SupportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Chat => "chat",
            Self::Video => "video",
        };
        write!(f, "{s}")
    }
}

/// A single chat message.
///
/// Display order is insertion order in the owning transcript; the id is
/// only for identity, not ordering. Empty text is a valid degenerate value
/// at this level — input validation happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
        }
    }
}

/// A completed consultation, captured for the history view.
///
/// Created only when a chat session finishes its final exchange; immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationSession {
    pub id: Uuid,
    /// Local date the session completed, formatted for display.
    pub date: String,
    /// Full transcript in exchange order.
    pub messages: Vec<Message>,
}

impl ConsultationSession {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Local::now().format("%m/%d/%Y").to_string(),
            messages,
        }
    }
}
