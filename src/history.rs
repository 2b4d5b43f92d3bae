//! Session history store — bounded, newest-first list of completed
//! consultations.

use crate::model::ConsultationSession;

/// Retains the most recent completed sessions, newest first.
///
/// Order is strictly insertion order (newest at index 0), never a
/// timestamp sort. When an insert pushes the list past capacity the oldest
/// entries are dropped from the tail. Stored sessions are immutable; the
/// only removal path is capacity eviction.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    capacity: usize,
    sessions: Vec<ConsultationSession>,
}

impl SessionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sessions: Vec::new(),
        }
    }

    /// Insert a completed session at the front, evicting from the tail if
    /// the list exceeds capacity.
    pub fn add(&mut self, session: ConsultationSession) {
        self.sessions.insert(0, session);
        self.sessions.truncate(self.capacity);
    }

    /// Snapshot of the current history, newest first. Mutating the
    /// returned vector does not affect the store.
    pub fn sessions(&self) -> Vec<ConsultationSession> {
        self.sessions.clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new(5)
    }
}
