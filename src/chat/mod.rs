//! Consultation chat: turn-taking machine, phases, and the timer-driven
//! reply simulation.

pub mod driver;
pub mod phase;
pub mod session;

pub use driver::{ChatDriver, ChatEvent};
pub use phase::ChatPhase;
pub use session::ChatSession;
