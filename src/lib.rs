//! Coddle Consult — headless consultation core.

pub mod chat;
pub mod checkout;
pub mod config;
pub mod context;
pub mod error;
pub mod history;
pub mod model;
pub mod replies;
pub mod wizard;
