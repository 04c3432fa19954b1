#![forbid(unsafe_code)]

//! Core library for the AI Coach workout feedback pipeline.
//!
//! This crate provides:
//! - Domain types (sessions, performed exercises, performed sets)
//! - Prompt formatting for a completed session
//! - The feedback client for the remote coaching endpoint
//! - Configuration, logging and session loading

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod session;
pub mod format;
pub mod feedback;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{Error, ErrorKind, FeedbackError, FeedbackResult, Result};
pub use types::*;
pub use config::{CoachConfig, Config};
pub use session::{load_session, parse_session};
pub use format::format_session;
pub use feedback::{parse_feedback, FeedbackClient, HealthStatus, NO_FEEDBACK_PLACEHOLDER};
