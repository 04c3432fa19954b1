//! Error types for the coach_core library.

use std::fmt;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a single feedback request
pub type FeedbackResult = std::result::Result<String, FeedbackError>;

/// Core error type for coach_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file could not be read as a workout session
    #[error("Session error: {0}")]
    Session(String),

    /// Feedback request failed
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of a feedback failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The deadline elapsed before any response
    Timeout,
    /// The endpoint answered but signaled failure
    ServiceError,
    /// The request could not complete at the network level
    TransportError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::ServiceError => "service error",
            ErrorKind::TransportError => "transport error",
        };
        f.write_str(s)
    }
}

/// Normalized failure of a feedback request.
///
/// The `Display` output is the message shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    #[error("AI Coach request timed out. Please try again.")]
    Timeout { after_ms: u64 },

    /// `status` is set when the endpoint answered with a non-success code
    #[error("{message}")]
    Service { status: Option<u16>, message: String },

    #[error("Failed to get AI coach feedback: {0}")]
    Transport(String),
}

impl FeedbackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedbackError::Timeout { .. } => ErrorKind::Timeout,
            FeedbackError::Service { .. } => ErrorKind::ServiceError,
            FeedbackError::Transport(_) => ErrorKind::TransportError,
        }
    }

    /// HTTP status carried by a service error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedbackError::Service { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn http_status(code: u16, reason: &str) -> Self {
        FeedbackError::Service {
            status: Some(code),
            message: format!("AI Coach API error: {} {}", code, reason)
                .trim_end()
                .to_string(),
        }
    }

    pub(crate) fn remote(message: &str) -> Self {
        FeedbackError::Service {
            status: None,
            message: format!("AI Coach error: {}", message),
        }
    }

    pub(crate) fn unreadable(detail: impl fmt::Display) -> Self {
        FeedbackError::Service {
            status: None,
            message: format!("AI Coach returned an unreadable response: {}", detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        assert_eq!(FeedbackError::Timeout { after_ms: 1 }.kind(), ErrorKind::Timeout);
        assert_eq!(FeedbackError::remote("x").kind(), ErrorKind::ServiceError);
        assert_eq!(
            FeedbackError::Transport("refused".into()).kind(),
            ErrorKind::TransportError
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FeedbackError::Timeout { after_ms: 480_000 }.to_string(),
            "AI Coach request timed out. Please try again."
        );
        assert_eq!(
            FeedbackError::http_status(500, "Internal Server Error").to_string(),
            "AI Coach API error: 500 Internal Server Error"
        );
        assert_eq!(FeedbackError::http_status(599, "").to_string(), "AI Coach API error: 599");
        assert_eq!(
            FeedbackError::Transport("connection refused".into()).to_string(),
            "Failed to get AI coach feedback: connection refused"
        );
    }

    #[test]
    fn test_status_only_on_http_failures() {
        assert_eq!(FeedbackError::http_status(503, "Service Unavailable").status(), Some(503));
        assert_eq!(FeedbackError::remote("model offline").status(), None);
        assert_eq!(FeedbackError::Timeout { after_ms: 5 }.status(), None);
    }
}
