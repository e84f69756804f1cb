use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced to callers of the client caches and helpers
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Deleting a user with a live subscription is refused before any request.
    #[error("Cannot delete {0}: the user has an active subscription")]
    ActiveSubscription(String),

    /// Non-success status; `message` is the server's `message`/`error` field
    /// when it sent one.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Session storage error: {0}")]
    Session(String),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the error was raised locally, with nothing sent to the server.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::ActiveSubscription(_) | ClientError::Session(_)
        )
    }
}
