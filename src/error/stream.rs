//! Errors raised while maintaining the log event subscription.

use thiserror::Error;

/// Log stream failures. These never reach the display buffer; the log source
/// task logs them and reconnects.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StreamError {
    #[error("failed to connect to log stream: {0}")]
    Connect(String),

    #[error("log stream returned status {status}")]
    Http { status: u16 },

    #[error("malformed {event_type} event: {message}")]
    Parse { event_type: String, message: String },

    #[error("log stream closed by server")]
    Closed,
}

impl StreamError {
    /// Whether the subscription should try to reconnect after this error.
    pub fn should_reconnect(&self) -> bool {
        match self {
            StreamError::Connect(_) | StreamError::Closed => true,
            StreamError::Http { status } => *status >= 500 || *status == 429,
            StreamError::Parse { .. } => false,
        }
    }
}

impl From<reqwest::Error> for StreamError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => StreamError::Http {
                status: status.as_u16(),
            },
            None => StreamError::Connect(err.to_string()),
        }
    }
}
