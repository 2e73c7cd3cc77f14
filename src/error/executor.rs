//! Errors from the remote command executor.

use std::time::Duration;

use thiserror::Error;

/// Failure of a command backend call.
///
/// A non-zero exit code is not an `ExecutorError`: it is a successful call
/// whose [`CommandResult`](crate::models::CommandResult) carries the code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutorError {
    /// The call did not settle within the configured timeout.
    #[error("command timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The backend answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend answered with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

impl ExecutorError {
    /// Check if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExecutorError::Timeout(_) | ExecutorError::Connection(_) => true,
            ExecutorError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Human-readable reason shown in the terminal.
    pub fn user_message(&self) -> String {
        match self {
            ExecutorError::Timeout(duration) => {
                format!("Command timed out after {}s", duration.as_secs())
            }
            ExecutorError::Connection(message) => {
                format!("Could not reach the project: {}", message)
            }
            ExecutorError::Server { status, message } if message.is_empty() => {
                format!("Server error ({})", status)
            }
            ExecutorError::Server { status, message } => {
                format!("Server error ({}): {}", status, message)
            }
            ExecutorError::InvalidResponse(message) => {
                format!("Unexpected response from server: {}", message)
            }
            ExecutorError::Other(message) => message.clone(),
        }
    }

    /// Short code for logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ExecutorError::Timeout(_) => "E_EXEC_TIMEOUT",
            ExecutorError::Connection(_) => "E_EXEC_CONN",
            ExecutorError::Server { .. } => "E_EXEC_SERVER",
            ExecutorError::InvalidResponse(_) => "E_EXEC_RESPONSE",
            ExecutorError::Other(_) => "E_EXEC_OTHER",
        }
    }
}

impl From<reqwest::Error> for ExecutorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExecutorError::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ExecutorError::Server {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ExecutorError::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            ExecutorError::Timeout(Duration::from_secs(30)).user_message(),
            "Command timed out after 30s"
        );
        assert_eq!(
            ExecutorError::Server {
                status: 502,
                message: String::new()
            }
            .user_message(),
            "Server error (502)"
        );
        assert_eq!(
            ExecutorError::Other("container is stopped".to_string()).user_message(),
            "container is stopped"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ExecutorError::Connection("refused".into()).is_retryable());
        assert!(ExecutorError::Server {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());
        assert!(!ExecutorError::Server {
            status: 404,
            message: "no such session".into()
        }
        .is_retryable());
        assert!(!ExecutorError::InvalidResponse("eof".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ExecutorError::Timeout(Duration::from_secs(5)).to_string(),
            "command timed out after 5s"
        );
        assert_eq!(ExecutorError::Timeout(Duration::ZERO).error_code(), "E_EXEC_TIMEOUT");
    }
}
