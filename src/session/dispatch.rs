//! Background calls to the command backend.
//!
//! Each call runs on its own task and reports back with a
//! [`SessionMessage`]. A send error only means the session is gone, so it
//! is ignored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::domain::{DisplayLine, LineOrigin};
use crate::error::ExecutorError;
use crate::models::CommandResult;
use crate::traits::CommandBackend;

use super::SessionMessage;

/// Run `command` with a timeout and report the outcome.
pub(crate) fn spawn_command(
    backend: Arc<dyn CommandBackend>,
    session_id: String,
    command: String,
    timeout: Duration,
    tx: UnboundedSender<SessionMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let call = backend.execute_command(&session_id, &command);
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ExecutorError::Timeout(timeout)),
        };
        if let Err(e) = &result {
            tracing::warn!(
                "Command failed [{}] for session {}: {}",
                e.error_code(),
                session_id,
                e
            );
        }
        let _ = tx.send(SessionMessage::CommandFinished { command, result });
    })
}

pub(crate) fn spawn_history_fetch(
    backend: Arc<dyn CommandBackend>,
    session_id: String,
    limit: usize,
    timeout: Duration,
    tx: UnboundedSender<SessionMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let call = backend.fetch_command_history(&session_id, limit);
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ExecutorError::Timeout(timeout)),
        };
        let _ = tx.send(SessionMessage::HistoryLoaded(result));
    })
}

pub(crate) fn spawn_history_clear(
    backend: Arc<dyn CommandBackend>,
    session_id: String,
    timeout: Duration,
    tx: UnboundedSender<SessionMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let call = backend.clear_command_history(&session_id);
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ExecutorError::Timeout(timeout)),
        };
        let _ = tx.send(SessionMessage::HistoryCleared(result));
    })
}

/// Display lines for a settled command.
///
/// One output line per non-empty output row, then an error line when the
/// exit code is non-zero. A failed call yields a single error line.
pub fn result_lines(result: &Result<CommandResult, ExecutorError>) -> Vec<DisplayLine> {
    match result {
        Ok(result) => {
            let mut lines: Vec<DisplayLine> = result
                .output_lines()
                .map(|line| DisplayLine::new(LineOrigin::CommandOutput, line))
                .collect();
            if !result.is_success() {
                lines.push(DisplayLine::new(
                    LineOrigin::CommandError,
                    format!("Command exited with code {}", result.exit_code),
                ));
            }
            lines
        }
        Err(e) => vec![DisplayLine::new(
            LineOrigin::CommandError,
            format!("Error: {}", e.user_message()),
        )],
    }
}
