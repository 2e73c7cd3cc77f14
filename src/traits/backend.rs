//! Command executor abstraction.

use async_trait::async_trait;

use crate::error::ExecutorError;
use crate::models::CommandResult;

/// Remote capability that runs commands for a terminal session.
///
/// Failures must surface as `Err`, never as an empty `Ok` result.
///
/// # Example
///
/// ```ignore
/// use projterm::traits::CommandBackend;
///
/// async fn run<B: CommandBackend>(backend: &B) {
///     match backend.execute_command("sess-1", "ls -la").await {
///         Ok(result) => println!("{} (exit {})", result.output, result.exit_code),
///         Err(e) => eprintln!("{}", e.user_message()),
///     }
/// }
/// ```
#[async_trait]
pub trait CommandBackend: Send + Sync {
    /// Run `command` in the session's container and return its output.
    async fn execute_command(
        &self,
        session_id: &str,
        command: &str,
    ) -> Result<CommandResult, ExecutorError>;

    /// Prior commands of this session, most recent first, at most `limit`.
    async fn fetch_command_history(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, ExecutorError>;

    /// Forget the session's stored command history.
    async fn clear_command_history(&self, session_id: &str) -> Result<(), ExecutorError>;
}
