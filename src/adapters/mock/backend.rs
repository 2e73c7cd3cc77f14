//! Mock command backend for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::ExecutorError;
use crate::models::CommandResult;
use crate::traits::CommandBackend;

/// How the mock answers a command.
#[derive(Debug, Clone)]
pub enum MockReply {
    Result(CommandResult),
    Error(ExecutorError),
    /// Never settles. Exercises the session's timeout.
    Hang,
}

/// Command backend with scripted replies.
///
/// Unscripted commands succeed with empty output. Every call is recorded.
///
/// # Example
///
/// ```ignore
/// let backend = MockCommandBackend::new();
/// backend.set_result("echo hi", CommandResult::new("hi", 0));
/// backend.set_history(vec!["ls".into()]);
/// ```
#[derive(Debug, Clone)]
pub struct MockCommandBackend {
    replies: Arc<Mutex<HashMap<String, MockReply>>>,
    default_reply: Arc<Mutex<Option<MockReply>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    history: Arc<Mutex<Result<Vec<String>, ExecutorError>>>,
    clear_result: Arc<Mutex<Result<(), ExecutorError>>>,
    executed: Arc<Mutex<Vec<(String, String)>>>,
    clear_calls: Arc<Mutex<usize>>,
    history_limits: Arc<Mutex<Vec<usize>>>,
    history_hangs: Arc<Mutex<bool>>,
}

impl Default for MockReply {
    fn default() -> Self {
        MockReply::Result(CommandResult::new("", 0))
    }
}

impl Default for MockCommandBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommandBackend {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(HashMap::new())),
            default_reply: Arc::new(Mutex::new(None)),
            delay: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(Ok(Vec::new()))),
            clear_result: Arc::new(Mutex::new(Ok(()))),
            executed: Arc::new(Mutex::new(Vec::new())),
            clear_calls: Arc::new(Mutex::new(0)),
            history_limits: Arc::new(Mutex::new(Vec::new())),
            history_hangs: Arc::new(Mutex::new(false)),
        }
    }

    pub fn set_reply(&self, command: &str, reply: MockReply) {
        self.replies
            .lock()
            .unwrap()
            .insert(command.to_string(), reply);
    }

    pub fn set_result(&self, command: &str, result: CommandResult) {
        self.set_reply(command, MockReply::Result(result));
    }

    pub fn set_error(&self, command: &str, error: ExecutorError) {
        self.set_reply(command, MockReply::Error(error));
    }

    /// Reply used for commands without a scripted one.
    pub fn set_default_reply(&self, reply: MockReply) {
        *self.default_reply.lock().unwrap() = Some(reply);
    }

    /// Delay every command reply.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Remote history, most recent first.
    pub fn set_history(&self, entries: Vec<String>) {
        *self.history.lock().unwrap() = Ok(entries);
    }

    pub fn set_history_error(&self, error: ExecutorError) {
        *self.history.lock().unwrap() = Err(error);
    }

    /// Make history fetches never return.
    pub fn set_history_hang(&self) {
        *self.history_hangs.lock().unwrap() = true;
    }

    pub fn set_clear_error(&self, error: ExecutorError) {
        *self.clear_result.lock().unwrap() = Err(error);
    }

    /// `(session_id, command)` pairs in call order.
    pub fn executed(&self) -> Vec<(String, String)> {
        self.executed.lock().unwrap().clone()
    }

    pub fn executed_commands(&self) -> Vec<String> {
        self.executed().into_iter().map(|(_, cmd)| cmd).collect()
    }

    pub fn clear_calls(&self) -> usize {
        *self.clear_calls.lock().unwrap()
    }

    /// Limits passed to history fetches.
    pub fn history_fetches(&self) -> Vec<usize> {
        self.history_limits.lock().unwrap().clone()
    }

    fn reply_for(&self, command: &str) -> MockReply {
        if let Some(reply) = self.replies.lock().unwrap().get(command) {
            return reply.clone();
        }
        self.default_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CommandBackend for MockCommandBackend {
    async fn execute_command(
        &self,
        session_id: &str,
        command: &str,
    ) -> Result<CommandResult, ExecutorError> {
        self.executed
            .lock()
            .unwrap()
            .push((session_id.to_string(), command.to_string()));

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.reply_for(command) {
            MockReply::Result(result) => Ok(result),
            MockReply::Error(error) => Err(error),
            MockReply::Hang => std::future::pending().await,
        }
    }

    async fn fetch_command_history(
        &self,
        _session_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, ExecutorError> {
        self.history_limits.lock().unwrap().push(limit);
        let hangs = *self.history_hangs.lock().unwrap();
        if hangs {
            std::future::pending::<()>().await;
        }
        self.history
            .lock()
            .unwrap()
            .clone()
            .map(|entries| entries.into_iter().take(limit).collect())
    }

    async fn clear_command_history(&self, _session_id: &str) -> Result<(), ExecutorError> {
        *self.clear_calls.lock().unwrap() += 1;
        let result = self.clear_result.lock().unwrap().clone();
        if result.is_ok() {
            if let Ok(history) = self.history.lock().unwrap().as_mut() {
                history.clear();
            }
        }
        result
    }
}
