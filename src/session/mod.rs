//! The terminal session controller.
//!
//! A [`Session`] owns everything one terminal view needs: the pending input
//! line, the display buffer, the working path, command history and the log
//! subscription. It is driven from a single event loop:
//!
//! - input units go through [`Session::handle_input`]
//! - background results arrive as [`SessionMessage`]s through
//!   [`Session::handle_message`]
//! - the loop's tick calls [`Session::tick`] to settle debounced fits
//!
//! The host reads [`SessionNotice`]s with [`Session::take_notices`] after
//! each step.

pub mod dispatch;
pub mod export;
pub mod fit;
pub mod messages;
pub mod reconciler;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use tokio::sync::mpsc;

use crate::domain::{DisplayBuffer, DisplayLine, EditOutcome, LineEditor, LineOrigin, PendingLine, WorkingPath};
use crate::error::{ClipboardError, ExportError};
use crate::input::InputUnit;
use crate::input_history::{CommandHistory, MAX_HISTORY_SIZE};
use crate::traits::{ClipboardProvider, CommandBackend, LogEventSource, LogSink, LogSubscription};

pub use fit::{FitDebouncer, Viewport, FIT_DEBOUNCE};
pub use messages::{SessionMessage, SessionNotice};
pub use reconciler::{StreamReconciler, DEFAULT_DEDUP_WINDOW};

/// Default limit for a single command round-trip.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(120);

/// Dispatch state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A command or history call is in flight. Enter is held until it settles.
    Dispatching,
}

/// Tunables for one session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Directory for a bare `cd` and the starting path.
    pub home: WorkingPath,
    pub command_timeout: Duration,
    /// Recent events remembered for duplicate suppression (0 disables).
    pub dedup_window: usize,
    pub history_limit: usize,
    pub fit_debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            home: WorkingPath::root(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            dedup_window: DEFAULT_DEDUP_WINDOW,
            history_limit: MAX_HISTORY_SIZE,
            fit_debounce: FIT_DEBOUNCE,
        }
    }
}

/// Built-in commands handled without the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Builtin<'a> {
    Clear,
    ResetHistory,
    ChangeDir(&'a str),
}

fn parse_builtin(line: &str) -> Option<Builtin<'_>> {
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };
    match name {
        "clear" if arg.is_empty() => Some(Builtin::Clear),
        "reset" | "clear-history" if arg.is_empty() => Some(Builtin::ResetHistory),
        "cd" => Some(Builtin::ChangeDir(arg)),
        _ => None,
    }
}

/// One live terminal view bound to a project session.
pub struct Session {
    session_id: String,
    options: SessionOptions,
    backend: Arc<dyn CommandBackend>,
    log_source: Arc<dyn LogEventSource>,
    clipboard: Arc<dyn ClipboardProvider>,

    path: WorkingPath,
    history: CommandHistory,
    editor: LineEditor,
    buffer: DisplayBuffer,
    reconciler: StreamReconciler,
    state: SessionState,
    fit: FitDebouncer,
    viewport: Viewport,
    notices: Vec<SessionNotice>,

    subscription: Option<LogSubscription>,
    mounted: bool,
    /// Set once a history reset is issued; a later startup fetch is stale.
    history_reset: bool,

    message_tx: mpsc::UnboundedSender<SessionMessage>,
    /// Taken by the event loop with [`Session::take_message_rx`].
    message_rx: Option<mpsc::UnboundedReceiver<SessionMessage>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("path", &self.path)
            .field("state", &self.state)
            .field("lines", &self.buffer.len())
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl Session {
    pub fn new(
        session_id: impl Into<String>,
        backend: Arc<dyn CommandBackend>,
        log_source: Arc<dyn LogEventSource>,
        clipboard: Arc<dyn ClipboardProvider>,
        options: SessionOptions,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            session_id: session_id.into(),
            path: options.home.clone(),
            history: CommandHistory::with_capacity(options.history_limit),
            editor: LineEditor::new(),
            buffer: DisplayBuffer::new(),
            reconciler: StreamReconciler::new(options.dedup_window),
            state: SessionState::Idle,
            fit: FitDebouncer::new(options.fit_debounce),
            viewport: Viewport::default(),
            notices: Vec::new(),
            subscription: None,
            mounted: false,
            history_reset: false,
            backend,
            log_source,
            clipboard,
            options,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// Take the receiving end of the message channel. Returns None after the
    /// first call.
    pub fn take_message_rx(&mut self) -> Option<mpsc::UnboundedReceiver<SessionMessage>> {
        self.message_rx.take()
    }

    /// A sender for delivering messages from outside the session.
    pub fn message_sender(&self) -> mpsc::UnboundedSender<SessionMessage> {
        self.message_tx.clone()
    }

    /// Mount the session: subscribe to logs and seed history.
    ///
    /// Must be called from within a tokio runtime. Calling it twice is a no-op.
    pub fn start(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::info!("Starting terminal session {}", self.session_id);

        let sink = LogSink::new(self.message_tx.clone());
        self.subscription = Some(self.log_source.subscribe(&self.session_id, sink));

        dispatch::spawn_history_fetch(
            Arc::clone(&self.backend),
            self.session_id.clone(),
            self.options.history_limit,
            self.options.command_timeout,
            self.message_tx.clone(),
        );
        self.notices.push(SessionNotice::PromptReady);
    }

    /// Tear down: unsubscribe from logs and drop any pending fit.
    ///
    /// Messages that arrive afterwards are ignored.
    pub fn unmount(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.fit.cancel();
        self.mounted = false;
        tracing::info!("Unmounted terminal session {}", self.session_id);
    }

    /// Apply one input unit to the pending line.
    pub fn handle_input(&mut self, unit: InputUnit) -> EditOutcome {
        // The editor would reset the pending line on Enter; keep it for later
        if unit == InputUnit::Enter && self.is_dispatching() {
            tracing::debug!("Enter held while a command is in flight");
            return EditOutcome::Unchanged;
        }
        let outcome = self.editor.handle(unit, &mut self.history);
        match &outcome {
            EditOutcome::Submit(line) => self.submit(line),
            EditOutcome::Interrupt(discarded) => {
                let echo = format!("{}{}^C", self.prompt(), discarded);
                self.buffer.append(DisplayLine::new(LineOrigin::Prompt, echo));
                if !self.is_dispatching() {
                    self.notices.push(SessionNotice::PromptReady);
                }
            }
            EditOutcome::ClearScreen => self.clear_terminal(),
            EditOutcome::Redraw | EditOutcome::Unchanged => {}
        }
        outcome
    }

    /// Submit a finalized line.
    ///
    /// Blank lines do nothing, and so does anything submitted while a call
    /// is still in flight. Otherwise the line is recorded in history, echoed,
    /// and then run as a built-in or dispatched to the backend.
    pub fn submit(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        if self.is_dispatching() {
            tracing::debug!("Submit ignored while a command is in flight");
            return;
        }
        self.history.push(line);
        let echo = format!("{}{}", self.prompt(), line);
        self.buffer.append(DisplayLine::new(LineOrigin::EchoedInput, echo));

        match parse_builtin(line.trim()) {
            Some(Builtin::Clear) => {
                self.clear_terminal();
                self.notices.push(SessionNotice::PromptReady);
            }
            Some(Builtin::ResetHistory) => {
                self.history_reset = true;
                self.state = SessionState::Dispatching;
                dispatch::spawn_history_clear(
                    Arc::clone(&self.backend),
                    self.session_id.clone(),
                    self.options.command_timeout,
                    self.message_tx.clone(),
                );
            }
            Some(Builtin::ChangeDir(arg)) => {
                self.path.change_dir(arg, &self.options.home);
                tracing::debug!("Working path is now {}", self.path);
                self.notices.push(SessionNotice::PromptReady);
            }
            None => self.dispatch(line.trim()),
        }
    }

    fn dispatch(&mut self, command: &str) {
        self.buffer.append(DisplayLine::new(
            LineOrigin::System,
            format!("Executing: {}", command),
        ));
        self.state = SessionState::Dispatching;
        tracing::info!("Dispatching command for session {}", self.session_id);
        dispatch::spawn_command(
            Arc::clone(&self.backend),
            self.session_id.clone(),
            command.to_string(),
            self.options.command_timeout,
            self.message_tx.clone(),
        );
    }

    /// Apply a background result.
    pub fn handle_message(&mut self, message: SessionMessage) {
        if !self.mounted {
            tracing::debug!("Ignoring message for unmounted session");
            return;
        }
        match message {
            SessionMessage::LogPayload(payload) => {
                if let Some(line) = self.reconciler.reconcile(&payload) {
                    self.buffer.append(line);
                    self.notices.push(SessionNotice::ScrollToBottom);
                }
            }
            SessionMessage::CommandFinished { command, result } => {
                tracing::debug!("Command settled: {}", command);
                for line in dispatch::result_lines(&result) {
                    self.buffer.append(line);
                }
                self.rearm();
            }
            SessionMessage::HistoryLoaded(Ok(_)) if self.history_reset => {
                tracing::debug!("Dropping history fetched before a reset");
            }
            SessionMessage::HistoryLoaded(Ok(remote)) => {
                // Anything submitted before the fetch settled stays newest
                self.history.extend_older(remote);
                tracing::debug!("Seeded {} history entries", self.history.len());
            }
            SessionMessage::HistoryLoaded(Err(e)) => {
                tracing::warn!("Could not load command history: {}", e);
            }
            SessionMessage::HistoryCleared(Ok(())) => {
                self.history.clear();
                self.buffer
                    .append(DisplayLine::new(LineOrigin::System, "Command history cleared"));
                self.rearm();
            }
            SessionMessage::HistoryCleared(Err(e)) => {
                self.buffer.append(DisplayLine::new(
                    LineOrigin::CommandError,
                    format!("Failed to clear history: {}", e.user_message()),
                ));
                self.rearm();
            }
        }
    }

    fn rearm(&mut self) {
        self.state = SessionState::Idle;
        self.notices.push(SessionNotice::PromptReady);
    }

    /// Empty the display buffer. History and the pending line are kept.
    pub fn clear_terminal(&mut self) {
        self.buffer.clear();
        self.notices.push(SessionNotice::Cleared);
    }

    /// Request a debounced fit to `cols` x `rows`.
    pub fn fit(&mut self, cols: u16, rows: u16) {
        self.fit_at(cols, rows, Instant::now());
    }

    pub fn fit_at(&mut self, cols: u16, rows: u16, now: Instant) {
        self.fit.request(Viewport::new(cols, rows), now);
    }

    /// Settle time-based work. Called from the event loop tick.
    pub fn tick(&mut self, now: Instant) {
        if let Some(viewport) = self.fit.poll(now) {
            if viewport != self.viewport {
                self.viewport = viewport;
                self.notices.push(SessionNotice::Resized(viewport));
            }
        }
    }

    /// Export form of the scroll-back.
    pub fn export_logs(&self) -> String {
        self.buffer.export()
    }

    /// Put the export on the system clipboard. Returns the number of lines.
    pub fn copy_content(&self) -> Result<usize, ClipboardError> {
        self.clipboard.set_text(&self.export_logs())?;
        Ok(self.buffer.len())
    }

    /// Write the export to a timestamped file in `dir`.
    pub fn save_export(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export::write_export(dir, &self.session_id, &self.export_logs(), Local::now())
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Prompt shown before the pending line.
    pub fn prompt(&self) -> String {
        format!("{} $ ", self.path)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> &WorkingPath {
        &self.path
    }

    pub fn pending_line(&self) -> &PendingLine {
        self.editor.line()
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dispatching(&self) -> bool {
        self.state == SessionState::Dispatching
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(LogSubscription::is_active)
    }

    pub fn has_pending_fit(&self) -> bool {
        self.fit.is_pending()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.mounted {
            self.unmount();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin() {
        assert_eq!(parse_builtin("clear"), Some(Builtin::Clear));
        assert_eq!(parse_builtin("reset"), Some(Builtin::ResetHistory));
        assert_eq!(parse_builtin("clear-history"), Some(Builtin::ResetHistory));
        assert_eq!(parse_builtin("cd"), Some(Builtin::ChangeDir("")));
        assert_eq!(parse_builtin("cd   ../x "), Some(Builtin::ChangeDir("../x")));
        assert_eq!(parse_builtin("clear now"), None);
        assert_eq!(parse_builtin("cdx"), None);
        assert_eq!(parse_builtin("echo hi"), None);
    }
}
