//! Shared fixtures for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let mut t = TestSession::new();
//! t.session.start();
//! t.submit("echo hi");
//! t.settle().await;
//! ```

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::mpsc::UnboundedReceiver;

use projterm::adapters::{MockClipboard, MockCommandBackend, MockLogSource};
use projterm::domain::LineOrigin;
use projterm::input::InputUnit;
use projterm::models::{LogEvent, LogLevel, LogSource};
use projterm::session::{Session, SessionMessage, SessionOptions};

/// How long to wait for a background message before failing.
pub const MESSAGE_WAIT: Duration = Duration::from_secs(2);

/// A session wired to mocks, plus handles to those mocks.
pub struct TestSession {
    pub session: Session,
    pub backend: MockCommandBackend,
    pub logs: MockLogSource,
    pub clipboard: MockClipboard,
    pub rx: UnboundedReceiver<SessionMessage>,
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    pub fn with_options(options: SessionOptions) -> Self {
        let backend = MockCommandBackend::new();
        let logs = MockLogSource::new();
        let clipboard = MockClipboard::new();
        let mut session = Session::new(
            "test-session",
            Arc::new(backend.clone()),
            Arc::new(logs.clone()),
            Arc::new(clipboard.clone()),
            options,
        );
        let rx = session
            .take_message_rx()
            .expect("message receiver is available once");
        Self {
            session,
            backend,
            logs,
            clipboard,
            rx,
        }
    }

    /// Start the session and apply the initial history fetch.
    pub async fn started() -> Self {
        let mut t = Self::new();
        t.session.start();
        t.pump_one().await;
        t
    }

    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.session.handle_input(InputUnit::Char(c));
        }
    }

    /// Type `line` and press Enter.
    pub fn submit(&mut self, line: &str) {
        self.type_text(line);
        self.session.handle_input(InputUnit::Enter);
    }

    /// Wait for the next background message and apply it.
    pub async fn pump_one(&mut self) -> SessionMessage {
        let message = tokio::time::timeout(MESSAGE_WAIT, self.rx.recv())
            .await
            .expect("timed out waiting for a session message")
            .expect("session channel closed");
        self.session.handle_message(message.clone());
        message
    }

    /// Apply messages until the session is idle again.
    pub async fn settle(&mut self) {
        while self.session.is_dispatching() {
            self.pump_one().await;
        }
    }

    /// Apply whatever has already arrived without waiting.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.session.handle_message(message);
            count += 1;
        }
        count
    }

    pub fn contents(&self) -> Vec<String> {
        self.session
            .buffer()
            .lines()
            .iter()
            .map(|line| line.content.clone())
            .collect()
    }

    pub fn origins(&self) -> Vec<LineOrigin> {
        self.session
            .buffer()
            .lines()
            .iter()
            .map(|line| line.origin)
            .collect()
    }
}

/// A log event at a fixed instant.
pub fn log_event(message: &str, level: LogLevel, source: LogSource) -> LogEvent {
    LogEvent::new(
        message,
        level,
        source,
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    )
}

/// Same as [`log_event`] but `seconds` later, so events are distinct.
pub fn log_event_at(message: &str, seconds: u32) -> LogEvent {
    LogEvent::new(
        message,
        LogLevel::Info,
        LogSource::Runtime,
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, seconds).unwrap(),
    )
}
