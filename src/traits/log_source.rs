//! Log event subscription abstraction.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session::SessionMessage;

/// Delivery end handed to a [`LogEventSource`].
///
/// Payloads are the raw JSON bodies of log events. Parsing and validation
/// happen on the session side so malformed events are dropped in one place.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: mpsc::UnboundedSender<SessionMessage>,
}

impl LogSink {
    pub fn new(tx: mpsc::UnboundedSender<SessionMessage>) -> Self {
        Self { tx }
    }

    /// Push one raw event payload. Returns false once the session is gone.
    pub fn deliver(&self, payload: impl Into<String>) -> bool {
        self.tx
            .send(SessionMessage::LogPayload(payload.into()))
            .is_ok()
    }

    /// Whether the receiving session has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Handle to a live subscription. Dropping it unsubscribes.
#[derive(Debug, Default)]
pub struct LogSubscription {
    task: Option<JoinHandle<()>>,
}

impl LogSubscription {
    /// Subscription driven by a background task.
    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Subscription with nothing to tear down.
    pub fn detached() -> Self {
        Self { task: None }
    }

    /// Stop receiving events. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Push source of [`LogEvent`](crate::models::LogEvent)s for a session.
///
/// Implementations own their retry policy. Delivery may repeat or reorder
/// events; the session tolerates both.
pub trait LogEventSource: Send + Sync {
    /// Start pushing events for `session_id` into `sink`.
    ///
    /// Must be called from within a tokio runtime.
    fn subscribe(&self, session_id: &str, sink: LogSink) -> LogSubscription;
}
