//! Mock log event source for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::models::LogEvent;
use crate::traits::{LogEventSource, LogSink, LogSubscription};

/// Log source fed by the test.
///
/// Each subscription runs a forwarding task, so unsubscribing really stops
/// delivery. Payloads injected before any subscription are lost.
///
/// # Example
///
/// ```ignore
/// let source = MockLogSource::new();
/// // ... session.start() subscribes ...
/// source.inject_event(&event);
/// source.inject_raw("not json");
/// ```
#[derive(Debug, Clone)]
pub struct MockLogSource {
    tx: broadcast::Sender<String>,
    subscribe_calls: Arc<AtomicUsize>,
}

impl Default for MockLogSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLogSource {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self {
            tx,
            subscribe_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Deliver a raw payload to every live subscription.
    pub fn inject_raw(&self, payload: impl Into<String>) {
        // Ignore send errors (no subscribers)
        let _ = self.tx.send(payload.into());
    }

    pub fn inject_event(&self, event: &LogEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            self.inject_raw(payload);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }
}

impl LogEventSource for MockLogSource {
    fn subscribe(&self, _session_id: &str, sink: LogSink) -> LogSubscription {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        let mut rx = self.tx.subscribe();
        LogSubscription::from_task(tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(payload) => {
                        if !sink.deliver(payload) {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Mock log subscription lagged by {}", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }))
    }
}
