//! Messages into and notices out of a [`Session`](super::Session).

use crate::error::ExecutorError;
use crate::models::CommandResult;

use super::fit::Viewport;

/// Results of background work, delivered to the session on the event loop.
///
/// Every task spawned by the session (command dispatch, history calls, the
/// log subscription) reports back through one of these. The session applies
/// them in arrival order, so the display buffer never sees concurrent writes.
#[derive(Debug, Clone)]
pub enum SessionMessage {
    /// Raw JSON payload of one log event
    LogPayload(String),
    /// A dispatched command settled
    CommandFinished {
        command: String,
        result: Result<CommandResult, ExecutorError>,
    },
    /// Remote history fetched at startup
    HistoryLoaded(Result<Vec<String>, ExecutorError>),
    /// Remote history clear settled
    HistoryCleared(Result<(), ExecutorError>),
}

/// Things the host should react to after the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionNotice {
    /// The display buffer was emptied.
    Cleared,
    /// A stream event arrived; follow the newest line.
    ScrollToBottom,
    /// Ready for the next command; draw a fresh prompt.
    PromptReady,
    /// A debounced fit settled on a new viewport.
    Resized(Viewport),
}
