//! Concrete implementations of the trait seams in `crate::traits`.
//!
//! # Adapters
//!
//! - [`HttpCommandBackend`] - command execution and history over reqwest
//! - [`SseLogSource`] - log events from a Server-Sent Events stream
//! - [`SystemClipboard`] - OS clipboard through arboard
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides in-memory doubles for all three:
//! - [`mock::MockCommandBackend`] - scripted results, recorded calls
//! - [`mock::MockLogSource`] - payload injection
//! - [`mock::MockClipboard`] - captures copied text

pub mod http_backend;
pub mod mock;
pub mod sse_log_source;
pub mod system_clipboard;

pub use http_backend::HttpCommandBackend;
pub use mock::{MockClipboard, MockCommandBackend, MockLogSource, MockReply};
pub use sse_log_source::{backoff_delay, SseLogSource, SseLogSourceConfig};
pub use system_clipboard::SystemClipboard;
