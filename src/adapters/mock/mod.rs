//! Mock implementations for testing.
//!
//! These let the session be driven end to end without network or OS
//! access.
//!
//! # Available Mocks
//!
//! - [`MockCommandBackend`] - command backend with scripted results
//! - [`MockLogSource`] - log source with payload injection
//! - [`MockClipboard`] - clipboard that records what was copied

pub mod backend;
pub mod clipboard;
pub mod log_source;

pub use backend::{MockCommandBackend, MockReply};
pub use clipboard::MockClipboard;
pub use log_source::MockLogSource;
