//! Trait seams between the terminal core and its external collaborators.
//!
//! The session never talks to the network or the OS directly. It goes
//! through these traits so tests can drive it with in-memory doubles.
//!
//! # Traits
//!
//! - [`CommandBackend`] - execute commands, read and clear remote history
//! - [`LogEventSource`] - push subscription of structured log events
//! - [`ClipboardProvider`] - system clipboard for copying the scroll-back

pub mod backend;
pub mod clipboard;
pub mod log_source;

pub use backend::CommandBackend;
pub use clipboard::ClipboardProvider;
pub use log_source::{LogEventSource, LogSink, LogSubscription};
