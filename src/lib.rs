//! projterm - an interactive project terminal for the TUI
//!
//! A line-editable command prompt whose commands run on a remote project
//! backend, merged with that project's live log stream. This library
//! exposes modules for use in integration tests and benches.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod input_history;
pub mod logging;
pub mod models;
pub mod session;
pub mod sse;
pub mod terminal;
pub mod traits;
pub mod ui;
