//! Data types exchanged with the remote project API.
//!
//! These are read-only to the terminal core: the executor produces
//! [`CommandResult`]s and the log source produces [`LogEvent`]s.

mod command;
mod log_event;

pub use command::{CommandRequest, CommandResult, HistoryResponse};
pub use log_event::{LogEvent, LogLevel, LogSource};
