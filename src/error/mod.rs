//! Error types for the terminal session subsystem.
//!
//! None of these are fatal to the host: dispatch failures become a single
//! error line in the display buffer, stream failures are absorbed by the log
//! source task, and clipboard/export failures surface as a status message.
//!
//! | Error | Raised by | Rendered as |
//! |-------|-----------|-------------|
//! | [`ExecutorError`] | command backend | `command-error` line |
//! | [`StreamError`] | log event source | nothing (logged, reconnect) |
//! | [`ClipboardError`] | clipboard provider | status message |
//! | [`ExportError`] | export to file | status message |

mod executor;
mod stream;
mod system;

pub use executor::ExecutorError;
pub use stream::StreamError;
pub use system::{ClipboardError, ExportError};
