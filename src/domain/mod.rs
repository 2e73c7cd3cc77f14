//! Domain objects of a terminal session.
//!
//! These hold state only; the [`Session`](crate::session::Session) decides
//! when they change.
//!
//! ## Domain Objects
//!
//! - [`LineEditor`] / [`PendingLine`] - the not-yet-submitted input row
//! - [`DisplayBuffer`] / [`DisplayLine`] - append-only scroll-back
//! - [`WorkingPath`] - the session's current directory, changed by `cd`
//! - [`ScrollState`] - how far the view is scrolled up from the newest line

pub mod display;
pub mod line_editor;
pub mod path;
pub mod scroll;

pub use display::{DisplayBuffer, DisplayLine, LineOrigin};
pub use line_editor::{EditOutcome, LineEditor, PendingLine};
pub use path::WorkingPath;
pub use scroll::ScrollState;
