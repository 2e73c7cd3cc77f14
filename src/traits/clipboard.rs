//! Clipboard abstraction.

use crate::error::ClipboardError;

/// Places text on a clipboard.
pub trait ClipboardProvider: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
