//! Mock clipboard for testing.

use std::sync::{Arc, Mutex};

use crate::error::ClipboardError;
use crate::traits::ClipboardProvider;

/// Records copied text instead of touching the OS clipboard.
#[derive(Debug, Clone, Default)]
pub struct MockClipboard {
    contents: Arc<Mutex<Option<String>>>,
    fail_with: Arc<Mutex<Option<ClipboardError>>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard with no backing display, as on a headless server.
    pub fn unavailable() -> Self {
        let clipboard = Self::default();
        clipboard.set_failure(ClipboardError::Unavailable("no display".to_string()));
        clipboard
    }

    pub fn set_failure(&self, error: ClipboardError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    /// Last copied text.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl ClipboardProvider for MockClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(error) = self.fail_with.lock().unwrap().clone() {
            return Err(error);
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
