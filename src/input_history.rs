//! Command history for a terminal session.
//!
//! Entries are stored most-recent-first and bounded. The history is seeded
//! once from the remote store when the session starts; afterwards it is only
//! changed locally by submissions and the `reset` built-in.

use std::collections::VecDeque;

/// Maximum number of history entries kept per session.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Bounded command history with an Up/Down browsing cursor.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Entries, most recent first.
    entries: VecDeque<String>,
    /// Browsing position (None when not browsing).
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: None,
            capacity,
        }
    }

    /// Append `entries` (most recent first) behind the current ones.
    ///
    /// Blank entries and entries past capacity are dropped. The browse
    /// position is kept.
    pub fn extend_older<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = String>,
    {
        let room = self.capacity.saturating_sub(self.entries.len());
        self.entries.extend(
            entries
                .into_iter()
                .filter(|entry| !entry.trim().is_empty())
                .take(room),
        );
    }

    /// Record a submitted line as the most recent entry.
    ///
    /// The oldest entry is dropped when the history is full.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_front(entry.into());
        self.entries.truncate(self.capacity);
        self.cursor = None;
    }

    /// Step towards older entries (Up arrow).
    ///
    /// Returns the entry to show, or None when already at the oldest entry
    /// or when the history is empty.
    pub fn older(&mut self) -> Option<&str> {
        let next = match self.cursor {
            None => 0,
            Some(idx) => idx + 1,
        };
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step towards newer entries (Down arrow).
    ///
    /// `None` means "not moved" (already outside history); `Some(None)` means
    /// the cursor left history and the input should be cleared.
    pub fn newer(&mut self) -> Option<Option<&str>> {
        match self.cursor {
            None => None,
            Some(0) => {
                self.cursor = None;
                Some(None)
            }
            Some(idx) => {
                self.cursor = Some(idx - 1);
                Some(self.entries.get(idx - 1).map(String::as_str))
            }
        }
    }

    /// Stop browsing (after submit or Ctrl+C).
    pub fn reset_navigation(&mut self) {
        self.cursor = None;
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Browsing position as a signed index, -1 when not browsing.
    pub fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |idx| idx as isize)
    }

    pub fn is_navigating(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
