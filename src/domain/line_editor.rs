//! Line editing for the pending input row.
//!
//! The editor owns the [`PendingLine`] and turns [`InputUnit`]s into edits.
//! It never touches the display buffer: finalized lines are handed back to
//! the caller as [`EditOutcome::Submit`].

use unicode_width::UnicodeWidthStr;

use crate::input::InputUnit;
use crate::input_history::CommandHistory;

/// The in-progress input: text plus a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingLine {
    text: String,
    /// Character offset, always within `0..=char_len`.
    cursor: usize,
}

impl PendingLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor offset in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Display column of the cursor, accounting for wide characters.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.byte_index(self.cursor)].width()
    }

    /// Insert at the cursor and advance it.
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor. False at offset 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        true
    }

    /// Delete the character under the cursor. False at end of line.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        std::mem::replace(&mut self.cursor, 0) != 0
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.char_len();
        std::mem::replace(&mut self.cursor, end) != end
    }

    /// Replace the text and put the cursor at its end.
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Take the text out, leaving the line empty.
    fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(idx, _)| idx)
    }
}

/// What a processed input unit asks of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Nothing changed.
    Unchanged,
    /// The pending line changed and must be redrawn.
    Redraw,
    /// Enter: the line is finalized.
    Submit(String),
    /// Ctrl+C: the line was discarded. Carries the discarded text.
    Interrupt(String),
    /// Ctrl+L: clear the display.
    ClearScreen,
}

/// Applies input units to the pending line and browses history.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    line: PendingLine,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> &PendingLine {
        &self.line
    }

    /// Discard the pending line.
    pub fn reset(&mut self) {
        self.line.clear();
    }

    /// Process one input unit.
    pub fn handle(&mut self, unit: InputUnit, history: &mut CommandHistory) -> EditOutcome {
        match unit {
            InputUnit::Char(c) => {
                self.line.insert(c);
                EditOutcome::Redraw
            }
            InputUnit::Backspace => changed(self.line.backspace()),
            InputUnit::Delete => changed(self.line.delete()),
            InputUnit::Left => changed(self.line.move_left()),
            InputUnit::Right => changed(self.line.move_right()),
            InputUnit::Home => changed(self.line.move_home()),
            InputUnit::End => changed(self.line.move_end()),
            InputUnit::Enter => {
                history.reset_navigation();
                EditOutcome::Submit(self.line.take())
            }
            InputUnit::CtrlC => {
                history.reset_navigation();
                EditOutcome::Interrupt(self.line.take())
            }
            InputUnit::CtrlL => EditOutcome::ClearScreen,
            InputUnit::Up => match history.older() {
                Some(entry) => {
                    self.line.set(entry);
                    EditOutcome::Redraw
                }
                None => EditOutcome::Unchanged,
            },
            InputUnit::Down => match history.newer() {
                None => EditOutcome::Unchanged,
                Some(None) => {
                    self.line.clear();
                    EditOutcome::Redraw
                }
                Some(Some(entry)) => {
                    self.line.set(entry);
                    EditOutcome::Redraw
                }
            },
            InputUnit::Unrecognized(seq) => {
                tracing::trace!("ignoring unrecognized input {:?}", seq);
                EditOutcome::Unchanged
            }
        }
    }
}

fn changed(did_change: bool) -> EditOutcome {
    if did_change {
        EditOutcome::Redraw
    } else {
        EditOutcome::Unchanged
    }
}
