//! Append-only scroll-back of rendered lines.

use serde::Serialize;

/// Where a display line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineOrigin {
    Prompt,
    EchoedInput,
    CommandOutput,
    CommandError,
    StreamEvent,
    System,
}

/// One immutable row of the scroll-back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// Export form. This is what copy and download produce.
    pub content: String,
    pub origin: LineOrigin,
    /// Live form with ANSI color sequences, when it differs from `content`.
    pub styled: Option<String>,
}

impl DisplayLine {
    pub fn new(origin: LineOrigin, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            origin,
            styled: None,
        }
    }

    pub fn with_styled(mut self, styled: impl Into<String>) -> Self {
        self.styled = Some(styled.into());
        self
    }

    /// Text to draw in the live view.
    pub fn live_text(&self) -> &str {
        self.styled.as_deref().unwrap_or(&self.content)
    }
}

/// Ordered log of display lines.
///
/// `append` and `clear` are the only mutations. `revision` changes on each
/// of them so renderers can skip unchanged frames.
#[derive(Debug, Clone, Default)]
pub struct DisplayBuffer {
    lines: Vec<DisplayLine>,
    revision: u64,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: DisplayLine) {
        self.lines.push(line);
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last(&self) -> Option<&DisplayLine> {
        self.lines.last()
    }

    /// Export form of every line, newline-joined in append order.
    pub fn export(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
