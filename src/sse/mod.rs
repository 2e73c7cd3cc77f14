//! Server-Sent Events framing.
//!
//! The log stream is delivered as SSE. This module turns the raw text lines
//! into [`SseFrame`]s; decoding the JSON payload is left to the caller.
//!
//! ```text
//! event: log
//! data: {"message":"started","level":"info",...}
//! <empty line>
//! ```

/// One classified SSE line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Blank line: dispatches the accumulated frame.
    Empty,
    /// `: comment` (also used as keep-alive).
    Comment(String),
    Event(String),
    Data(String),
    Id(String),
    /// `retry:` hint in milliseconds.
    Retry(u64),
}

/// A complete SSE event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseFrame {
    /// Event type. `None` means the default `message` type.
    pub event: Option<String>,
    /// Data lines joined with `\n`.
    pub data: String,
    pub id: Option<String>,
}

impl SseFrame {
    /// Event type with the SSE default applied.
    pub fn event_type(&self) -> &str {
        self.event.as_deref().unwrap_or("message")
    }
}

/// Classify a single SSE line (without its trailing newline).
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(comment) = line.strip_prefix(':') {
        return SseLine::Comment(comment.trim().to_string());
    }

    let (field, value) = match line.split_once(':') {
        Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
        None => (line, ""),
    };

    match field {
        "event" => SseLine::Event(value.trim().to_string()),
        "data" => SseLine::Data(value.to_string()),
        "id" => SseLine::Id(value.trim().to_string()),
        "retry" => match value.trim().parse() {
            Ok(ms) => SseLine::Retry(ms),
            Err(_) => SseLine::Comment(line.to_string()),
        },
        // Unknown fields are ignored per the SSE format
        _ => SseLine::Comment(line.to_string()),
    }
}

/// Stateful parser accumulating lines into frames.
#[derive(Debug, Default)]
pub struct SseParser {
    event: Option<String>,
    data: Vec<String>,
    id: Option<String>,
    retry_ms: Option<u64>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns a frame when the line completes one.
    pub fn feed_line(&mut self, line: &str) -> Option<SseFrame> {
        match parse_sse_line(line) {
            SseLine::Empty => self.dispatch(),
            SseLine::Comment(_) => None,
            SseLine::Event(event) => {
                self.event = Some(event);
                None
            }
            SseLine::Data(data) => {
                self.data.push(data);
                None
            }
            SseLine::Id(id) => {
                self.id = Some(id);
                None
            }
            SseLine::Retry(ms) => {
                self.retry_ms = Some(ms);
                None
            }
        }
    }

    /// Split a chunk of text into lines and feed each complete one.
    ///
    /// `buffer` keeps the trailing partial line between calls.
    pub fn feed_chunk(&mut self, buffer: &mut String, chunk: &str) -> Vec<SseFrame> {
        buffer.push_str(chunk);
        let mut frames = Vec::new();
        while let Some(pos) = buffer.find('\n') {
            let line = buffer[..pos].trim_end_matches('\r').to_string();
            buffer.drain(..=pos);
            if let Some(frame) = self.feed_line(&line) {
                frames.push(frame);
            }
        }
        frames
    }

    /// Last `retry:` hint sent by the server.
    pub fn retry_hint_ms(&self) -> Option<u64> {
        self.retry_ms
    }

    /// Drop any partially accumulated frame.
    pub fn reset(&mut self) {
        self.event = None;
        self.data.clear();
        self.id = None;
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() {
            // Frames without data are not dispatched
            self.event = None;
            return None;
        }
        let frame = SseFrame {
            event: self.event.take(),
            data: self.data.join("\n"),
            id: self.id.clone(),
        };
        self.data.clear();
        Some(frame)
    }
}
