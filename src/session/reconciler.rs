//! Turns streamed log events into display lines.
//!
//! Each line has two forms. The export form strips terminal control
//! sequences and escapes HTML-significant characters, so copied or
//! downloaded logs are inert. The live form keeps the original message and
//! adds level colors.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{DisplayLine, LineOrigin};
use crate::models::{LogEvent, LogLevel, LogSource};

/// Default number of recent events remembered for duplicate suppression.
pub const DEFAULT_DEDUP_WINDOW: usize = 256;

/// CSI, OSC and two-byte escape sequences.
static CONTROL_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?|\x1b[@-Z\\-_]")
        .expect("Invalid control sequence regex")
});

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

/// Remove terminal control sequences and stray control characters.
///
/// Tabs survive; everything else below 0x20 and DEL is dropped.
pub fn strip_control_sequences(text: &str) -> String {
    CONTROL_SEQUENCE
        .replace_all(text, "")
        .chars()
        .filter(|c| *c == '\t' || !c.is_control())
        .collect()
}

/// Escape `& < > " '` with their named entities.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Export form of a message.
pub fn sanitize_for_export(message: &str) -> String {
    escape_html(&strip_control_sequences(message))
}

fn level_color(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "\x1b[90m",
        LogLevel::Info => "\x1b[36m",
        LogLevel::Warn => "\x1b[33m",
        LogLevel::Error => "\x1b[31m",
        LogLevel::Success => "\x1b[32m",
    }
}

fn source_tag(source: &LogSource) -> Option<String> {
    (!source.is_build()).then(|| source.as_str().to_ascii_uppercase())
}

/// Format an event as a display line, with times shown in `tz`.
pub fn format_event_in<Tz>(event: &LogEvent, tz: &Tz) -> DisplayLine
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let time = event.timestamp.with_timezone(tz).format("%H:%M:%S");
    let tag = source_tag(&event.source);
    let level = event.level.label();

    let mut content = format!("[{}] ", time);
    let mut styled = format!("{DIM}[{}]{RESET} ", time);
    if let Some(tag) = &tag {
        content.push_str(&format!("{} ", tag));
        styled.push_str(&format!("{BOLD}{}{RESET} ", tag));
    }
    content.push_str(&format!("{}: {}", level, sanitize_for_export(&event.message)));
    styled.push_str(&format!(
        "{}{}{RESET}: {}",
        level_color(event.level),
        level,
        event.message
    ));

    DisplayLine::new(LineOrigin::StreamEvent, content).with_styled(styled)
}

/// Format an event with times in the local timezone.
pub fn format_event(event: &LogEvent) -> DisplayLine {
    format_event_in(event, &Local)
}

type EventKey = (DateTime<Utc>, String, LogLevel, String);

/// Bounded memory of recently seen events.
#[derive(Debug, Clone)]
struct DedupWindow {
    capacity: usize,
    order: VecDeque<EventKey>,
    seen: HashSet<EventKey>,
}

impl DedupWindow {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Record `event`. False when it was already in the window.
    fn insert(&mut self, event: &LogEvent) -> bool {
        if self.capacity == 0 {
            return true;
        }
        let key = (
            event.timestamp,
            event.source.as_str().to_string(),
            event.level,
            event.message.clone(),
        );
        if self.seen.contains(&key) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
        self.seen.insert(key.clone());
        self.order.push_back(key);
        true
    }
}

/// Parses, filters and formats raw log payloads.
#[derive(Debug, Clone)]
pub struct StreamReconciler {
    dedup: DedupWindow,
    dropped_malformed: u64,
    dropped_duplicate: u64,
}

impl Default for StreamReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW)
    }
}

impl StreamReconciler {
    /// `dedup_window` of 0 disables duplicate suppression.
    pub fn new(dedup_window: usize) -> Self {
        Self {
            dedup: DedupWindow::new(dedup_window),
            dropped_malformed: 0,
            dropped_duplicate: 0,
        }
    }

    /// Display line for a raw payload, or None if it is dropped.
    pub fn reconcile(&mut self, payload: &str) -> Option<DisplayLine> {
        let event = match LogEvent::from_json(payload) {
            Ok(event) => event,
            Err(e) => {
                self.dropped_malformed += 1;
                tracing::debug!("Dropping malformed log event: {}", e);
                return None;
            }
        };
        self.accept(&event).then(|| format_event(&event))
    }

    /// Run an already-parsed event through the duplicate filter.
    pub fn accept(&mut self, event: &LogEvent) -> bool {
        if self.dedup.insert(event) {
            true
        } else {
            self.dropped_duplicate += 1;
            tracing::trace!("Dropping duplicate log event at {}", event.timestamp);
            false
        }
    }

    pub fn dropped_malformed(&self) -> u64 {
        self.dropped_malformed
    }

    pub fn dropped_duplicate(&self) -> u64 {
        self.dropped_duplicate
    }
}
