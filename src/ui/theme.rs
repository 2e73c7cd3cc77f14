//! Color theme constants.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::LineOrigin;

/// Border around the terminal view
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Header buttons and the session title
pub const COLOR_HEADER: Color = Color::White;

/// Key hints and less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Prompt (path and `$`)
pub const COLOR_PROMPT: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_OUTPUT: Color = Color::Gray;

pub const COLOR_ERROR: Color = Color::Red;

/// System lines (`Executing: ...`, history cleared)
pub const COLOR_SYSTEM: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Status bar while a command is in flight
pub const COLOR_BUSY: Color = Color::Yellow;

/// Base style for a display line of the given origin.
pub fn origin_style(origin: LineOrigin) -> Style {
    match origin {
        LineOrigin::Prompt | LineOrigin::EchoedInput => Style::default().fg(COLOR_HEADER),
        LineOrigin::CommandOutput => Style::default().fg(COLOR_OUTPUT),
        LineOrigin::CommandError => Style::default().fg(COLOR_ERROR),
        LineOrigin::StreamEvent => Style::default(),
        LineOrigin::System => Style::default()
            .fg(COLOR_SYSTEM)
            .add_modifier(Modifier::ITALIC),
    }
}
