//! UI rendering for the terminal session.
//!
//! ```text
//! ┌ header: title ............ [Fullscreen F11] [Clear F5] [Copy ^Y] [Export ^S]
//! │ scroll-back
//! │ /srv/app $ pending input█
//! └ status bar: session · path · state ............ status message / hints
//! ```
//!
//! Fullscreen hides the header and the status bar.

pub mod ansi;
pub mod header;
mod status_bar;
mod terminal_view;
pub mod theme;

pub use header::{header_buttons, hit_test, HeaderAction};
pub use terminal_view::{buffer_rows, wrap_line};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::App;

/// Split the frame into header, body and status rows.
pub fn layout_areas(area: Rect, fullscreen: bool) -> (Option<Rect>, Rect, Option<Rect>) {
    if fullscreen || area.height < 3 {
        return (None, area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);
    (Some(chunks[0]), chunks[1], Some(chunks[2]))
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let (header, body, status) = layout_areas(frame.area(), app.fullscreen);
    app.header_area = header;

    if let Some(area) = header {
        let title = format!("Terminal · {}", app.session.session_id());
        header::render_header(frame, area, &title);
    }
    terminal_view::render_terminal_view(frame, body, app);
    if let Some(area) = status {
        status_bar::render_status_bar(frame, area, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fullscreen_uses_whole_area() {
        let area = Rect::new(0, 0, 80, 24);
        let (header, body, status) = layout_areas(area, true);
        assert!(header.is_none() && status.is_none());
        assert_eq!(body, area);
    }

    #[test]
    fn test_layout_with_chrome() {
        let area = Rect::new(0, 0, 80, 24);
        let (header, body, status) = layout_areas(area, false);
        assert_eq!(header, Some(Rect::new(0, 0, 80, 1)));
        assert_eq!(body.height, 22);
        assert_eq!(status, Some(Rect::new(0, 23, 80, 1)));
    }
}
