//! Bottom status row.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::{COLOR_BUSY, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_PROMPT};
use crate::app::App;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let mut left = vec![
        Span::styled(format!(" {}", session.session_id()), Style::default().fg(COLOR_HEADER)),
        Span::styled(" · ", Style::default().fg(COLOR_DIM)),
        Span::styled(session.path().to_string(), Style::default().fg(COLOR_PROMPT)),
        Span::styled(" · ", Style::default().fg(COLOR_DIM)),
    ];
    if session.is_dispatching() {
        let frame_idx = (app.tick_count / 5) as usize % SPINNER_FRAMES.len();
        left.push(Span::styled(
            format!("{} running", SPINNER_FRAMES[frame_idx]),
            Style::default().fg(COLOR_BUSY),
        ));
    } else {
        left.push(Span::styled("ready", Style::default().fg(COLOR_DIM)));
    }
    if !app.scroll.is_at_bottom() {
        left.push(Span::styled(
            format!(" · ↑{}", app.scroll.offset),
            Style::default().fg(COLOR_DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(left)), area);

    let right = match &app.status {
        Some(status) if status.is_error => Span::styled(
            format!("{} ", status.text),
            Style::default().fg(COLOR_ERROR).add_modifier(Modifier::BOLD),
        ),
        Some(status) => Span::styled(format!("{} ", status.text), Style::default().fg(COLOR_HEADER)),
        None => Span::styled("^Q quit  Shift+↑↓ scroll ", Style::default().fg(COLOR_DIM)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        area,
    );
}
