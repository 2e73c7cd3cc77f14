//! Session header: title plus the Fullscreen, Clear, Copy and Export buttons.
//!
//! Button geometry is computed by [`header_buttons`] and shared by the
//! renderer and mouse hit-testing, so a click lands on what was drawn.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_DIM, COLOR_HEADER};

/// A header button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderAction {
    ToggleFullscreen,
    Clear,
    Copy,
    Export,
}

impl HeaderAction {
    pub const ALL: [HeaderAction; 4] = [
        HeaderAction::ToggleFullscreen,
        HeaderAction::Clear,
        HeaderAction::Copy,
        HeaderAction::Export,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HeaderAction::ToggleFullscreen => "Fullscreen",
            HeaderAction::Clear => "Clear",
            HeaderAction::Copy => "Copy",
            HeaderAction::Export => "Export",
        }
    }

    /// Shortcut shown next to the label.
    pub fn hint(&self) -> &'static str {
        match self {
            HeaderAction::ToggleFullscreen => "F11",
            HeaderAction::Clear => "F5",
            HeaderAction::Copy => "^Y",
            HeaderAction::Export => "^S",
        }
    }

    fn button_text(&self) -> String {
        format!("[{} {}]", self.label(), self.hint())
    }
}

/// Buttons laid out right-aligned in `area`, one space apart.
///
/// Buttons that do not fit are left out, starting from the leftmost.
pub fn header_buttons(area: Rect) -> Vec<(HeaderAction, Rect)> {
    let mut buttons = Vec::new();
    let mut right = area.x + area.width;
    for action in HeaderAction::ALL.iter().rev() {
        let width = action.button_text().width() as u16;
        if right < area.x + width {
            break;
        }
        let x = right - width;
        buttons.push((*action, Rect::new(x, area.y, width, 1)));
        right = x.saturating_sub(1);
    }
    buttons.reverse();
    buttons
}

/// Button under the cell at (`column`, `row`), if any.
pub fn hit_test(area: Rect, column: u16, row: u16) -> Option<HeaderAction> {
    if row != area.y {
        return None;
    }
    header_buttons(area)
        .into_iter()
        .find(|(_, rect)| column >= rect.x && column < rect.x + rect.width)
        .map(|(action, _)| action)
}

pub fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let buttons = header_buttons(area);
    let title_width = buttons
        .first()
        .map_or(area.width, |(_, rect)| rect.x.saturating_sub(area.x));

    let title_line = Line::from(vec![
        Span::styled(" ▌", Style::default().fg(COLOR_DIM)),
        Span::styled(
            title.to_string(),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(title_line),
        Rect::new(area.x, area.y, title_width, 1),
    );

    for (action, rect) in buttons {
        let line = Line::from(vec![
            Span::styled("[", Style::default().fg(COLOR_DIM)),
            Span::styled(action.label(), Style::default().fg(COLOR_HEADER)),
            Span::styled(format!(" {}]", action.hint()), Style::default().fg(COLOR_DIM)),
        ]);
        frame.render_widget(Paragraph::new(line), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_are_right_aligned() {
        let area = Rect::new(0, 0, 100, 1);
        let buttons = header_buttons(area);
        assert_eq!(buttons.len(), 4);
        let (last, rect) = buttons[3];
        assert_eq!(last, HeaderAction::Export);
        assert_eq!(rect.x + rect.width, 100);
        assert_eq!(buttons[0].0, HeaderAction::ToggleFullscreen);
    }

    #[test]
    fn test_hit_test() {
        let area = Rect::new(0, 0, 100, 1);
        let (_, copy_rect) = header_buttons(area)[2];
        assert_eq!(hit_test(area, copy_rect.x, 0), Some(HeaderAction::Copy));
        assert_eq!(hit_test(area, copy_rect.x, 1), None);
        assert_eq!(hit_test(area, 0, 0), None);
    }

    #[test]
    fn test_narrow_header_drops_leftmost_buttons() {
        let area = Rect::new(0, 0, 20, 1);
        let buttons = header_buttons(area);
        assert!(buttons.len() < 4);
        assert_eq!(buttons.last().map(|(a, _)| *a), Some(HeaderAction::Export));
    }
}
