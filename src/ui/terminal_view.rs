//! The scroll-back plus the live prompt row.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::ansi::parse_line;
use super::theme::{origin_style, COLOR_PROMPT};
use crate::app::App;
use crate::domain::DisplayBuffer;

/// Hard-wrap `line` to rows of at most `width` columns.
///
/// Empty lines still take one row. Characters wider than the whole row are
/// placed on a row of their own.
pub fn wrap_line(line: Line<'static>, width: u16) -> Vec<Line<'static>> {
    let width = width.max(1) as usize;
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && used > 0 {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(Line::from(std::mem::take(&mut row)));
                used = 0;
            }
            chunk.push(c);
            used += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, style));
        }
    }
    rows.push(Line::from(row));
    rows
}

/// Wrapped rows of every display line, oldest first.
pub fn buffer_rows(buffer: &DisplayBuffer, width: u16) -> Vec<Line<'static>> {
    buffer
        .lines()
        .iter()
        .flat_map(|line| wrap_line(parse_line(line.live_text(), origin_style(line.origin)), width))
        .collect()
}

/// Render into `area` and place the cursor on the prompt row.
pub fn render_terminal_view(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = area.width;
    let mut rows = buffer_rows(app.session.buffer(), width);

    let prompt = app.session.prompt();
    let pending = app.session.pending_line();
    let prompt_line = Line::from(vec![
        Span::styled(prompt.clone(), Style::default().fg(COLOR_PROMPT)),
        Span::raw(pending.text().to_string()),
    ]);
    let prompt_start = rows.len();
    rows.extend(wrap_line(prompt_line, width));

    let total = rows.len();
    let height = area.height as usize;
    let max_scroll = total.saturating_sub(height).min(u16::MAX as usize) as u16;
    app.scroll.update_limits(max_scroll);

    let end = total - app.scroll.offset as usize;
    let start = end.saturating_sub(height);
    let visible: Vec<Line<'static>> = rows[start..end].to_vec();
    frame.render_widget(Paragraph::new(visible), area);

    if app.scroll.is_at_bottom() {
        let column = unicode_width::UnicodeWidthStr::width(prompt.as_str()) + pending.cursor_column();
        let row = prompt_start + column / width as usize;
        let column = column % width as usize;
        if row >= start && row < end {
            frame.set_cursor_position(Position::new(
                area.x + column as u16,
                area.y + (row - start) as u16,
            ));
        }
    }
}
