//! ANSI SGR to ratatui spans.
//!
//! Only Select Graphic Rendition (`ESC [ ... m`) is interpreted. Other
//! escape sequences are dropped so a log line cannot move the cursor or
//! clear the screen.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const TAB_WIDTH: usize = 4;

/// Parse `text` into a line, starting from `base` style.
pub fn parse_line(text: &str, base: Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut style = base;
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                let Some(&next) = chars.peek() else { break };
                if next == '[' {
                    chars.next();
                    let mut params = String::new();
                    let mut final_byte = None;
                    for p in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&p) {
                            final_byte = Some(p);
                            break;
                        }
                        params.push(p);
                    }
                    if final_byte == Some('m') {
                        flush(&mut spans, &mut current, style);
                        style = apply_sgr(style, base, &params);
                    }
                } else if next == ']' {
                    // OSC runs to BEL or ST
                    chars.next();
                    while let Some(p) = chars.next() {
                        if p == '\x07' {
                            break;
                        }
                        if p == '\x1b' {
                            if chars.peek() == Some(&'\\') {
                                chars.next();
                            }
                            break;
                        }
                    }
                } else {
                    chars.next();
                }
            }
            '\t' => current.push_str(&" ".repeat(TAB_WIDTH)),
            c if c.is_control() => {}
            c => current.push(c),
        }
    }
    flush(&mut spans, &mut current, style);
    Line::from(spans)
}

fn flush(spans: &mut Vec<Span<'static>>, current: &mut String, style: Style) {
    if !current.is_empty() {
        spans.push(Span::styled(std::mem::take(current), style));
    }
}

fn apply_sgr(mut style: Style, base: Style, params: &str) -> Style {
    let codes: Vec<u16> = if params.is_empty() {
        vec![0]
    } else {
        params
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect()
    };
    let mut iter = codes.into_iter();
    while let Some(code) = iter.next() {
        style = match code {
            0 => base,
            1 => style.add_modifier(Modifier::BOLD),
            2 => style.add_modifier(Modifier::DIM),
            3 => style.add_modifier(Modifier::ITALIC),
            4 => style.add_modifier(Modifier::UNDERLINED),
            7 => style.add_modifier(Modifier::REVERSED),
            22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style.remove_modifier(Modifier::ITALIC),
            24 => style.remove_modifier(Modifier::UNDERLINED),
            27 => style.remove_modifier(Modifier::REVERSED),
            30..=37 => style.fg(basic_color(code - 30, false)),
            39 => style.fg(base.fg.unwrap_or(Color::Reset)),
            40..=47 => style.bg(basic_color(code - 40, false)),
            49 => style.bg(base.bg.unwrap_or(Color::Reset)),
            90..=97 => style.fg(basic_color(code - 90, true)),
            100..=107 => style.bg(basic_color(code - 100, true)),
            38 => match extended_color(&mut iter) {
                Some(color) => style.fg(color),
                None => style,
            },
            48 => match extended_color(&mut iter) {
                Some(color) => style.bg(color),
                None => style,
            },
            _ => style,
        };
    }
    style
}

fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => Some(Color::Indexed(iter.next()?.min(255) as u8)),
        2 => {
            let r = iter.next()?.min(255) as u8;
            let g = iter.next()?.min(255) as u8;
            let b = iter.next()?.min(255) as u8;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn basic_color(index: u16, bright: bool) -> Color {
    match (index, bright) {
        (0, false) => Color::Black,
        (1, false) => Color::Red,
        (2, false) => Color::Green,
        (3, false) => Color::Yellow,
        (4, false) => Color::Blue,
        (5, false) => Color::Magenta,
        (6, false) => Color::Cyan,
        (7, false) => Color::Gray,
        (0, true) => Color::DarkGray,
        (1, true) => Color::LightRed,
        (2, true) => Color::LightGreen,
        (3, true) => Color::LightYellow,
        (4, true) => Color::LightBlue,
        (5, true) => Color::LightMagenta,
        (6, true) => Color::LightCyan,
        _ => Color::White,
    }
}
