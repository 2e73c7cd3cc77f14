//! Host application state for the terminal TUI.
//!
//! [`App`] wraps one [`Session`] with the chrome around it: fullscreen,
//! scroll position, transient status messages and the key map. Terminal
//! events and session messages both end up here; the session stays
//! unaware of crossterm.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::domain::ScrollState;
use crate::input::{to_input_unit, HostCommand, KeyDecoder, Keybindings};
use crate::session::{export::default_export_dir, Session, SessionMessage, SessionNotice};
use crate::ui::{self, HeaderAction};

/// How long a status message stays in the status bar.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

/// Lines moved per wheel notch or Shift+arrow.
const SCROLL_STEP: u16 = 3;

/// A transient message in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub set_at: Instant,
}

pub struct App {
    pub session: Session,
    pub keybindings: Keybindings,
    pub scroll: ScrollState,
    pub fullscreen: bool,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    /// Where exports are written. `None` uses the downloads directory.
    pub export_dir: Option<PathBuf>,
    /// Header row from the last render, for mouse hit-testing
    pub header_area: Option<Rect>,
    pub tick_count: u64,
    /// Set whenever something visible changed
    pub needs_redraw: bool,
    decoder: KeyDecoder,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            keybindings: Keybindings::new(),
            scroll: ScrollState::new(),
            fullscreen: false,
            should_quit: false,
            status: None,
            export_dir: None,
            header_area: None,
            tick_count: 0,
            needs_redraw: true,
            decoder: KeyDecoder::new(),
        }
    }

    pub fn with_export_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Route one terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => {}
            Event::Paste(text) => self.handle_paste(&text),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => self.handle_resize(cols, rows),
            Event::FocusGained | Event::FocusLost => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(command) = self.keybindings.host_command(&key) {
            self.perform(command);
            return;
        }
        match to_input_unit(&key) {
            Some(unit) => {
                self.session.handle_input(unit);
                self.scroll.scroll_to_bottom();
                self.after_session_step();
            }
            None => tracing::trace!("Unbound key {:?}", key),
        }
    }

    /// Feed pasted text through the escape decoder.
    ///
    /// Newlines in the paste submit lines, as they would in a shell.
    pub fn handle_paste(&mut self, text: &str) {
        let mut units = self.decoder.decode(text);
        units.extend(self.decoder.flush());
        for unit in units {
            self.session.handle_input(unit);
        }
        self.scroll.scroll_to_bottom();
        self.after_session_step();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                if self.scroll.scroll_up(SCROLL_STEP) {
                    self.mark_dirty();
                }
            }
            MouseEventKind::ScrollDown => {
                if self.scroll.scroll_down(SCROLL_STEP) {
                    self.mark_dirty();
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let action = self
                    .header_area
                    .and_then(|area| ui::hit_test(area, mouse.column, mouse.row));
                if let Some(action) = action {
                    self.perform_header_action(action);
                }
            }
            _ => {}
        }
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        self.session.fit(cols, rows);
        self.mark_dirty();
    }

    pub fn handle_message(&mut self, message: SessionMessage) {
        self.session.handle_message(message);
        self.after_session_step();
    }

    /// Advance timers. Called every loop tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.session.tick(Instant::now());
        if let Some(status) = &self.status {
            if status.set_at.elapsed() >= STATUS_TTL {
                self.status = None;
                self.mark_dirty();
            }
        }
        if self.session.is_dispatching() {
            // Spinner
            self.mark_dirty();
        }
        self.after_session_step();
    }

    pub fn perform(&mut self, command: HostCommand) {
        match command {
            HostCommand::Quit => self.quit(),
            HostCommand::ToggleFullscreen => self.perform_header_action(HeaderAction::ToggleFullscreen),
            HostCommand::ClearTerminal => self.perform_header_action(HeaderAction::Clear),
            HostCommand::CopyContent => self.perform_header_action(HeaderAction::Copy),
            HostCommand::ExportLogs => self.perform_header_action(HeaderAction::Export),
            HostCommand::ScrollUp => {
                self.scroll.scroll_up(SCROLL_STEP);
            }
            HostCommand::ScrollDown => {
                self.scroll.scroll_down(SCROLL_STEP);
            }
            HostCommand::PageUp => {
                self.scroll.scroll_up(self.page_size());
            }
            HostCommand::PageDown => {
                self.scroll.scroll_down(self.page_size());
            }
            HostCommand::ScrollToBottom => self.scroll.scroll_to_bottom(),
        }
        self.mark_dirty();
    }

    pub fn perform_header_action(&mut self, action: HeaderAction) {
        match action {
            HeaderAction::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                tracing::debug!("Fullscreen: {}", self.fullscreen);
            }
            HeaderAction::Clear => self.session.clear_terminal(),
            HeaderAction::Copy => match self.session.copy_content() {
                Ok(lines) => self.set_status(format!("Copied {} lines to clipboard", lines), false),
                Err(e) => {
                    tracing::warn!("Copy failed: {}", e);
                    self.set_status(format!("Copy failed: {}", e), true);
                }
            },
            HeaderAction::Export => self.export(),
        }
        self.after_session_step();
        self.mark_dirty();
    }

    fn export(&mut self) {
        let Some(dir) = self.export_dir.clone().or_else(default_export_dir) else {
            self.set_status("Export failed: no directory available", true);
            return;
        };
        match self.session.save_export(&dir) {
            Ok(path) => self.set_status(format!("Saved {}", path.display()), false),
            Err(e) => {
                tracing::warn!("Export failed: {}", e);
                self.set_status(format!("Export failed: {}", e), true);
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            set_at: Instant::now(),
        });
        self.mark_dirty();
    }

    fn page_size(&self) -> u16 {
        self.session.viewport().rows.saturating_sub(3).max(1)
    }

    /// React to notices raised by the session.
    fn after_session_step(&mut self) {
        for notice in self.session.take_notices() {
            match notice {
                SessionNotice::Cleared => self.scroll.reset(),
                SessionNotice::ScrollToBottom | SessionNotice::PromptReady => {
                    self.scroll.scroll_to_bottom()
                }
                SessionNotice::Resized(viewport) => {
                    tracing::debug!("Viewport fitted to {}x{}", viewport.cols, viewport.rows);
                }
            }
            self.mark_dirty();
        }
    }
}
