//! Key bindings for the terminal host.
//!
//! Chrome shortcuts are checked first; anything left over is translated to an
//! [`InputUnit`] for the line editor.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::InputUnit;

/// A key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub const fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<&KeyEvent> for KeyCombo {
    fn from(key: &KeyEvent) -> Self {
        // Terminals disagree on whether Shift accompanies uppercase letters
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        Self::new(key.code, modifiers)
    }
}

/// Actions handled by the host rather than the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    Quit,
    ToggleFullscreen,
    ClearTerminal,
    CopyContent,
    ExportLogs,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToBottom,
}

/// Chrome shortcut table.
#[derive(Debug, Clone)]
pub struct Keybindings {
    host: HashMap<KeyCombo, HostCommand>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::new()
    }
}

impl Keybindings {
    pub fn new() -> Self {
        let mut host = HashMap::new();
        host.insert(KeyCombo::ctrl(KeyCode::Char('q')), HostCommand::Quit);
        host.insert(KeyCombo::plain(KeyCode::F(11)), HostCommand::ToggleFullscreen);
        host.insert(KeyCombo::plain(KeyCode::F(5)), HostCommand::ClearTerminal);
        host.insert(KeyCombo::ctrl(KeyCode::Char('y')), HostCommand::CopyContent);
        host.insert(KeyCombo::ctrl(KeyCode::Char('s')), HostCommand::ExportLogs);
        host.insert(KeyCombo::shift(KeyCode::Up), HostCommand::ScrollUp);
        host.insert(KeyCombo::shift(KeyCode::Down), HostCommand::ScrollDown);
        host.insert(KeyCombo::plain(KeyCode::PageUp), HostCommand::PageUp);
        host.insert(KeyCombo::plain(KeyCode::PageDown), HostCommand::PageDown);
        host.insert(KeyCombo::shift(KeyCode::End), HostCommand::ScrollToBottom);
        Self { host }
    }

    /// Chrome command bound to this key, if any.
    pub fn host_command(&self, key: &KeyEvent) -> Option<HostCommand> {
        self.host.get(&KeyCombo::from(key)).copied()
    }

    /// Rebind a chrome command, replacing any previous binding of `combo`.
    pub fn bind(&mut self, combo: KeyCombo, command: HostCommand) {
        self.host.insert(combo, command);
    }

    /// A key bound to `command`, for hints in the header.
    pub fn key_for(&self, command: HostCommand) -> Option<KeyCombo> {
        self.host
            .iter()
            .filter(|(_, c)| **c == command)
            .map(|(k, _)| *k)
            .min_by_key(|k| format!("{:?}", k))
    }
}

/// Translate a crossterm key event into a line-editor input unit.
pub fn to_input_unit(key: &KeyEvent) -> Option<InputUnit> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(InputUnit::CtrlC),
        KeyCode::Char('l') if ctrl => Some(InputUnit::CtrlL),
        KeyCode::Char('a') if ctrl => Some(InputUnit::Home),
        KeyCode::Char('e') if ctrl => Some(InputUnit::End),
        KeyCode::Char('h') if ctrl => Some(InputUnit::Backspace),
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(InputUnit::Char(c)),
        KeyCode::Enter => Some(InputUnit::Enter),
        KeyCode::Backspace => Some(InputUnit::Backspace),
        KeyCode::Delete => Some(InputUnit::Delete),
        KeyCode::Up => Some(InputUnit::Up),
        KeyCode::Down => Some(InputUnit::Down),
        KeyCode::Left => Some(InputUnit::Left),
        KeyCode::Right => Some(InputUnit::Right),
        KeyCode::Home => Some(InputUnit::Home),
        KeyCode::End => Some(InputUnit::End),
        _ => None,
    }
}
