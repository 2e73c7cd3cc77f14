//! Keyboard input for the terminal session.
//!
//! Two entry points produce the same [`InputUnit`]s for the line editor:
//!
//! - [`KeyDecoder`] consumes raw characters (pasted text, raw terminal
//!   bytes) and resolves escape sequences with an explicit state machine.
//! - [`keybindings`] maps already-decoded crossterm key events, and also
//!   resolves chrome shortcuts (fullscreen, copy, export) to [`HostCommand`]s.

pub mod decoder;
pub mod keybindings;

pub use decoder::{DecoderState, KeyDecoder};
pub use keybindings::{to_input_unit, HostCommand, KeyCombo, Keybindings};

/// One unit of line-editor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputUnit {
    /// Printable character.
    Char(char),
    Enter,
    Backspace,
    /// Forward delete.
    Delete,
    CtrlC,
    CtrlL,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// A control character or escape sequence the editor does not handle.
    /// Carried through so it is visible in traces instead of vanishing.
    Unrecognized(String),
}
