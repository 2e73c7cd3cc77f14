//! Escape-sequence decoder for raw character input.

use super::InputUnit;

const ESC: char = '\x1b';

/// Longest CSI parameter run accepted before the sequence is abandoned.
const MAX_CSI_LEN: usize = 16;

/// Decoder state between characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DecoderState {
    #[default]
    Ground,
    /// `ESC` received.
    EscSeen,
    /// `ESC [` received, collecting parameter and intermediate bytes.
    CsiSeen(String),
    /// `ESC O` received (application cursor mode).
    Ss3Seen,
}

/// Turns a character stream into [`InputUnit`]s.
///
/// ```text
/// Ground --ESC--> EscSeen --[--> CsiSeen --final--> Up | Down | ... | Unrecognized
///                         --O--> Ss3Seen --final--> Up | Down | ... | Unrecognized
///                         --other--> Unrecognized(ESC), other re-read from Ground
/// ```
///
/// State survives between calls, so a sequence split across two reads still
/// decodes.
#[derive(Debug, Clone, Default)]
pub struct KeyDecoder {
    state: DecoderState,
    /// Set after `\r` so a following `\n` does not submit twice.
    after_cr: bool,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Decode a run of characters.
    pub fn decode(&mut self, text: &str) -> Vec<InputUnit> {
        let mut units = Vec::with_capacity(text.len());
        for c in text.chars() {
            self.feed(c, &mut units);
        }
        units
    }

    /// Resolve an unfinished sequence at end of input.
    ///
    /// Pasted text ends here; a live byte stream calls this after an idle
    /// period so a bare Escape key press is not held forever.
    pub fn flush(&mut self) -> Option<InputUnit> {
        match std::mem::take(&mut self.state) {
            DecoderState::Ground => None,
            DecoderState::EscSeen => Some(InputUnit::Unrecognized(ESC.to_string())),
            DecoderState::CsiSeen(params) => {
                Some(InputUnit::Unrecognized(format!("{ESC}[{params}")))
            }
            DecoderState::Ss3Seen => Some(InputUnit::Unrecognized(format!("{ESC}O"))),
        }
    }

    /// Feed one character, pushing any completed units onto `out`.
    pub fn feed(&mut self, c: char, out: &mut Vec<InputUnit>) {
        match std::mem::take(&mut self.state) {
            DecoderState::Ground => self.ground(c, out),
            DecoderState::EscSeen => match c {
                '[' => self.state = DecoderState::CsiSeen(String::new()),
                'O' => self.state = DecoderState::Ss3Seen,
                _ => {
                    out.push(InputUnit::Unrecognized(ESC.to_string()));
                    self.ground(c, out);
                }
            },
            DecoderState::CsiSeen(mut params) => {
                if ('\x40'..='\x7e').contains(&c) {
                    out.push(csi_final(&params, c));
                } else if params.len() >= MAX_CSI_LEN || c.is_control() {
                    params.push(c);
                    out.push(InputUnit::Unrecognized(format!("{ESC}[{params}")));
                } else {
                    params.push(c);
                    self.state = DecoderState::CsiSeen(params);
                }
            }
            DecoderState::Ss3Seen => out.push(match c {
                'A' => InputUnit::Up,
                'B' => InputUnit::Down,
                'C' => InputUnit::Right,
                'D' => InputUnit::Left,
                'H' => InputUnit::Home,
                'F' => InputUnit::End,
                other => InputUnit::Unrecognized(format!("{ESC}O{other}")),
            }),
        }
    }

    fn ground(&mut self, c: char, out: &mut Vec<InputUnit>) {
        let after_cr = std::mem::replace(&mut self.after_cr, false);
        match c {
            ESC => self.state = DecoderState::EscSeen,
            '\r' => {
                self.after_cr = true;
                out.push(InputUnit::Enter);
            }
            '\n' if after_cr => {}
            '\n' => out.push(InputUnit::Enter),
            '\x7f' | '\x08' => out.push(InputUnit::Backspace),
            '\x03' => out.push(InputUnit::CtrlC),
            '\x0c' => out.push(InputUnit::CtrlL),
            c if c.is_control() => out.push(InputUnit::Unrecognized(c.to_string())),
            c => out.push(InputUnit::Char(c)),
        }
    }
}

fn csi_final(params: &str, final_byte: char) -> InputUnit {
    match (params, final_byte) {
        ("", 'A') => InputUnit::Up,
        ("", 'B') => InputUnit::Down,
        ("", 'C') => InputUnit::Right,
        ("", 'D') => InputUnit::Left,
        ("", 'H') | ("1", '~') | ("7", '~') => InputUnit::Home,
        ("", 'F') | ("4", '~') | ("8", '~') => InputUnit::End,
        ("3", '~') => InputUnit::Delete,
        _ => InputUnit::Unrecognized(format!("{ESC}[{params}{final_byte}")),
    }
}
