//! VT100 escape-sequence parser.
//!
//! This parser is a deterministic state machine that converts a console byte
//! stream into a sequence of actions for the screen. It covers the subset of
//! VT100 that instrument consoles actually emit:
//!
//! - printable characters (ASCII + UTF-8) -> `Action::Print`
//! - `\n` and `\r` -> dedicated actions
//! - CSI cursor positioning (`H`/`f`), cursor forward (`C`), erase display
//!   (`J`), erase to end of line (`K`), and SGR (`m`, decoded but not modeled)
//! - G0 charset designation (`ESC ( 0` / `ESC ( B`)
//! - capture of everything else as `Action::Escape` so callers can log it
//!
//! Every transition is total: any byte in any state either advances the
//! sequence or completes it. A sequence cut off by the end of input simply
//! leaves the parser mid-sequence ([`Parser::in_sequence`]) and has no effect.

use crate::charset::Charset;

const ESC: u8 = 0x1b;

/// Largest magnitude a CSI parameter can take. Larger values saturate.
const PARAM_MAX: i32 = u16::MAX as i32;

/// Parser output actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print a single character (ASCII or multi-byte UTF-8).
    ///
    /// C0 controls other than `\n`, `\r` and ESC are printed as-is.
    Print(char),
    /// Line feed (`\n`): next row, column 0.
    Newline,
    /// Carriage return (`\r`).
    CarriageReturn,
    /// CUP/HVP (`CSI r ; c H`, `CSI r ; c f`): move cursor to absolute
    /// 0-indexed row/col.
    ///
    /// Negative or zero wire values land on row/column 0. Wire values are
    /// capped at 65535, so the furthest reachable row is 65534; a larger
    /// request stops there instead of growing the screen without bound.
    CursorPosition { row: u16, col: u16 },
    /// CUF (`CSI n C`): move cursor right by count (default 1, `0` allowed).
    /// A negative count moves left, stopping at column 0.
    CursorForward(i32),
    /// ED (`CSI Ps J`): clear the whole screen, whatever the parameter.
    EraseDisplay,
    /// EL (`CSI Ps K`): clear from the cursor to the end of the line,
    /// whatever the parameter.
    EraseToEndOfLine,
    /// SGR (`CSI ... m`): graphics rendition parameters. Attributes are not
    /// modeled; the action exists so callers can observe it.
    Sgr(Vec<i32>),
    /// SCS (`ESC ( d`): designate the G0 character set.
    DesignateCharset(Charset),
    /// A raw escape/CSI sequence captured verbatim (starts with ESC) that has
    /// no effect on the screen.
    Escape(Vec<u8>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Default state: bytes are characters.
    Normal,
    /// An ESC byte was read.
    SawEscape,
    /// `ESC (` was read; the next byte is the charset designator.
    SelectingCharset,
    /// `ESC [` was read; accumulating parameters until a final byte.
    CollectingCsi,
    /// Accumulating a multi-byte UTF-8 character.
    /// `bytes_remaining` counts how many continuation bytes are still expected.
    Utf8 { bytes_remaining: u8 },
}

/// VT100 parser state.
#[derive(Debug, Clone)]
pub struct Parser {
    state: State,
    buf: Vec<u8>,
    /// Accumulator for multi-byte UTF-8 character assembly.
    utf8_buf: [u8; 4],
    /// Number of bytes accumulated so far in `utf8_buf`.
    utf8_len: u8,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser in the normal state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            buf: Vec::new(),
            utf8_buf: [0; 4],
            utf8_len: 0,
        }
    }

    /// Feed a chunk of bytes and return parsed actions.
    ///
    /// Chunk boundaries never matter: a sequence split across two calls
    /// produces the same actions as the unsplit input.
    #[must_use]
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Action> {
        let mut out = Vec::new();
        for &b in bytes {
            if let Some(action) = self.advance(b) {
                out.push(action);
            }
        }
        out
    }

    /// Whether the parser is part-way through an escape sequence or a
    /// multi-byte character.
    ///
    /// `true` after the last byte of a capture means the capture was cut off
    /// mid-sequence; the partial sequence had no effect.
    pub fn in_sequence(&self) -> bool {
        self.state != State::Normal
    }

    /// Advance the parser by one byte.
    ///
    /// Returns an action when a complete token is recognized.
    pub fn advance(&mut self, b: u8) -> Option<Action> {
        match self.state {
            State::Normal => self.advance_normal(b),
            State::SawEscape => self.advance_esc(b),
            State::SelectingCharset => self.advance_charset(b),
            State::CollectingCsi => self.advance_csi(b),
            State::Utf8 { bytes_remaining } => self.advance_utf8(b, bytes_remaining),
        }
    }

    fn advance_normal(&mut self, b: u8) -> Option<Action> {
        match b {
            b'\n' => Some(Action::Newline),
            b'\r' => Some(Action::CarriageReturn),
            ESC => {
                self.state = State::SawEscape;
                self.buf.clear();
                self.buf.push(ESC);
                None
            }
            0x00..=0x7F => Some(Action::Print(b as char)),
            // UTF-8 multi-byte sequence leading bytes:
            0xC2..=0xDF => self.begin_utf8(b, 1),
            0xE0..=0xEF => self.begin_utf8(b, 2),
            0xF0..=0xF4 => self.begin_utf8(b, 3),
            // Stray continuation bytes, overlong leads (0xC0-0xC1) and
            // leads above the Unicode range (0xF5-0xFF).
            _ => Some(Action::Print(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn begin_utf8(&mut self, lead: u8, continuation_bytes: u8) -> Option<Action> {
        self.utf8_buf[0] = lead;
        self.utf8_len = 1;
        self.state = State::Utf8 {
            bytes_remaining: continuation_bytes,
        };
        None
    }

    /// Accumulate continuation bytes for a multi-byte UTF-8 character.
    fn advance_utf8(&mut self, b: u8, bytes_remaining: u8) -> Option<Action> {
        // Continuation bytes must be in 0x80..=0xBF.
        if (0x80..=0xBF).contains(&b) {
            let idx = self.utf8_len as usize;
            if idx < 4 {
                self.utf8_buf[idx] = b;
                self.utf8_len += 1;
            }
            if bytes_remaining == 1 {
                self.state = State::Normal;
                let len = self.utf8_len as usize;
                let ch = core::str::from_utf8(&self.utf8_buf[..len])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.utf8_len = 0;
                Some(Action::Print(ch))
            } else {
                self.state = State::Utf8 {
                    bytes_remaining: bytes_remaining - 1,
                };
                None
            }
        } else {
            // Invalid continuation byte: drop the partial character and
            // reprocess this byte in the normal state.
            self.state = State::Normal;
            self.utf8_len = 0;
            self.advance_normal(b)
        }
    }

    fn advance_esc(&mut self, b: u8) -> Option<Action> {
        self.buf.push(b);
        match b {
            b'[' => {
                self.state = State::CollectingCsi;
                None
            }
            b'(' => {
                self.state = State::SelectingCharset;
                None
            }
            // Vendor-specific two-byte sequences are consumed and ignored.
            _ => {
                self.state = State::Normal;
                Some(Action::Escape(self.take_buf()))
            }
        }
    }

    fn advance_charset(&mut self, b: u8) -> Option<Action> {
        self.state = State::Normal;
        self.buf.clear();
        Some(Action::DesignateCharset(Charset::from_designator(b)))
    }

    fn advance_csi(&mut self, b: u8) -> Option<Action> {
        self.buf.push(b);
        // Final byte for CSI is in the 0x40..=0x7E range (ECMA-48).
        if (0x40..=0x7E).contains(&b) {
            self.state = State::Normal;
            let seq = self.take_buf();
            return Some(Self::decode_csi(&seq).unwrap_or(Action::Escape(seq)));
        }
        None
    }

    fn take_buf(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.buf)
    }

    fn decode_csi(seq: &[u8]) -> Option<Action> {
        if seq.len() < 3 || seq[0] != ESC || seq[1] != b'[' {
            return None;
        }
        let final_byte = *seq.last()?;
        let params = Self::parse_csi_params(&seq[2..seq.len() - 1]);

        match final_byte {
            b'H' | b'f' => {
                // CUP/HVP use 1-indexed coordinates.
                let (row, col) = match params.as_slice() {
                    [] => (0, 0),
                    [row] => (zero_based(*row), 0),
                    [row, col, ..] => (zero_based(*row), zero_based(*col)),
                };
                Some(Action::CursorPosition { row, col })
            }
            b'C' => Some(Action::CursorForward(params.first().copied().unwrap_or(1))),
            b'J' => Some(Action::EraseDisplay),
            b'K' => Some(Action::EraseToEndOfLine),
            b'm' => Some(Action::Sgr(params)),
            _ => None,
        }
    }

    /// Parse `;`-separated decimal parameters.
    ///
    /// Empty fields are dropped rather than read as zero. Each field is an
    /// optionally signed decimal; if any field is not, the whole list is
    /// treated as absent, so the command falls back to its no-parameter
    /// form. Values saturate at ±[`PARAM_MAX`].
    fn parse_csi_params(params: &[u8]) -> Vec<i32> {
        let Ok(s) = core::str::from_utf8(params) else {
            return Vec::new();
        };
        s.split(';')
            .filter(|part| !part.is_empty())
            .map(parse_param)
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }
}

fn parse_param(part: &str) -> Option<i32> {
    let (negative, digits) = match part.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, part.strip_prefix('+').unwrap_or(part)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits
        .parse::<i32>()
        .map_or(PARAM_MAX, |v| v.min(PARAM_MAX));
    Some(if negative { -magnitude } else { magnitude })
}

/// 1-based wire coordinate to 0-based, clamped at 0.
fn zero_based(value: i32) -> u16 {
    u16::try_from(value.saturating_sub(1).max(0)).unwrap_or(u16::MAX)
}
