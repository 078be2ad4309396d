//! Character-set designation and line-drawing translation.
//!
//! Instrument consoles draw their status panels with the DEC Special Graphics
//! set: after `ESC ( 0` the lowercase letters below render as box-drawing
//! glyphs until `ESC ( B` switches back to ASCII. Only the eleven glyphs
//! needed for boxes and tees are translated; every other character passes
//! through unchanged even in alternate mode.

/// Designator byte selecting DEC Special Graphics (`ESC ( 0`).
pub const DESIGNATOR_LINE_DRAWING: u8 = b'0';

/// Designator byte selecting US ASCII (`ESC ( B`).
pub const DESIGNATOR_ASCII: u8 = b'B';

/// Active character set of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// Characters are written as received.
    #[default]
    Ascii,
    /// Line-drawing codes are replaced with box-drawing glyphs.
    LineDrawing,
}

impl Charset {
    /// Map a designator byte (the byte after `ESC (`) to a charset.
    ///
    /// Only `0` selects line drawing. Every other designator, including
    /// ones this crate does not know (UK `A`, DEC supplemental `<`, ...),
    /// selects ASCII. This is an approximation: an unsupported set is
    /// rendered as plain ASCII rather than rejected.
    pub fn from_designator(byte: u8) -> Self {
        match byte {
            DESIGNATOR_LINE_DRAWING => Self::LineDrawing,
            DESIGNATOR_ASCII => Self::Ascii,
            _ => {
                crate::trace!("unsupported charset designator; using ASCII");
                Self::Ascii
            }
        }
    }

    /// Translate `ch` through this charset.
    pub fn translate(self, ch: char) -> char {
        match self {
            Self::Ascii => ch,
            Self::LineDrawing => line_drawing_glyph(ch).unwrap_or(ch),
        }
    }
}

/// Box-drawing glyph for a DEC line-drawing code, if `ch` is one.
pub fn line_drawing_glyph(ch: char) -> Option<char> {
    let glyph = match ch {
        'j' => '\u{2518}', // ┘ lower-right corner
        'k' => '\u{2510}', // ┐ upper-right corner
        'l' => '\u{250C}', // ┌ upper-left corner
        'm' => '\u{2514}', // └ lower-left corner
        'n' => '\u{2524}', // ┤
        'q' => '\u{2500}', // ─ horizontal line
        't' => '\u{251C}', // ├ left tee
        'u' => '\u{252C}', // ┬
        'v' => '\u{2534}', // ┴ bottom tee
        'w' => '\u{253C}', // ┼
        'x' => '\u{2502}', // │ vertical line
        _ => return None,
    };
    Some(glyph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn designator_zero_selects_line_drawing() {
        assert_eq!(Charset::from_designator(b'0'), Charset::LineDrawing);
    }

    #[test]
    fn designator_b_and_unknown_select_ascii() {
        assert_eq!(Charset::from_designator(b'B'), Charset::Ascii);
        assert_eq!(Charset::from_designator(b'A'), Charset::Ascii);
        assert_eq!(Charset::from_designator(b'<'), Charset::Ascii);
    }

    #[test]
    fn all_eleven_codes_translate() {
        let box_codes = "lkmjqxtuvwn";
        let glyphs: String = box_codes
            .chars()
            .map(|c| Charset::LineDrawing.translate(c))
            .collect();
        assert_eq!(glyphs, "┌┐└┘─│├┬┴┼┤");
    }

    #[test]
    fn ascii_charset_is_identity() {
        for c in "lkmjqxtuvwn".chars() {
            assert_eq!(Charset::Ascii.translate(c), c);
        }
    }

    #[test]
    fn unmapped_characters_pass_through_in_line_drawing() {
        for c in ['a', 'o', 'p', 'r', 's', 'y', 'z', 'A', '5', ' '] {
            assert_eq!(Charset::LineDrawing.translate(c), c);
        }
    }

    #[test]
    fn designator_constants_round_trip() {
        assert_eq!(
            Charset::from_designator(DESIGNATOR_LINE_DRAWING).translate('q'),
            '─'
        );
        assert_eq!(Charset::from_designator(DESIGNATOR_ASCII).translate('q'), 'q');
    }
}
