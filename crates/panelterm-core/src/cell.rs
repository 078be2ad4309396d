//! Screen cell: the fundamental unit of the grid.
//!
//! A cell holds exactly one display character. Attributes and colors are not
//! modeled; instrument consoles only use them for highlighting, and the
//! reconstructed screen is consumed as plain text.

/// The character a blank (never written or erased) cell holds.
pub const BLANK: char = ' ';

/// A single cell in the screen grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character content. [`BLANK`] for empty/erased cells.
    content: char,
}

impl Default for Cell {
    fn default() -> Self {
        Self { content: BLANK }
    }
}

impl Cell {
    /// Create a new cell holding `ch`.
    pub fn new(ch: char) -> Self {
        Self { content: ch }
    }

    /// The character content of this cell.
    pub fn content(&self) -> char {
        self.content
    }

    /// Replace the character content.
    pub fn set_content(&mut self, ch: char) {
        self.content = ch;
    }

    /// Whether the cell is blank.
    pub fn is_blank(&self) -> bool {
        self.content == BLANK
    }

    /// Reset this cell to blank.
    pub fn erase(&mut self) {
        *self = Self::default();
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::new(ch)
    }
}
