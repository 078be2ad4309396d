//! Screen cursor: the current writing position.
//!
//! Columns are always clamped to the screen width. Rows are never clamped
//! here: moving below the last row is how the screen learns it has to grow,
//! so row bounds are the grid's concern (see [`Screen`](crate::Screen)).

/// Cursor position, 0-indexed from the top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    /// Current row.
    pub row: usize,
    /// Current column. Always `< cols` of the owning screen.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at the given position.
    pub fn at(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Move to an absolute position, clamping the column to `cols`.
    pub fn move_to(&mut self, row: usize, col: usize, cols: usize) {
        self.row = row;
        self.col = col.min(cols.saturating_sub(1));
    }

    /// CUF: move right by `count` columns, stopping at the right margin.
    pub fn move_right(&mut self, count: usize, cols: usize) {
        self.col = self.col.saturating_add(count).min(cols.saturating_sub(1));
    }

    /// Move left by `count` columns, stopping at column 0.
    pub fn move_left(&mut self, count: usize) {
        self.col = self.col.saturating_sub(count);
    }

    /// CR: return to column 0.
    pub fn carriage_return(&mut self) {
        self.col = 0;
    }

    /// LF: move to column 0 of the next row.
    pub fn line_feed(&mut self) {
        self.row = self.row.saturating_add(1);
        self.col = 0;
    }

    /// Step one column right after a printable character.
    ///
    /// Returns `true` when the step crossed the right margin and the cursor
    /// auto-wrapped to column 0 of the next row.
    pub fn advance(&mut self, cols: usize) -> bool {
        self.col += 1;
        if self.col >= cols {
            self.line_feed();
            true
        } else {
            false
        }
    }

    /// Reset to the home position.
    pub fn home(&mut self) {
        *self = Self::default();
    }
}
