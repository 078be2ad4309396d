//! Screen buffer: grid + cursor + active charset.
//!
//! The screen is what the parser drives. It owns the only copy of the grid
//! and exposes the small set of operations an instrument console uses:
//! positioning, character output with auto-wrap, and clearing. All inputs are
//! sanitized by clamping, so no operation can fail.
//!
//! # Invariants
//!
//! 1. **Fixed width**: every row has exactly `cols` cells for the lifetime of
//!    the screen.
//! 2. **Monotonic height**: rows are appended when the cursor moves below the
//!    last row and are never removed, not even by [`Screen::clear_screen`].
//! 3. **Cursor in bounds before writes**: `cursor.col < cols` always holds,
//!    and the grid is grown to include `cursor.row` before any cell is
//!    written there.

use crate::cell::Cell;
use crate::charset::Charset;
use crate::config::ScreenConfig;
use crate::cursor::Cursor;
use crate::grid::Grid;
use crate::parser::Action;

/// Reconstructed console screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    charset: Charset,
}

impl Default for Screen {
    fn default() -> Self {
        Self::with_config(&ScreenConfig::default())
    }
}

impl Screen {
    /// Create a blank screen of `cols` columns and an initial `rows` rows.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            cursor: Cursor::default(),
            charset: Charset::default(),
        }
    }

    /// Create a blank screen sized by `config`.
    pub fn with_config(config: &ScreenConfig) -> Self {
        Self::new(config.cols, config.rows)
    }

    /// Number of columns (fixed).
    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Current number of rows.
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Active character set.
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Select the active character set.
    pub fn set_charset(&mut self, charset: Charset) {
        self.charset = charset;
    }

    /// Read-only access to the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get a reference to the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.cell(row, col)
    }

    /// Move the cursor to `(row, col)`, growing the grid to include `row`.
    ///
    /// The column is clamped to the right margin. Growth appends blank rows
    /// until `rows() == row + 1` and is permanent.
    pub fn ensure_position(&mut self, row: usize, col: usize) {
        self.grow_to_include(row);
        self.cursor.move_to(row, col, self.cols());
    }

    /// Write one character at the cursor.
    ///
    /// `\n` moves to column 0 of the next row, `\r` to column 0 of the current
    /// row. Anything else is translated through the active charset, stored at
    /// the cursor, and advances the cursor by one column, wrapping to the next
    /// row at the right margin.
    pub fn write_char(&mut self, ch: char) {
        match ch {
            '\n' => {
                self.cursor.line_feed();
                self.grow_to_include(self.cursor.row);
            }
            '\r' => self.cursor.carriage_return(),
            _ => {
                let glyph = self.charset.translate(ch);
                let Cursor { row, col } = self.cursor;
                self.grow_to_include(row);
                if let Some(cell) = self.grid.cell_mut(row, col) {
                    cell.set_content(glyph);
                }
                if self.cursor.advance(self.cols()) {
                    self.grow_to_include(self.cursor.row);
                }
            }
        }
    }

    /// Write every character of `text` in order.
    pub fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.write_char(ch);
        }
    }

    /// CUF: move the cursor right by `count`, stopping at the right margin.
    pub fn cursor_forward(&mut self, count: usize) {
        self.cursor.move_right(count, self.cols());
    }

    /// Move the cursor left by `count`, stopping at column 0.
    pub fn cursor_backward(&mut self, count: usize) {
        self.cursor.move_left(count);
    }

    /// Blank every cell and home the cursor. The row count is unchanged.
    pub fn clear_screen(&mut self) {
        self.grid.erase_all();
        self.cursor.home();
    }

    /// Blank the current row from the cursor column through the last column.
    pub fn clear_to_end_of_line(&mut self) {
        self.grid.erase_line_right(self.cursor.row, self.cursor.col);
    }

    /// Apply one parsed action.
    ///
    /// Actions with no screen effect (`Sgr`, `Escape`) are ignored.
    pub fn apply(&mut self, action: &Action) {
        match *action {
            Action::Print(ch) => self.write_char(ch),
            Action::Newline => self.write_char('\n'),
            Action::CarriageReturn => self.write_char('\r'),
            Action::CursorPosition { row, col } => {
                self.ensure_position(usize::from(row), usize::from(col));
            }
            Action::CursorForward(count) => match usize::try_from(count) {
                Ok(n) => self.cursor_forward(n),
                Err(_) => self.cursor_backward(count.unsigned_abs() as usize),
            },
            Action::EraseDisplay => self.clear_screen(),
            Action::EraseToEndOfLine => self.clear_to_end_of_line(),
            Action::DesignateCharset(charset) => self.set_charset(charset),
            Action::Sgr(_) | Action::Escape(_) => {}
        }
    }

    /// Trimmed text of `width` cells at a 0-indexed position.
    ///
    /// Returns `None` when the position is outside the grid or the span is
    /// blank, i.e. when the console has not (yet) drawn anything there.
    pub fn text_at(&self, row: usize, col: usize, width: usize) -> Option<String> {
        self.grid
            .text_span(row, col, width)
            .filter(|text| !text.is_empty())
    }

    /// Serialize the screen to text.
    ///
    /// Each row has its trailing blanks removed, rows are joined with `\n`,
    /// trailing blank rows are dropped, and exactly one `\n` terminates the
    /// result. A blank screen renders as `"\n"`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.rows() * (self.cols() + 1));
        for (i, row) in self.grid.iter_rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let line: String = row.iter().map(Cell::content).collect();
            out.push_str(line.trim_end());
        }
        let content_len = out.trim_end().len();
        out.truncate(content_len);
        out.push('\n');
        out
    }

    /// Rendered rows without the trailing newline, one entry per line.
    pub fn lines(&self) -> Vec<String> {
        self.render().lines().map(str::to_string).collect()
    }

    fn grow_to_include(&mut self, row: usize) {
        let added = self.grid.grow_to(row.saturating_add(1));
        if added > 0 {
            crate::debug!(added, rows = self.grid.rows(), "screen grew");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_with(cols: usize, rows: usize, text: &str) -> Screen {
        let mut s = Screen::new(cols, rows);
        s.write_str(text);
        s
    }

    // ── ensure_position ────────────────────────────────────────────

    #[test]
    fn ensure_position_within_bounds() {
        let mut s = Screen::new(80, 24);
        s.ensure_position(5, 10);
        assert_eq!(s.cursor(), Cursor::at(5, 10));
        assert_eq!(s.rows(), 24);
    }

    #[test]
    fn ensure_position_grows_rows() {
        let mut s = Screen::new(80, 24);
        s.ensure_position(30, 0);
        assert_eq!(s.rows(), 31);
        assert_eq!(s.cursor(), Cursor::at(30, 0));
    }

    #[test]
    fn ensure_position_clamps_column() {
        let mut s = Screen::new(80, 24);
        s.ensure_position(1, 200);
        assert_eq!(s.cursor(), Cursor::at(1, 79));
    }

    #[test]
    fn growth_is_permanent() {
        let mut s = Screen::new(10, 2);
        s.ensure_position(9, 0);
        s.ensure_position(0, 0);
        s.clear_screen();
        assert_eq!(s.rows(), 10);
    }

    // ── write_char ─────────────────────────────────────────────────

    #[test]
    fn write_char_stores_and_advances() {
        let s = screen_with(10, 2, "ab");
        assert_eq!(s.cell(0, 0).map(Cell::content), Some('a'));
        assert_eq!(s.cell(0, 1).map(Cell::content), Some('b'));
        assert_eq!(s.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn newline_moves_to_next_row_column_zero() {
        let s = screen_with(10, 2, "abc\nd");
        assert_eq!(s.cell(1, 0).map(Cell::content), Some('d'));
        assert_eq!(s.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn newline_past_last_row_grows() {
        let s = screen_with(10, 1, "a\nb\nc");
        assert_eq!(s.rows(), 3);
        assert_eq!(s.render(), "a\nb\nc\n");
    }

    #[test]
    fn carriage_return_keeps_row() {
        let s = screen_with(10, 1, "abc\rX");
        assert_eq!(s.render(), "Xbc\n");
    }

    #[test]
    fn full_row_wraps_exactly_once() {
        let s = screen_with(5, 1, "abcdefg");
        assert_eq!(s.rows(), 2);
        assert_eq!(s.render(), "abcde\nfg\n");
        assert_eq!(s.cursor(), Cursor::at(1, 2));
    }

    #[test]
    fn writing_exactly_cols_characters_leaves_cursor_on_next_row() {
        let s = screen_with(4, 3, "wxyz");
        assert_eq!(s.cursor(), Cursor::at(1, 0));
        assert_eq!(s.render(), "wxyz\n");
    }

    #[test]
    fn zero_initial_rows_still_writes() {
        let s = screen_with(4, 0, "hi");
        assert_eq!(s.rows(), 1);
        assert_eq!(s.render(), "hi\n");
    }

    // ── charset ────────────────────────────────────────────────────

    #[test]
    fn line_drawing_substitution_follows_charset() {
        let mut s = Screen::new(10, 1);
        s.set_charset(Charset::LineDrawing);
        s.write_str("lqk");
        s.set_charset(Charset::Ascii);
        s.write_str("q");
        assert_eq!(s.render(), "┌─┐q\n");
    }

    // ── clearing ───────────────────────────────────────────────────

    #[test]
    fn clear_screen_blanks_and_homes() {
        let mut s = screen_with(10, 3, "one\ntwo\nthree");
        s.clear_screen();
        assert_eq!(s.cursor(), Cursor::at(0, 0));
        assert_eq!(s.render(), "\n");
        assert_eq!(s.rows(), 3);
    }

    #[test]
    fn clear_to_end_of_line_keeps_cursor() {
        let mut s = screen_with(10, 2, "abcdef\nxyz");
        s.ensure_position(0, 3);
        s.clear_to_end_of_line();
        assert_eq!(s.cursor(), Cursor::at(0, 3));
        assert_eq!(s.render(), "abc\nxyz\n");
    }

    #[test]
    fn cursor_forward_clamps_at_margin() {
        let mut s = Screen::new(10, 1);
        s.cursor_forward(4);
        s.write_char('x');
        s.cursor_forward(100);
        s.write_char('y');
        assert_eq!(s.render(), "    x    y\n");
    }

    #[test]
    fn negative_cursor_forward_moves_left() {
        let mut s = screen_with(10, 1, "abcd");
        s.apply(&Action::CursorForward(-2));
        assert_eq!(s.cursor(), Cursor::at(0, 2));
        s.write_char('Z');
        assert_eq!(s.render(), "abZd\n");
        s.apply(&Action::CursorForward(-100));
        assert_eq!(s.cursor(), Cursor::at(0, 0));
    }

    // ── render ─────────────────────────────────────────────────────

    #[test]
    fn render_trims_trailing_blanks_and_rows() {
        let mut s = Screen::new(20, 10);
        s.ensure_position(2, 4);
        s.write_str("mid");
        assert_eq!(s.render(), "\n\n    mid\n");
    }

    #[test]
    fn render_is_idempotent() {
        let s = screen_with(8, 4, "ab\n  cd");
        assert_eq!(s.render(), s.render());
    }

    #[test]
    fn lines_splits_rendered_text() {
        let s = screen_with(8, 4, "ab\n\ncd");
        assert_eq!(s.lines(), vec!["ab", "", "cd"]);
    }

    // ── text_at ────────────────────────────────────────────────────

    #[test]
    fn text_at_reads_trimmed_span() {
        let mut s = Screen::new(80, 12);
        s.ensure_position(10, 42);
        s.write_str(" 41K");
        assert_eq!(s.text_at(10, 42, 3).as_deref(), Some("41"));
        assert_eq!(s.text_at(3, 0, 10), None);
        assert_eq!(s.text_at(50, 0, 10), None);
    }

    // ── apply ──────────────────────────────────────────────────────

    #[test]
    fn apply_ignores_attribute_and_unknown_sequences() {
        let mut s = screen_with(10, 2, "ab");
        let before = s.clone();
        s.apply(&Action::Sgr(vec![1]));
        s.apply(&Action::Escape(b"\x1b[2;3p".to_vec()));
        assert_eq!(s, before);
    }

    #[test]
    fn apply_cursor_position_grows_rows() {
        let mut s = Screen::new(80, 2);
        s.apply(&Action::CursorPosition { row: 9, col: 3 });
        assert_eq!(s.rows(), 10);
        assert_eq!(s.cursor(), Cursor::at(9, 3));
    }
}
