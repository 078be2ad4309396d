//! Screen grid: growable 2D cell matrix.
//!
//! The grid owns a flat vector of cells indexed by `(row, col)` in row-major
//! order. The column count is fixed at construction; the row count only ever
//! grows, by appending blank rows at the bottom.

use crate::cell::Cell;

/// 2D cell grid with a fixed width and an append-only height.
///
/// Invariant: `cells.len() == cols * rows`, so every row has exactly `cols`
/// cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    cols: usize,
    rows: usize,
}

impl Grid {
    /// Create a new grid filled with blank cells.
    ///
    /// A zero column count is raised to one so every row can hold a cursor.
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        Self {
            cells: vec![Cell::default(); cols * rows],
            cols,
            rows,
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get a reference to the cell at `(row, col)`.
    ///
    /// Returns `None` if out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            Some(&self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    /// Get a mutable reference to the cell at `(row, col)`.
    ///
    /// Returns `None` if out of bounds.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Get a slice of cells for the given row.
    ///
    /// Returns `None` if `row` is out of bounds.
    pub fn row_cells(&self, row: usize) -> Option<&[Cell]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterate over all rows, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }

    // ── Growth ──────────────────────────────────────────────────────

    /// Append blank rows until the grid has at least `rows` rows.
    ///
    /// Returns the number of rows appended. Never removes rows.
    pub fn grow_to(&mut self, rows: usize) -> usize {
        if rows <= self.rows {
            return 0;
        }
        let added = rows - self.rows;
        self.cells.resize(rows * self.cols, Cell::default());
        self.rows = rows;
        added
    }

    // ── Erase operations ────────────────────────────────────────────

    /// ED 2: erase every cell of every row.
    pub fn erase_all(&mut self) {
        for cell in &mut self.cells {
            cell.erase();
        }
    }

    /// EL 0: erase from `(row, col)` through the end of the row.
    ///
    /// Out-of-range rows are ignored.
    pub fn erase_line_right(&mut self, row: usize, col: usize) {
        if row >= self.rows {
            return;
        }
        let start = self.index(row, col.min(self.cols));
        let end = self.index(row, 0) + self.cols;
        for cell in &mut self.cells[start..end] {
            cell.erase();
        }
    }

    // ── Text extraction ─────────────────────────────────────────────

    /// Text of one row with trailing whitespace removed.
    pub fn row_text(&self, row: usize) -> Option<String> {
        self.row_cells(row).map(cells_to_trimmed_string)
    }

    /// Text of `width` cells starting at `(row, col)`, trimmed on both sides.
    ///
    /// The span is cut at the right margin. Returns `None` when `(row, col)`
    /// is outside the grid.
    pub fn text_span(&self, row: usize, col: usize, width: usize) -> Option<String> {
        let cells = self.row_cells(row)?;
        if col >= self.cols {
            return None;
        }
        let end = col.saturating_add(width).min(self.cols);
        let text: String = cells[col..end].iter().map(Cell::content).collect();
        Some(text.trim().to_string())
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

fn cells_to_trimmed_string(cells: &[Cell]) -> String {
    let text: String = cells.iter().map(Cell::content).collect();
    text.trim_end().to_string()
}
