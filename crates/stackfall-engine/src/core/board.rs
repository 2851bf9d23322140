use std::fmt;

use crate::{BoardPatternError, ConfigError, OutOfBoundsError, Shape};

/// Fixed-size grid of filled/empty cells.
///
/// The board is the authoritative occupancy model: locked cells and the
/// footprint of the falling shape (while placed) are both stored as filled
/// cells and are indistinguishable from each other. Renderers read it; they
/// never write to it.
///
/// # Coordinate System
///
/// - `row` 0 is the top row and grows downward
/// - `col` 0 is the left column and grows rightward
/// - Shape positions use `(x, y)` = `(col, row)`
///
/// # Example
///
/// ```
/// use stackfall_engine::Board;
///
/// let mut board = Board::from_pattern(&["##", "..", "##", ".#"]).unwrap();
/// assert_eq!(board.clear_filled_lines(), 2);
/// assert_eq!(board.to_string(), "..\n..\n..\n.#\n");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{}", self.rows, self.columns)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl Board {
    pub const DEFAULT_ROWS: usize = 20;
    pub const DEFAULT_COLUMNS: usize = 10;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero. Use [`Board::try_new`] for
    /// untrusted sizes; [`GameConfig::validate`](crate::GameConfig::validate)
    /// applies the same check before a game builds its board.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "board dimensions must be non-zero");
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    /// Creates an empty board, rejecting zero dimensions.
    pub fn try_new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        if rows == 0 || columns == 0 {
            return Err(ConfigError::ZeroDimension { rows, columns });
        }
        Ok(Self::new(rows, columns))
    }

    /// Builds a board from text rows where `#` is filled and `.` is empty.
    pub fn from_pattern(pattern: &[&str]) -> Result<Self, BoardPatternError> {
        let columns = pattern.first().map_or(0, |row| row.chars().count());
        if columns == 0 {
            return Err(BoardPatternError::Empty);
        }

        let mut board = Self::new(pattern.len(), columns);
        for (row, line) in pattern.iter().enumerate() {
            let len = line.chars().count();
            if len != columns {
                return Err(BoardPatternError::Ragged {
                    row,
                    len,
                    expected: columns,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '#' => board.cells[row * columns + col] = true,
                    '.' => {}
                    _ => return Err(BoardPatternError::InvalidChar { row, col, ch }),
                }
            }
        }
        Ok(board)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks_exact(self.columns)
    }

    /// Returns an iterator over the filled `(row, col)` cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(|(i, _)| (i / self.columns, i % self.columns))
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Returns whether the cell at `(row, col)` is filled.
    pub fn is_filled(&self, row: usize, col: usize) -> Result<bool, OutOfBoundsError> {
        let index = self.index(row, col)?;
        Ok(self.cells[index])
    }

    /// Sets the filled state of a single cell.
    pub fn set_filled(&mut self, row: usize, col: usize, filled: bool) -> Result<(), OutOfBoundsError> {
        let index = self.index(row, col)?;
        self.cells[index] = filled;
        Ok(())
    }

    /// Returns whether every cell of `row` is filled.
    ///
    /// Rows outside the board are never full.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        row < self.rows && self.row_cells(row).iter().all(|cell| *cell)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, OutOfBoundsError> {
        if row >= self.rows || col >= self.columns {
            return Err(OutOfBoundsError {
                row,
                col,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(row * self.columns + col)
    }

    /// Maps a signed `(x, y)` to a cell index, or `None` when outside the grid.
    fn signed_index(&self, x: i32, y: i32) -> Option<usize> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.index(row, col).ok()
    }

    fn row_cells(&self, row: usize) -> &[bool] {
        &self.cells[row * self.columns..][..self.columns]
    }

    fn row_cells_mut(&mut self, row: usize) -> &mut [bool] {
        &mut self.cells[row * self.columns..][..self.columns]
    }

    /// Returns whether `shape` overlaps a filled cell or leaves the board.
    ///
    /// A cell collides when it is below the bottom row, left of column 0,
    /// right of the last column, or on a filled cell. Cells above the top row
    /// are not checked: a shape may extend upward past row 0 without
    /// colliding.
    #[must_use]
    pub fn check_collision(&self, shape: &Shape) -> bool {
        shape.occupied_positions().any(|(x, y)| {
            let Ok(row) = usize::try_from(y) else {
                return x < 0 || usize::try_from(x).is_ok_and(|col| col >= self.columns);
            };
            let Ok(col) = usize::try_from(x) else {
                return true;
            };
            row >= self.rows || col >= self.columns || self.cells[row * self.columns + col]
        })
    }

    /// Marks every occupied cell of `shape` as filled.
    ///
    /// No collision check is done. Cells outside the grid are skipped.
    pub fn place(&mut self, shape: &Shape) {
        self.set_shape_cells(shape, true);
    }

    /// Clears every occupied cell of `shape`; the inverse of [`Self::place`].
    pub fn remove(&mut self, shape: &Shape) {
        self.set_shape_cells(shape, false);
    }

    fn set_shape_cells(&mut self, shape: &Shape, filled: bool) {
        for (x, y) in shape.occupied_positions() {
            if let Some(index) = self.signed_index(x, y) {
                self.cells[index] = filled;
            } else {
                debug_assert!(y < 0, "shape cell ({x}, {y}) is outside the board");
            }
        }
    }

    /// Clears full rows and collapses the cells above each of them.
    ///
    /// Rows are scanned top to bottom; every full row is emptied and its
    /// index recorded. Then, for each recorded row in that order, every
    /// filled cell above it moves down by one, scanning upward from the row
    /// just above the cleared one. Collapses are applied one after another,
    /// each on the result of the previous one.
    ///
    /// Returns the number of rows cleared.
    pub fn clear_filled_lines(&mut self) -> usize {
        let mut cleared_rows = Vec::new();
        for row in 0..self.rows {
            if self.is_row_full(row) {
                self.row_cells_mut(row).fill(false);
                cleared_rows.push(row);
            }
        }

        for &cleared in &cleared_rows {
            for row in (0..cleared).rev() {
                for col in 0..self.columns {
                    let index = row * self.columns + col;
                    if self.cells[index] {
                        self.cells[index] = false;
                        self.cells[index + self.columns] = true;
                    }
                }
            }
        }

        cleared_rows.len()
    }
}
