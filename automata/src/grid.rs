// grid.rs - Fixed-size two-state cell grid

use std::fmt;

use rand::Rng;

// Reference grid size
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 80;

pub const ALIVE_CHAR: char = '#';
pub const DEAD_CHAR: char = ' ';

/// Row-major grid of boolean cells. The dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid. Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Builds a grid from row slices, mostly useful for small hand-written layouts.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut grid = Self::new(height, width);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            assert_eq!(cells.len(), width, "row {row} has a different width");
            for (col, &alive) in cells.iter().enumerate() {
                grid.set(row, col, alive);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn last_row(&self) -> usize {
        self.rows - 1
    }

    pub fn last_col(&self) -> usize {
        self.cols - 1
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "({row}, {col}) out of bounds");
        row * self.cols + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = alive;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Sets every cell alive or dead with even odds.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.random_bool(0.5);
        }
    }

    /// Visits every cell in row-major order.
    pub fn for_each_cell<F: FnMut(usize, usize, bool)>(&self, mut visit: F) {
        for (idx, &alive) in self.cells.iter().enumerate() {
            visit(idx / self.cols, idx % self.cols, alive);
        }
    }

    /// Iterates `(row, col, alive)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &alive)| (idx / cols, idx % cols, alive))
    }

    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Overwrites one whole row. Used by steppers that compute rows independently.
    pub fn set_row(&mut self, row: usize, cells: &[bool]) {
        assert_eq!(cells.len(), self.cols, "row width mismatch");
        let start = row * self.cols;
        self.cells[start..start + self.cols].copy_from_slice(cells);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for &alive in self.row(row) {
                write!(f, "{}", if alive { ALIVE_CHAR } else { DEAD_CHAR })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
