// neighbors.rs - Moore neighborhood counting with edge truncation

use std::fmt;

use crate::grid::Grid;
use crate::rules::RuleIndex;

/// The eight Moore offsets as (row delta, col delta).
#[rustfmt::skip]
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Steps `index` by `delta`, or `None` when that would leave `0..=last`.
#[inline]
fn offset_within(index: usize, delta: isize, last: usize) -> Option<usize> {
    match delta {
        -1 if index == 0 => None,
        1 if index == last => None,
        _ => index.checked_add_signed(delta),
    }
}

/// Counts the live cells around `(row, col)`, excluding the cell itself.
///
/// The grid does not wrap: neighbors past any edge count as dead. The high
/// edge is detected against the last valid index so no lookup ever leaves
/// the grid.
pub fn count_alive_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let (last_row, last_col) = (grid.last_row(), grid.last_col());
    let mut count = 0;
    for &(dr, dc) in &MOORE_OFFSETS {
        let Some(nr) = offset_within(row, dr, last_row) else { continue };
        let Some(nc) = offset_within(col, dc, last_col) else { continue };
        if grid.get(nr, nc) {
            count += 1;
        }
    }
    count
}

/// The live-neighbor count of `(row, col)` as a rule table index.
#[inline]
pub fn neighbor_index(grid: &Grid, row: usize, col: usize) -> RuleIndex {
    RuleIndex::from_count(count_alive_neighbors(grid, row, col))
}

/// Per-cell neighbor counts taken from one grid snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    rows: usize,
    cols: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    /// Counts every cell of `grid`. The result does not borrow the grid, so
    /// the grid may be overwritten once this returns.
    pub fn snapshot(grid: &Grid) -> Self {
        let mut counts = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                counts.push(count_alive_neighbors(grid, row, col));
            }
        }
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            counts,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.counts[row * self.cols + col]
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> RuleIndex {
        RuleIndex::from_count(self.get(row, col))
    }
}

impl fmt::Display for NeighborCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.counts.chunks(self.cols) {
            for count in row {
                write!(f, "{count}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        for row in 0..rows {
            grid.set_row(row, &vec![true; cols]);
        }
        grid
    }

    #[test]
    fn full_grid_corners_edges_and_interior() {
        let grid = full(4, 5);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 3);
        assert_eq!(count_alive_neighbors(&grid, 0, 4), 3);
        assert_eq!(count_alive_neighbors(&grid, 3, 0), 3);
        assert_eq!(count_alive_neighbors(&grid, 3, 4), 3);
        assert_eq!(count_alive_neighbors(&grid, 0, 2), 5);
        assert_eq!(count_alive_neighbors(&grid, 3, 2), 5);
        assert_eq!(count_alive_neighbors(&grid, 1, 0), 5);
        assert_eq!(count_alive_neighbors(&grid, 2, 4), 5);
        assert_eq!(count_alive_neighbors(&grid, 1, 1), 8);
    }

    #[test]
    fn does_not_wrap() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 2, true);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 0);
        assert_eq!(count_alive_neighbors(&grid, 1, 1), 1);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, true);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 0);
    }

    #[test]
    fn single_row_grid_only_looks_sideways() {
        let grid = full(1, 4);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 1);
        assert_eq!(count_alive_neighbors(&grid, 0, 2), 2);
        assert_eq!(count_alive_neighbors(&grid, 0, 3), 1);
    }

    #[test]
    fn snapshot_displays_one_digit_per_cell() {
        let grid = Grid::from_rows(&[[true, true], [false, false]]);
        let counts = NeighborCounts::snapshot(&grid);
        assert_eq!(counts.get(1, 0), 2);
        assert_eq!(counts.to_string(), "11\n22\n");
    }

    #[test]
    fn indices_follow_counts() {
        let grid = full(3, 3);
        let counts = NeighborCounts::snapshot(&grid);
        assert_eq!(neighbor_index(&grid, 1, 1).get(), 8);
        assert_eq!(counts.index(0, 0).get(), 3);
        assert_eq!(counts.index(0, 1), neighbor_index(&grid, 0, 1));
    }
}
