// engine.rs - Synchronous transition step

use tracing::debug;

use crate::grid::Grid;
use crate::neighbors::NeighborCounts;
use crate::rules::RuleTable;

/// What changed during one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Computes the next generation from `grid` and `counts` without touching either.
///
/// `counts` must be the snapshot of `grid` itself.
pub fn apply_rules(grid: &Grid, counts: &NeighborCounts, rules: &RuleTable) -> Grid {
    debug_assert_eq!((grid.rows(), grid.cols()), (counts.rows(), counts.cols()));
    let mut next = Grid::new(grid.rows(), grid.cols());
    grid.for_each_cell(|row, col, alive| {
        next.set(row, col, rules.next_state(alive, counts.index(row, col)));
    });
    next
}

/// The generation after `grid` under `rules`.
pub fn next_generation(grid: &Grid, rules: &RuleTable) -> Grid {
    let counts = NeighborCounts::snapshot(grid);
    apply_rules(grid, &counts, rules)
}

/// Advances `grid` by one generation.
///
/// Every neighbor count is taken before any cell is written, so no cell sees
/// another cell's new state within the same step.
pub fn step(grid: &mut Grid, rules: &RuleTable) -> StepStats {
    let next = next_generation(grid, rules);
    let stats = commit(grid, next);
    debug!(
        births = stats.births,
        deaths = stats.deaths,
        population = stats.population,
        "Stepped grid"
    );
    stats
}

/// Replaces `grid` with `next` and tallies the difference.
pub fn commit(grid: &mut Grid, next: Grid) -> StepStats {
    let mut stats = StepStats::default();
    for ((_, _, before), (_, _, after)) in grid.iter().zip(next.iter()) {
        match (before, after) {
            (false, true) => stats.births += 1,
            (true, false) => stats.deaths += 1,
            _ => {}
        }
        if after {
            stats.population += 1;
        }
    }
    *grid = next;
    stats
}
