//! Built-in self test for the neighborhood counter.
//!
//! Eighteen 3x3 fixtures are laid side by side on a 3-row scratch grid. The
//! first nine have a dead center and 0..=8 live neighbors; the second nine
//! repeat the same neighborhoods around a live center. A counter that
//! includes the cell itself fails every fixture in the second half.

use std::fmt;

use tracing::{info, warn};

use crate::grid::Grid;
use crate::neighbors::count_alive_neighbors;

/// Neighborhood cells in the order fixtures switch them on, as (row, col)
/// within the 3x3 block. Fixture `n` has the first `n` of these alive.
pub static FILL_ORDER: [(usize, usize); 8] = [
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 2),
    (1, 0),
    (0, 2),
    (0, 1),
    (0, 0),
];

pub const FIXTURE_COUNT: usize = 18;
const FIXTURE_WIDTH: usize = 3;
const CENTER: (usize, usize) = (1, 1);

/// One 3x3 pattern with a known neighbor count at its center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub center_alive: bool,
    pub expected: u8,
}

impl Fixture {
    /// Live cells of the 3x3 block, center included when it is alive.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let center = self.center_alive.then_some(CENTER);
        FILL_ORDER[..self.expected as usize]
            .iter()
            .copied()
            .chain(center)
    }
}

/// The canonical fixtures: dead centers counting 0..=8, then live centers counting 0..=8.
pub fn fixtures() -> impl Iterator<Item = Fixture> {
    [false, true].into_iter().flat_map(|center_alive| {
        (0..=8u8).map(move |expected| Fixture {
            center_alive,
            expected,
        })
    })
}

/// Scratch grid with every fixture written into its own three columns.
pub fn fixture_grid() -> Grid {
    let mut grid = Grid::new(FIXTURE_WIDTH, FIXTURE_WIDTH * FIXTURE_COUNT);
    for (slot, fixture) in fixtures().enumerate() {
        for (row, col) in fixture.live_cells() {
            grid.set(row, slot * FIXTURE_WIDTH + col, true);
        }
    }
    grid
}

/// Column of the center cell of fixture `slot` on the fixture grid.
pub fn center_col(slot: usize) -> usize {
    slot * FIXTURE_WIDTH + CENTER.1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub slot: usize,
    pub fixture: Fixture,
    pub actual: u8,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.actual == self.fixture.expected
    }
}

/// Result of one self-test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    pub outcomes: Vec<FixtureOutcome>,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(FixtureOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FixtureOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, center_alive) in [("dead center ", false), ("alive center", true)] {
            write!(f, "{label}:")?;
            for outcome in self.outcomes.iter().filter(|o| o.fixture.center_alive == center_alive) {
                write!(f, " {}", outcome.actual)?;
                if !outcome.passed() {
                    write!(f, " (fixture {} expected {})", outcome.slot, outcome.fixture.expected)?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "result: {}", if self.passed() { "pass" } else { "fail" })
    }
}

/// Runs the fixtures against the engine's neighborhood counter.
pub fn run_self_test() -> SelfTestReport {
    run_self_test_with(count_alive_neighbors)
}

/// Runs the fixtures against any counting function.
pub fn run_self_test_with<F>(counter: F) -> SelfTestReport
where
    F: Fn(&Grid, usize, usize) -> u8,
{
    let grid = fixture_grid();
    let outcomes: Vec<_> = fixtures()
        .enumerate()
        .map(|(slot, fixture)| FixtureOutcome {
            slot,
            fixture,
            actual: counter(&grid, CENTER.0, center_col(slot)),
        })
        .collect();

    let report = SelfTestReport { outcomes };
    for failure in report.failures() {
        warn!(
            slot = failure.slot,
            center_alive = failure.fixture.center_alive,
            expected = failure.fixture.expected,
            actual = failure.actual,
            "Self test fixture mismatch"
        );
    }
    info!(passed = report.passed(), "Self test finished");
    report
}
