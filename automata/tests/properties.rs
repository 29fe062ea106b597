//! Behavioral laws of the counter, the step and the rule source.

use automata::rules::{DEFAULT_ALIVE_RULES, DEFAULT_DEAD_RULES, RULE_COUNT};
use automata::selftest::fixtures;
use automata::{
    Grid, RuleEdit, RuleTable, RuleTarget, count_alive_neighbors, load_from_record, run_self_test,
    step, to_record,
};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..=12, 1usize..=12).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(any::<bool>(), rows * cols).prop_map(move |cells| {
            let mut grid = Grid::new(rows, cols);
            for (i, alive) in cells.into_iter().enumerate() {
                grid.set(i / cols, i % cols, alive);
            }
            grid
        })
    })
}

fn arb_rules() -> impl Strategy<Value = RuleTable> {
    (any::<[bool; RULE_COUNT]>(), any::<[bool; RULE_COUNT]>())
        .prop_map(|(alive, dead)| RuleTable::new(alive, dead))
}

/// Neighbor count done the slow way, with signed coordinates.
fn reference_count(grid: &Grid, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = (row as i64 + dr, col as i64 + dc);
            if r < 0 || c < 0 || r >= grid.rows() as i64 || c >= grid.cols() as i64 {
                continue;
            }
            if grid.get(r as usize, c as usize) {
                count += 1;
            }
        }
    }
    count
}

fn in_bounds_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let span = |i: usize, len: usize| (i.saturating_sub(1)..=(i + 1).min(len - 1)).count() as u8;
    span(row, grid.rows()) * span(col, grid.cols()) - 1
}

fn boundary_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let (last_row, last_col) = (grid.rows() - 1, grid.cols() - 1);
    let mut cells = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if row == 0 || row == last_row || col == 0 || col == last_col {
                cells.push((row, col));
            }
        }
    }
    cells
}

proptest! {
    /// Every edge cell only sees neighbors that exist.
    #[test]
    fn boundary_cells_only_count_existing_neighbors(grid in arb_grid()) {
        for (row, col) in boundary_cells(&grid) {
            let count = count_alive_neighbors(&grid, row, col);
            prop_assert_eq!(count, reference_count(&grid, row, col));
            prop_assert!(count <= in_bounds_neighbors(&grid, row, col));
        }
    }

    #[test]
    fn interior_cells_match_reference(grid in arb_grid()) {
        for (row, col, _) in grid.iter() {
            prop_assert_eq!(count_alive_neighbors(&grid, row, col), reference_count(&grid, row, col));
        }
    }

    /// One step equals a map over the old grid using counts taken up front.
    #[test]
    fn step_is_a_map_over_a_snapshot(grid in arb_grid(), rules in arb_rules()) {
        let counts: Vec<u8> = grid
            .iter()
            .map(|(row, col, _)| reference_count(&grid, row, col))
            .collect();
        let expected: Vec<bool> = grid
            .iter()
            .zip(&counts)
            .map(|((_, _, alive), &n)| {
                if alive { rules.alive_rules()[n as usize] } else { rules.dead_rules()[n as usize] }
            })
            .collect();

        let mut stepped = grid.clone();
        step(&mut stepped, &rules);
        let actual: Vec<bool> = stepped.iter().map(|(_, _, alive)| alive).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn record_round_trip(rules in arb_rules()) {
        prop_assert_eq!(load_from_record(&to_record(&rules).unwrap()).unwrap(), rules);
    }

    /// An accepted edit changes exactly the addressed entry.
    #[test]
    fn edit_touches_one_entry(
        rules in arb_rules(),
        alive_target in any::<bool>(),
        index in 0usize..RULE_COUNT,
        state in 0u8..=1,
    ) {
        let target = if alive_target { RuleTarget::Alive } else { RuleTarget::Dead };
        let mut edited = rules;
        edited.edit_entry(&RuleEdit::new(target, index, state)).unwrap();

        for (t, before, after) in [
            (RuleTarget::Alive, rules.alive_rules(), edited.alive_rules()),
            (RuleTarget::Dead, rules.dead_rules(), edited.dead_rules()),
        ] {
            for i in 0..RULE_COUNT {
                if t == target && i == index {
                    prop_assert_eq!(after[i], state == 1);
                } else {
                    prop_assert_eq!(after[i], before[i]);
                }
            }
        }
    }

    #[test]
    fn invalid_edits_never_mutate(
        rules in arb_rules(),
        index in 0usize..20,
        state in 0u8..5,
    ) {
        prop_assume!(index >= RULE_COUNT || state > 1);
        let mut edited = rules;
        prop_assert!(edited.edit_entry(&RuleEdit::new(RuleTarget::Alive, index, state)).is_err());
        prop_assert_eq!(edited, rules);
    }

    #[test]
    fn load_default_ignores_prior_table(rules in arb_rules()) {
        let mut table = rules;
        table.load_default();
        prop_assert_eq!(table.alive_rules(), &DEFAULT_ALIVE_RULES);
        prop_assert_eq!(table.dead_rules(), &DEFAULT_DEAD_RULES);
    }
}

#[test]
fn alive_four_edit_is_isolated() {
    let mut table = RuleTable::default();
    table
        .edit_entry(&RuleEdit::new(RuleTarget::Alive, 4, 1))
        .unwrap();
    let mut alive = DEFAULT_ALIVE_RULES;
    alive[4] = true;
    assert_eq!(table, RuleTable::new(alive, DEFAULT_DEAD_RULES));
}

#[test]
fn fixtures_count_what_they_promise() {
    let report = run_self_test();
    assert!(report.passed(), "{report}");
    for (outcome, fixture) in report.outcomes.iter().zip(fixtures()) {
        assert_eq!(outcome.actual, fixture.expected);
    }
    // dead center, all eight neighbors alive
    assert_eq!(report.outcomes[8].actual, 8);
    // live center, three alive neighbors
    assert_eq!(report.outcomes[12].actual, 3);
}

#[test]
fn mixed_row_fixture_counts_three() {
    // two cells in the row below plus one beside, around a live center
    let mut grid = Grid::new(3, 3);
    for &(r, c) in &[(2, 1), (2, 2), (1, 2), (1, 1)] {
        grid.set(r, c, true);
    }
    assert_eq!(count_alive_neighbors(&grid, 1, 1), 3);
}

#[test]
fn lone_center_dies() {
    let mut grid = Grid::new(3, 3);
    grid.set(1, 1, true);
    assert_eq!(count_alive_neighbors(&grid, 1, 1), 0);
    step(&mut grid, &RuleTable::default());
    assert_eq!(grid.population(), 0);
}
