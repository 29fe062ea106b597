// lib.rs - Row coroutine stepper
//
// Each row of the next generation is produced by its own tokio task. Every
// task reads the same frozen snapshot of the grid, and nothing is written
// back until the last row has joined, so the result is identical to the
// synchronous `automata::step`.

use std::sync::Arc;

use automata::{Grid, RuleTable, StepStats, engine, neighbor_index};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CoroError {
    #[error("failed to start tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("row task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Coroutine that computes one row of the next generation.
pub async fn process_row(
    row_index: usize,
    snapshot: Arc<Grid>,
    rules: RuleTable,
) -> (usize, Vec<bool>) {
    let mut row_result = Vec::with_capacity(snapshot.cols());
    for col in 0..snapshot.cols() {
        let count = neighbor_index(&snapshot, row_index, col);
        let alive = snapshot.get(row_index, col);
        row_result.push(rules.next_state(alive, count));

        tokio::task::yield_now().await;
    }
    (row_index, row_result)
}

/// Computes the next generation with one task per row.
pub async fn next_generation(grid: &Grid, rules: &RuleTable) -> Result<Grid, CoroError> {
    let snapshot = Arc::new(grid.clone());

    let mut handles = Vec::with_capacity(grid.rows());
    for row in 0..grid.rows() {
        handles.push(tokio::spawn(process_row(row, Arc::clone(&snapshot), *rules)));
    }

    let mut next = Grid::new(grid.rows(), grid.cols());
    for handle in handles {
        let (row_index, completed_row) = handle.await?;
        next.set_row(row_index, &completed_row);
    }
    Ok(next)
}

/// Advances `grid` by one generation. `grid` is only written once every row
/// task has finished; on error it is left unchanged.
pub async fn step(grid: &mut Grid, rules: &RuleTable) -> Result<StepStats, CoroError> {
    let next = next_generation(grid, rules).await?;
    let stats = engine::commit(grid, next);
    debug!(
        births = stats.births,
        deaths = stats.deaths,
        population = stats.population,
        "Stepped grid with row coroutines"
    );
    Ok(stats)
}

/// Owns a runtime so synchronous drivers can step with row coroutines.
pub struct CoroStepper {
    runtime: tokio::runtime::Runtime,
}

impl CoroStepper {
    pub fn new() -> Result<Self, CoroError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    pub fn next_generation(&self, grid: &Grid, rules: &RuleTable) -> Result<Grid, CoroError> {
        self.runtime.block_on(next_generation(grid, rules))
    }

    pub fn step(&self, grid: &mut Grid, rules: &RuleTable) -> Result<StepStats, CoroError> {
        self.runtime.block_on(step(grid, rules))
    }
}
