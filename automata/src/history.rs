use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

pub const DEFAULT_HISTORY_LEN: usize = 10;

pub fn hash_grid(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.hash(&mut hasher);
    hasher.finish()
}

/// Remembers the hashes of the last few generations to spot repeats.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    history: Vec<u64>,
    next: usize,
    capacity: usize,
}

impl CycleDetector {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Vec::with_capacity(capacity),
            next: 0,
            capacity,
        }
    }

    /// Records `grid` and reports whether it matches one of the remembered
    /// generations. A zero capacity never reports a repeat.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let hash = hash_grid(grid);
        if self.history.contains(&hash) {
            return true;
        }
        if self.history.len() < self.capacity {
            self.history.push(hash);
        } else {
            self.history[self.next] = hash;
        }
        self.next = (self.next + 1) % self.capacity;
        false
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.next = 0;
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}
