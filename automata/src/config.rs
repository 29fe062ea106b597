use std::fs;
use std::path::{Path, PathBuf};

use rand::{SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, Result};
use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS};
use crate::history::DEFAULT_HISTORY_LEN;

/// Static configuration for an automaton run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    /// Grid height in cells.
    pub rows: usize,
    /// Grid width in cells.
    pub cols: usize,
    /// Optional RNG seed for reproducible grids and random rules.
    pub rng_seed: Option<u64>,
    /// File read when rules are loaded without an explicit path.
    pub rules_path: PathBuf,
    /// File written when rules are saved without an explicit path.
    pub save_path: PathBuf,
    /// Number of past generations checked for repeats; 0 disables the check.
    pub history_len: usize,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            rng_seed: None,
            rules_path: PathBuf::from("rules.json"),
            save_path: PathBuf::from("output.json"),
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl AutomatonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 {
            return Err(AutomatonError::InvalidConfig("rows must be positive"));
        }
        if self.cols == 0 {
            return Err(AutomatonError::InvalidConfig("cols must be positive"));
        }
        Ok(())
    }

    /// Reads and validates a JSON config. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| AutomatonError::io(path, e))?;
        let config: Self = serde_json::from_slice(&bytes).map_err(|e| {
            AutomatonError::InvalidArgument(format!("config {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configured RNG, seeding from entropy if no seed is set.
    pub fn seeded_rng(&self) -> SmallRng {
        match self.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let seed: u64 = rand::random();
                SmallRng::seed_from_u64(seed)
            }
        }
    }
}
