// automaton.rs - Owned grid + rule table session driven by a shell

use std::path::Path;

use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::config::AutomatonConfig;
use crate::engine::{self, StepStats};
use crate::error::Result;
use crate::grid::Grid;
use crate::history::CycleDetector;
use crate::neighbors::NeighborCounts;
use crate::patterns::{self, Pattern};
use crate::record;
use crate::rules::{RuleEdit, RuleTable};
use crate::selftest::{self, SelfTestReport};

/// Summary returned from [`Automaton::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub generation: u64,
    pub stats: StepStats,
    /// The new generation matches one of the recently seen ones.
    pub repeated: bool,
}

/// A running automaton: one grid, one rule table and the RNG that seeds them.
pub struct Automaton {
    config: AutomatonConfig,
    grid: Grid,
    rules: RuleTable,
    rng: SmallRng,
    generation: u64,
    history: CycleDetector,
}

impl Automaton {
    /// Starts with a random grid and the default rules.
    pub fn new(config: AutomatonConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = config.seeded_rng();
        let mut grid = Grid::new(config.rows, config.cols);
        grid.randomize(&mut rng);
        let mut history = CycleDetector::new(config.history_len);
        history.observe(&grid);
        Ok(Self {
            config,
            grid,
            rules: RuleTable::default(),
            rng,
            generation: 0,
            history,
        })
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Neighbor counts of the current grid.
    pub fn neighbor_counts(&self) -> NeighborCounts {
        NeighborCounts::snapshot(&self.grid)
    }

    fn reseeded(&mut self) {
        self.generation = 0;
        self.history.reset();
        self.history.observe(&self.grid);
    }

    pub fn randomize_grid(&mut self) {
        self.grid.randomize(&mut self.rng);
        self.reseeded();
        debug!(population = self.grid.population(), "Randomized grid");
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        patterns::apply_pattern_centered(&mut self.grid, pattern);
        self.reseeded();
        debug!(pattern = pattern.name, "Applied seed pattern");
    }

    pub fn step(&mut self) -> StepReport {
        let stats = engine::step(&mut self.grid, &self.rules);
        self.record_step(stats)
    }

    /// Bookkeeping for a step whose grid was computed elsewhere.
    pub fn commit_generation(&mut self, next: Grid) -> StepReport {
        let stats = engine::commit(&mut self.grid, next);
        self.record_step(stats)
    }

    fn record_step(&mut self, stats: StepStats) -> StepReport {
        self.generation += 1;
        let repeated = self.history.observe(&self.grid);
        if repeated {
            debug!(generation = self.generation, "Grid repeated a recent generation");
        }
        StepReport {
            generation: self.generation,
            stats,
            repeated,
        }
    }

    pub fn load_default_rules(&mut self) {
        self.rules.load_default();
        info!("Loaded default rules");
    }

    pub fn randomize_rules(&mut self) {
        self.rules.randomize(&mut self.rng);
        info!(rules = %self.rules, "Randomized rules");
    }

    pub fn edit_rule_entry(&mut self, edit: &RuleEdit) -> Result<()> {
        if let Err(err) = self.rules.edit_entry(edit) {
            warn!(%err, "Rejected rule edit");
            return Err(err);
        }
        debug!(rule_target = %edit.target, index = edit.index, state = edit.state, "Edited rule");
        Ok(())
    }

    /// Replaces the rule table from a file. The current rules stay in place
    /// unless the whole record loads.
    pub fn load_rules_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.rules = record::load_rules_from_file(path)?;
        info!(path = %path.display(), "Loaded rules from file");
        Ok(())
    }

    pub fn load_rules(&mut self) -> Result<()> {
        let path = self.config.rules_path.clone();
        self.load_rules_from_file(path)
    }

    pub fn save_rules_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        record::save_rules_to_file(&self.rules, path)?;
        info!(path = %path.display(), "Saved rules to file");
        Ok(())
    }

    pub fn save_rules(&self) -> Result<()> {
        self.save_rules_to_file(&self.config.save_path)
    }

    /// Runs the built-in self test. The session grid is not touched.
    pub fn run_self_test(&self) -> SelfTestReport {
        selftest::run_self_test()
    }

    pub fn describe_rules(&self) -> String {
        self.rules.to_string()
    }
}
