//! Rule-driven two-state cellular automaton engine.
//!
//! A [`Grid`] of boolean cells advances one generation at a time: every
//! cell's Moore-neighborhood count is taken from the same snapshot, then a
//! [`RuleTable`] maps (current state, count) to the next state. Edges are
//! hard walls, not a torus.

pub mod automaton;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod neighbors;
pub mod patterns;
pub mod record;
pub mod rules;
pub mod selftest;

pub use automaton::{Automaton, StepReport};
pub use config::AutomatonConfig;
pub use engine::{StepStats, apply_rules, next_generation, step};
pub use error::{AutomatonError, Result};
pub use grid::Grid;
pub use neighbors::{NeighborCounts, count_alive_neighbors, neighbor_index};
pub use record::{RuleRecord, load_from_record, load_rules_from_file, save_rules_to_file, to_record};
pub use rules::{RuleEdit, RuleIndex, RuleTable, RuleTarget};
pub use selftest::{SelfTestReport, run_self_test};
