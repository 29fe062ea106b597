// rules.rs - Transition rule table and single-entry edits

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, Result};

/// Number of possible live-neighbor counts (0 through 8).
pub const RULE_COUNT: usize = 9;

pub const DEFAULT_ALIVE_RULES: [bool; RULE_COUNT] =
    [false, false, true, true, false, false, false, false, false];
pub const DEFAULT_DEAD_RULES: [bool; RULE_COUNT] =
    [false, false, false, true, false, false, false, false, false];

/// Which half of the rule table an edit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTarget {
    /// Rules applied to cells that are currently alive ("full").
    Alive,
    /// Rules applied to cells that are currently dead ("empty").
    Dead,
}

impl RuleTarget {
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'f' | 'F' => Ok(Self::Alive),
            'e' | 'E' => Ok(Self::Dead),
            other => Err(AutomatonError::InvalidArgument(format!(
                "rule target must be 'e' (dead) or 'f' (alive), got {other:?}"
            ))),
        }
    }
}

impl FromStr for RuleTarget {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alive" | "full" | "f" => Ok(Self::Alive),
            "dead" | "empty" | "e" => Ok(Self::Dead),
            other => Err(AutomatonError::InvalidArgument(format!(
                "unknown rule target {other:?}"
            ))),
        }
    }
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
        })
    }
}

/// A neighbor count usable as a rule index. Only `0..=8` can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleIndex(u8);

impl RuleIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < RULE_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(AutomatonError::InvalidArgument(format!(
                "rule index must be in 0..=8, got {index}"
            )))
        }
    }

    /// Wraps a count produced by the neighborhood counter, which never exceeds 8.
    pub(crate) fn from_count(count: u8) -> Self {
        debug_assert!((count as usize) < RULE_COUNT);
        Self(count)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = RuleIndex> {
        (0..RULE_COUNT as u8).map(RuleIndex)
    }
}

/// A requested single-entry change, validated by [`RuleTable::edit_entry`].
///
/// `state` is kept as the raw 0/1 the user typed so that bad values are
/// rejected at the table rather than at whatever collected them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEdit {
    pub target: RuleTarget,
    pub index: usize,
    pub state: u8,
}

impl RuleEdit {
    pub fn new(target: RuleTarget, index: usize, state: u8) -> Self {
        Self {
            target,
            index,
            state,
        }
    }

    /// Checks the index and state, returning the typed parts.
    pub fn validate(&self) -> Result<(RuleTarget, RuleIndex, bool)> {
        let index = RuleIndex::new(self.index)?;
        let state = match self.state {
            0 => false,
            1 => true,
            other => {
                return Err(AutomatonError::InvalidArgument(format!(
                    "rule state must be 0 or 1, got {other}"
                )));
            }
        };
        Ok((self.target, index, state))
    }
}

/// Next-state lookup keyed by (current state, live-neighbor count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleTable {
    alive: [bool; RULE_COUNT],
    dead: [bool; RULE_COUNT],
}

impl Default for RuleTable {
    /// Conway's Life: survive on 2 or 3, born on exactly 3.
    fn default() -> Self {
        Self {
            alive: DEFAULT_ALIVE_RULES,
            dead: DEFAULT_DEAD_RULES,
        }
    }
}

impl RuleTable {
    pub fn new(alive: [bool; RULE_COUNT], dead: [bool; RULE_COUNT]) -> Self {
        Self { alive, dead }
    }

    /// Each of the 18 entries independently true with even odds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table = Self::default();
        table.randomize(rng);
        table
    }

    pub fn load_default(&mut self) {
        *self = Self::default();
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (alive, dead) in self.alive.iter_mut().zip(self.dead.iter_mut()) {
            *dead = rng.random_bool(0.5);
            *alive = rng.random_bool(0.5);
        }
    }

    pub fn alive_rules(&self) -> &[bool; RULE_COUNT] {
        &self.alive
    }

    pub fn dead_rules(&self) -> &[bool; RULE_COUNT] {
        &self.dead
    }

    pub fn rules(&self, target: RuleTarget) -> &[bool; RULE_COUNT] {
        match target {
            RuleTarget::Alive => &self.alive,
            RuleTarget::Dead => &self.dead,
        }
    }

    pub fn entry(&self, target: RuleTarget, index: RuleIndex) -> bool {
        self.rules(target)[index.get()]
    }

    pub fn set_entry(&mut self, target: RuleTarget, index: RuleIndex, state: bool) {
        let rules = match target {
            RuleTarget::Alive => &mut self.alive,
            RuleTarget::Dead => &mut self.dead,
        };
        rules[index.get()] = state;
    }

    /// Applies one validated edit. On error the table is untouched.
    pub fn edit_entry(&mut self, edit: &RuleEdit) -> Result<()> {
        let (target, index, state) = edit.validate()?;
        self.set_entry(target, index, state);
        Ok(())
    }

    /// Next state of a cell given its current state and live-neighbor count.
    #[inline]
    pub fn next_state(&self, alive: bool, count: RuleIndex) -> bool {
        let idx = count.get();
        if alive { self.alive[idx] } else { self.dead[idx] }
    }
}

fn write_rules(f: &mut fmt::Formatter<'_>, label: &str, rules: &[bool]) -> fmt::Result {
    write!(f, "{label}:")?;
    for &rule in rules {
        write!(f, " {}", u8::from(rule))?;
    }
    writeln!(f)
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rules(f, "dead cell rules ", &self.dead)?;
        write_rules(f, "alive cell rules", &self.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(count: usize) -> RuleIndex {
        RuleIndex::new(count).unwrap()
    }

    #[test]
    fn default_is_conway() {
        let table = RuleTable::default();
        assert!(table.next_state(true, idx(2)));
        assert!(table.next_state(true, idx(3)));
        assert!(!table.next_state(true, idx(1)));
        assert!(!table.next_state(true, idx(4)));
        assert!(table.next_state(false, idx(3)));
        assert!(!table.next_state(false, idx(2)));
    }

    #[test]
    fn next_state_covers_every_index() {
        let table = RuleTable::new([true; RULE_COUNT], [false; RULE_COUNT]);
        for index in RuleIndex::all() {
            assert!(table.next_state(true, index));
            assert!(!table.next_state(false, index));
        }
        assert!(RuleIndex::new(9).is_err());
        assert!(RuleIndex::new(usize::MAX).is_err());
    }

    #[test]
    fn rule_index_rejects_nine() {
        assert!(RuleIndex::new(8).is_ok());
        assert!(matches!(
            RuleIndex::new(9),
            Err(AutomatonError::InvalidArgument(_))
        ));
        assert_eq!(RuleIndex::all().count(), 9);
    }

    #[test]
    fn edit_rejects_bad_state_without_mutation() {
        let mut table = RuleTable::default();
        let err = table.edit_entry(&RuleEdit::new(RuleTarget::Dead, 0, 2));
        assert!(matches!(err, Err(AutomatonError::InvalidArgument(_))));
        assert_eq!(table, RuleTable::default());
    }

    #[test]
    fn edit_rejects_bad_index_without_mutation() {
        let mut table = RuleTable::default();
        let err = table.edit_entry(&RuleEdit::new(RuleTarget::Alive, 9, 1));
        assert!(matches!(err, Err(AutomatonError::InvalidArgument(_))));
        assert_eq!(table, RuleTable::default());
    }

    #[test]
    fn edit_writes_one_entry() {
        let mut table = RuleTable::default();
        table
            .edit_entry(&RuleEdit::new(RuleTarget::Dead, 6, 1))
            .unwrap();
        assert!(table.dead_rules()[6]);
        assert_eq!(table.alive_rules(), &DEFAULT_ALIVE_RULES);
    }

    #[test]
    fn targets_parse_from_letters_and_words() {
        assert_eq!(RuleTarget::from_letter('e').unwrap(), RuleTarget::Dead);
        assert_eq!(RuleTarget::from_letter('f').unwrap(), RuleTarget::Alive);
        assert!(RuleTarget::from_letter('x').is_err());
        assert_eq!("alive".parse::<RuleTarget>().unwrap(), RuleTarget::Alive);
        assert_eq!(" Empty ".parse::<RuleTarget>().unwrap(), RuleTarget::Dead);
        assert!("both".parse::<RuleTarget>().is_err());
    }

    #[test]
    fn display_lists_dead_then_alive() {
        let text = RuleTable::default().to_string();
        assert_eq!(
            text,
            "dead cell rules : 0 0 0 1 0 0 0 0 0\nalive cell rules: 0 0 1 1 0 0 0 0 0\n"
        );
    }
}
