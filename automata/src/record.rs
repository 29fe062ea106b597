//! Persisted rule record
//!
//! A rule table is stored as a flat JSON object with eighteen scalar fields:
//! `ecrule0..=8` for dead ("empty") cells followed by `fcrule0..=8` for alive
//! ("full") cells. There is no version field and no nesting; extra keys are
//! ignored on load. Loading either yields a complete table or fails as a
//! whole.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use tracing::debug;

use crate::error::{AutomatonError, Result};
use crate::rules::{RULE_COUNT, RuleTable};

/// Accepts a JSON boolean or the integers 0 and 1.
fn bool_or_bit<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        other => Err(de::Error::custom(format!(
            "expected a boolean or 0/1, got {other}"
        ))),
    }
}

/// Flat on-disk shape of a [`RuleTable`].
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule0: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule1: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule2: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule3: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule4: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule5: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule6: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule7: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub ecrule8: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule0: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule1: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule2: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule3: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule4: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule5: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule6: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule7: bool,
    #[serde(deserialize_with = "bool_or_bit")] pub fcrule8: bool,
}

impl RuleRecord {
    /// All 18 entries in field order: nine dead-cell rules, then nine alive-cell rules.
    #[rustfmt::skip]
    pub fn entries(&self) -> [bool; 2 * RULE_COUNT] {
        [
            self.ecrule0, self.ecrule1, self.ecrule2, self.ecrule3, self.ecrule4,
            self.ecrule5, self.ecrule6, self.ecrule7, self.ecrule8,
            self.fcrule0, self.fcrule1, self.fcrule2, self.fcrule3, self.fcrule4,
            self.fcrule5, self.fcrule6, self.fcrule7, self.fcrule8,
        ]
    }

    #[rustfmt::skip]
    pub fn from_entries(e: [bool; 2 * RULE_COUNT]) -> Self {
        Self {
            ecrule0: e[0], ecrule1: e[1], ecrule2: e[2],
            ecrule3: e[3], ecrule4: e[4], ecrule5: e[5],
            ecrule6: e[6], ecrule7: e[7], ecrule8: e[8],
            fcrule0: e[9], fcrule1: e[10], fcrule2: e[11],
            fcrule3: e[12], fcrule4: e[13], fcrule5: e[14],
            fcrule6: e[15], fcrule7: e[16], fcrule8: e[17],
        }
    }
}

impl From<&RuleTable> for RuleRecord {
    fn from(table: &RuleTable) -> Self {
        let mut entries = [false; 2 * RULE_COUNT];
        entries[..RULE_COUNT].copy_from_slice(table.dead_rules());
        entries[RULE_COUNT..].copy_from_slice(table.alive_rules());
        Self::from_entries(entries)
    }
}

impl From<RuleRecord> for RuleTable {
    fn from(record: RuleRecord) -> Self {
        let entries = record.entries();
        let mut dead = [false; RULE_COUNT];
        let mut alive = [false; RULE_COUNT];
        dead.copy_from_slice(&entries[..RULE_COUNT]);
        alive.copy_from_slice(&entries[RULE_COUNT..]);
        RuleTable::new(alive, dead)
    }
}

/// Builds a table from a generic JSON record.
pub fn load_from_record(record: &Value) -> Result<RuleTable> {
    RuleRecord::deserialize(record)
        .map(RuleTable::from)
        .map_err(|e| AutomatonError::MalformedRecord(e.to_string()))
}

/// Emits all 18 named fields for `table`.
pub fn to_record(table: &RuleTable) -> Result<Value> {
    serde_json::to_value(RuleRecord::from(table))
        .map_err(|e| AutomatonError::MalformedRecord(e.to_string()))
}

/// Parses a rule table from JSON bytes.
pub fn deserialize_rules(bytes: &[u8]) -> Result<RuleTable> {
    serde_json::from_slice::<RuleRecord>(bytes)
        .map(RuleTable::from)
        .map_err(|e| AutomatonError::MalformedRecord(e.to_string()))
}

/// Serializes a rule table to indented JSON.
pub fn serialize_rules(table: &RuleTable) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(&RuleRecord::from(table))
        .map_err(|e| AutomatonError::MalformedRecord(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn load_rules_from_file(path: impl AsRef<Path>) -> Result<RuleTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| AutomatonError::io(path, e))?;
    let table = deserialize_rules(&bytes)?;
    debug!(path = %path.display(), "Loaded rule record");
    Ok(table)
}

pub fn save_rules_to_file(table: &RuleTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = serialize_rules(table)?;
    fs::write(path, bytes).map_err(|e| AutomatonError::io(path, e))?;
    debug!(path = %path.display(), "Saved rule record");
    Ok(())
}
