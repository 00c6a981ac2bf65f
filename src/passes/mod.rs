//! Pass affiliation updates: stamp `properties.pass` on each resort
//! from a table of exact names and substring patterns

use crate::resorts::ResortCollection;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const INDEPENDENT: &str = "Independent";

/// Affiliation table, loaded from TOML:
///
/// ```toml
/// protected = ["Ikon", "Epic"]
///
/// [[pass]]
/// label = "Mountain Collective"
/// exact = ["Alta Ski Area", "Snowbird"]
/// patterns = ["chamonix", "megeve"]
/// ```
#[derive(Debug, Deserialize)]
pub struct PassTable {
    /// Pass labels never overridden by this table (e.g. Ikon, Epic)
    #[serde(default)]
    pub protected: Vec<String>,
    #[serde(default, rename = "pass")]
    pub rules: Vec<PassRule>,
}

#[derive(Debug, Deserialize)]
pub struct PassRule {
    pub label: String,
    /// Exact resort name matches
    #[serde(default)]
    pub exact: Vec<String>,
    /// Lowercase substrings matched against the lowercased resort name
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl PassTable {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pass table {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse pass table {}", path.display()))
    }
}

impl PassRule {
    fn matches(&self, name: &str) -> bool {
        if self.exact.iter().any(|n| n == name) {
            return true;
        }
        let lower = name.to_lowercase();
        self.patterns.iter().any(|p| lower.contains(p.as_str()))
    }
}

/// Counts reported after an update run
#[derive(Debug)]
pub struct PassUpdate {
    /// Resorts newly assigned, per pass label
    pub updated: BTreeMap<String, usize>,
    /// Final distribution over all resorts, per pass label
    pub distribution: BTreeMap<String, usize>,
}

/// Apply the table to every resort
///
/// Labels the table itself assigns are first reset to Independent so
/// re-runs are idempotent; protected labels are never touched. Rules
/// match in table order, exact names before patterns within a rule.
pub fn apply_passes(resorts: &mut ResortCollection, table: &PassTable) -> PassUpdate {
    let mut updated: BTreeMap<String, usize> = BTreeMap::new();

    for feature in &mut resorts.features {
        let current = feature.pass().unwrap_or(INDEPENDENT).to_string();

        if table.protected.iter().any(|p| *p == current) {
            continue;
        }
        if table.rules.iter().any(|r| r.label == current) {
            feature.set_pass(INDEPENDENT);
        }

        let Some(name) = feature.name().map(str::to_string) else {
            continue;
        };
        if let Some(rule) = table.rules.iter().find(|r| r.matches(&name)) {
            feature.set_pass(&rule.label);
            *updated.entry(rule.label.clone()).or_insert(0) += 1;
        }
    }

    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    for feature in &resorts.features {
        let label = feature.pass().unwrap_or(INDEPENDENT).to_string();
        *distribution.entry(label).or_insert(0) += 1;
    }

    PassUpdate {
        updated,
        distribution,
    }
}
