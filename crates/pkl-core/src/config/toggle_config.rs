//! Toggle-percentage tables: expected proportion of each label per facet.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Facets that carry a toggle-percentage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleFacet {
    Intent,
    Task,
    Complexity,
    Domain,
}

impl ToggleFacet {
    pub const ALL: [ToggleFacet; 4] = [Self::Intent, Self::Task, Self::Complexity, Self::Domain];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intent => "intent",
            Self::Task => "task",
            Self::Complexity => "complexity",
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for ToggleFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label → expected proportion for each toggle facet.
/// Empty tables mean "use the compiled defaults" for that facet.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ToggleConfig {
    pub intent: BTreeMap<String, f64>,
    pub task: BTreeMap<String, f64>,
    pub complexity: BTreeMap<String, f64>,
    pub domain: BTreeMap<String, f64>,
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

impl ToggleConfig {
    /// Compiled default table for a facet.
    pub fn default_table(facet: ToggleFacet) -> BTreeMap<String, f64> {
        match facet {
            ToggleFacet::Intent => table(&[
                ("implement", 0.20),
                ("debug", 0.20),
                ("explore", 0.15),
                ("data_exploration", 0.10),
                ("refactor", 0.10),
                ("test", 0.05),
                ("model_development", 0.05),
                ("data_visualization", 0.05),
                ("optimize", 0.05),
                ("document", 0.05),
            ]),
            ToggleFacet::Task => table(&[
                ("data_analysis", 0.30),
                ("feature_development", 0.30),
                ("bug_fixing", 0.20),
                ("maintenance", 0.20),
            ]),
            ToggleFacet::Complexity => table(&[("low", 0.30), ("medium", 0.50), ("high", 0.20)]),
            ToggleFacet::Domain => table(&[
                ("data_science", 0.40),
                ("web_development", 0.30),
                ("infrastructure", 0.15),
                ("general", 0.15),
            ]),
        }
    }

    /// Configured table for a facet (may be empty).
    pub fn table(&self, facet: ToggleFacet) -> &BTreeMap<String, f64> {
        match facet {
            ToggleFacet::Intent => &self.intent,
            ToggleFacet::Task => &self.task,
            ToggleFacet::Complexity => &self.complexity,
            ToggleFacet::Domain => &self.domain,
        }
    }

    /// Mutable access for wholesale replacement.
    pub fn table_mut(&mut self, facet: ToggleFacet) -> &mut BTreeMap<String, f64> {
        match facet {
            ToggleFacet::Intent => &mut self.intent,
            ToggleFacet::Task => &mut self.task,
            ToggleFacet::Complexity => &mut self.complexity,
            ToggleFacet::Domain => &mut self.domain,
        }
    }

    /// Configured table, or the defaults when the facet is not configured.
    pub fn effective_table(&self, facet: ToggleFacet) -> BTreeMap<String, f64> {
        let configured = self.table(facet);
        if configured.is_empty() {
            Self::default_table(facet)
        } else {
            configured.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_sum_to_one() {
        for facet in ToggleFacet::ALL {
            let sum: f64 = ToggleConfig::default_table(facet).values().sum();
            assert!((sum - 1.0).abs() < 1e-9, "{facet} sums to {sum}");
        }
    }

    #[test]
    fn configured_table_replaces_defaults_wholesale() {
        let mut cfg = ToggleConfig::default();
        cfg.task.insert("only".to_string(), 1.0);
        let t = cfg.effective_table(ToggleFacet::Task);
        assert_eq!(t.len(), 1);
        assert_eq!(t["only"], 1.0);
    }
}
