//! Facet weight table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::facet_names;

/// Per-facet weights. An empty table means "use the compiled defaults".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FacetWeightConfig {
    pub weights: BTreeMap<String, f64>,
}

impl FacetWeightConfig {
    /// Compiled default weights for the built-in facets.
    pub fn default_weights() -> BTreeMap<String, f64> {
        [
            (facet_names::PRIMARY_INTENT, 0.25),
            (facet_names::WORKFLOW_PATTERN, 0.20),
            (facet_names::COGNITIVE_COMPLEXITY, 0.15),
            (facet_names::DOMAIN_EXPERTISE, 0.15),
            (facet_names::TEMPORAL_PATTERN, 0.10),
            (facet_names::TECHNICAL_FOCUS, 0.15),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    /// Configured weights, or the defaults when none are configured.
    ///
    /// Facets missing from a partial table keep their default weight.
    pub fn effective_weights(&self) -> BTreeMap<String, f64> {
        let mut table = Self::default_weights();
        for (k, v) in &self.weights {
            table.insert(k.clone(), *v);
        }
        table
    }
}
