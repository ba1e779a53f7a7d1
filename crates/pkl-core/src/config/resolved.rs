//! Normalized, effective configuration consumed by the classifiers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::normalize::normalize_table;
use super::{FacetWeightConfig, FusionProportions, PklConfig, ToggleConfig, ToggleFacet};

/// Every table here sums to 1.0 (±1e-6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub facet_weights: BTreeMap<String, f64>,
    pub toggles: BTreeMap<ToggleFacet, BTreeMap<String, f64>>,
    pub fusion: FusionProportions,
    pub engine_enabled: bool,
    pub engine_command: Option<String>,
    pub engine_args: Vec<String>,
    pub engine_timeout_secs: u64,
    pub reprobe_after_failures: u32,
    pub embedding_cache_size: u64,
    pub sequence_gap_secs: i64,
    /// Names of tables that needed repair while resolving.
    pub adjusted_tables: Vec<String>,
}

impl ResolvedConfig {
    pub fn from_config(config: &PklConfig) -> Self {
        let mut adjusted_tables = Vec::new();

        let facets = normalize_table(
            "facets.weights",
            &config.facets.effective_weights(),
            &FacetWeightConfig::default_weights(),
        );
        if facets.adjusted {
            adjusted_tables.push("facets.weights".to_string());
        }

        let mut toggles = BTreeMap::new();
        for facet in ToggleFacet::ALL {
            let name = format!("toggles.{facet}");
            let outcome = normalize_table(
                &name,
                &config.toggles.effective_table(facet),
                &ToggleConfig::default_table(facet),
            );
            if outcome.adjusted {
                adjusted_tables.push(name);
            }
            toggles.insert(facet, outcome.table);
        }

        let (fusion, fusion_adjusted) = config.fusion.effective_proportions();
        if fusion_adjusted {
            warn!(
                clio = fusion.clio,
                ast = fusion.ast,
                "fusion proportions did not sum to 1.0, renormalized"
            );
            adjusted_tables.push("fusion".to_string());
        }

        Self {
            facet_weights: facets.table,
            toggles,
            fusion,
            engine_enabled: config.engine.effective_enabled(),
            engine_command: config.engine.command.clone(),
            engine_args: config.engine.args.clone(),
            engine_timeout_secs: config.engine.effective_timeout_secs(),
            reprobe_after_failures: config.engine.effective_reprobe_after_failures(),
            embedding_cache_size: config.analysis.effective_embedding_cache_size(),
            sequence_gap_secs: config.analysis.effective_sequence_gap_secs(),
            adjusted_tables,
        }
    }

    /// Weight for a facet, 0.0 when unknown.
    pub fn facet_weight(&self, facet: &str) -> f64 {
        self.facet_weights.get(facet).copied().unwrap_or(0.0)
    }

    /// Toggle proportion for a label, `None` when the label is not in the table.
    pub fn toggle(&self, facet: ToggleFacet, label: &str) -> Option<f64> {
        self.toggles.get(&facet).and_then(|t| t.get(label)).copied()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        PklConfig::default().resolve()
    }
}
