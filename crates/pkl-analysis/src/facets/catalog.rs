//! Built-in facet definitions.

use std::collections::BTreeMap;

use pkl_core::constants::facet_names;
use pkl_core::models::Facet;

/// The configured set of facets, in scoring order.
#[derive(Debug, Clone)]
pub struct FacetCatalog {
    facets: Vec<Facet>,
}

impl Default for FacetCatalog {
    fn default() -> Self {
        Self::new(Self::builtin())
    }
}

impl FacetCatalog {
    pub fn new(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// Built-in facets with their indicator terms and default weights.
    pub fn builtin() -> Vec<Facet> {
        vec![
            Facet::new(facet_names::PRIMARY_INTENT, 0.25)
                .dimension("explore", &["explore", "understand", "investigate", "look at"])
                .dimension("implement", &["add", "create", "implement", "build", "function"])
                .dimension("debug", &["fix", "bug", "error", "debug", "traceback"])
                .dimension("refactor", &["refactor", "clean", "restructure", "rename"])
                .dimension("optimize", &["optimize", "faster", "performance", "speed"])
                .dimension("document", &["document", "docstring", "readme", "comment"])
                .dimension("test", &["test", "assert", "verify", "coverage"]),
            Facet::new(facet_names::WORKFLOW_PATTERN, 0.20)
                .dimension("exploratory", &["try", "maybe", "experiment", "what if"])
                .dimension("iterative", &["again", "tweak", "adjust", "another"])
                .dimension("systematic", &["step", "first", "then", "plan"])
                .dimension("linear", &["finish", "done", "next"]),
            Facet::new(facet_names::COGNITIVE_COMPLEXITY, 0.15)
                .dimension("low", &["simple", "quick", "small"])
                .dimension("medium", &["several", "module", "component"])
                .dimension("high", &["architecture", "concurrency", "algorithm", "distributed"]),
            Facet::new(facet_names::DOMAIN_EXPERTISE, 0.15)
                .dimension("beginner", &["how do i", "what is", "tutorial", "basic"])
                .dimension("intermediate", &["best way", "pattern", "library"])
                .dimension("advanced", &["optimize", "generic", "trait", "async"])
                .dimension("expert", &["invariant", "lock-free", "unsafe", "formal"]),
            Facet::new(facet_names::TEMPORAL_PATTERN, 0.10)
                .dimension("burst", &["quick", "asap", "hotfix"])
                .dimension("sustained", &["long", "deep", "session"])
                .dimension("intermittent", &["later", "resume", "back to"]),
            Facet::new(facet_names::TECHNICAL_FOCUS, 0.15)
                .dimension("data_analysis", &["pandas", "dataframe", "groupby", "dataset"])
                .dimension("visualization", &["plot", "chart", "matplotlib", "seaborn"])
                .dimension("modeling", &["model", "train", "sklearn", "predict"])
                .dimension("infrastructure", &["docker", "deploy", "pipeline", "config"])
                .dimension("web_development", &["react", "html", "route", "api"]),
        ]
    }

    /// Built-in facets with weights taken from a (normalized) weight table.
    /// Facets absent from the table keep their built-in weight.
    pub fn with_weights(weights: &BTreeMap<String, f64>) -> Self {
        let facets = Self::builtin()
            .into_iter()
            .map(|mut f| {
                if let Some(w) = weights.get(&f.name) {
                    f.weight = *w;
                }
                f
            })
            .collect();
        Self::new(facets)
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn get(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.name == name)
    }

    /// Sum of all facet weights.
    pub fn total_weight(&self) -> f64 {
        self.facets.iter().map(|f| f.weight).sum()
    }
}
