use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Confidence, DegradationEvent, SessionAnalysis};

/// Which signal produced a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Local language-pattern classifier.
    Ast,
    /// External analysis engine.
    Clio,
    /// Fixed fallback when nothing else was available.
    Default,
}

/// Fusion proportions actually applied to one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub ast: f64,
    pub clio: f64,
}

/// One supporting observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub source: SignalSource,
    pub detail: String,
}

impl Evidence {
    pub fn new(source: SignalSource, detail: impl Into<String>) -> Self {
        Self {
            source,
            detail: detail.into(),
        }
    }
}

/// Which signals contributed to a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub ast: bool,
    pub clio: bool,
    /// True only for the fixed fallback result.
    pub fallback: bool,
}

/// Secondary labels only the external engine produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineLabels {
    pub task: Option<String>,
    pub complexity: Option<String>,
    pub domain: Option<String>,
}

/// Final verdict for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub session_id: String,
    pub primary_intent: String,
    pub confidence: Confidence,
    pub weights: SignalWeights,
    pub evidence: Vec<Evidence>,
    /// Intent label → weighted support in [0.0, 1.0].
    pub intent_scores: BTreeMap<String, f64>,
    pub provenance: Provenance,
    pub engine_labels: EngineLabels,
    /// Signals that were unavailable or failed for this call.
    pub degradations: Vec<DegradationEvent>,
    /// Config version the call was evaluated against.
    pub config_version: u64,
    /// Embeddings, facet scores, and the procedural profile.
    pub analysis: Option<SessionAnalysis>,
}

impl ClassificationResult {
    /// Whether the result came from the fixed fallback path.
    pub fn is_fallback(&self) -> bool {
        self.provenance.fallback
    }
}
