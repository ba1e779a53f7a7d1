use serde::{Deserialize, Serialize};

use super::{FacetScore, IntentProfile, ProceduralAnalysis};

/// Local analysis of one session: embeddings, facets, intent and procedure.
///
/// Exposed on classification results for diagnostic consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAnalysis {
    pub session_id: String,
    pub code_embedding: Vec<f32>,
    pub conversation_embedding: Vec<f32>,
    pub facet_scores: Vec<FacetScore>,
    pub intent_profile: IntentProfile,
    pub procedural: ProceduralAnalysis,
}
