use serde::{Deserialize, Serialize};

/// A facet whose winning dimension was decisive enough to characterize the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Characteristic {
    pub facet: String,
    pub dimension: String,
    pub confidence: f64,
    pub weight: f64,
}

/// Reduction of all facet scores into one overall "why" summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentProfile {
    pub primary_intent: String,
    pub confidence: f64,
    pub characteristics: Vec<Characteristic>,
    pub complexity_level: String,
    pub workflow_type: String,
    pub expertise_level: String,
}
