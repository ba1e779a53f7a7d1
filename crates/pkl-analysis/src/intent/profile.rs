//! Intent profile aggregation.

use pkl_core::constants::{facet_names, CHARACTERISTIC_CONFIDENCE_THRESHOLD};
use pkl_core::models::{Characteristic, FacetScore, IntentProfile};

use super::labels::intent_label;

/// Reduce facet scores to one profile.
///
/// - characteristics: facets whose confidence exceeds 0.3
/// - primary intent: label of the highest-confidence characteristic
///   (first wins on ties), `general_development` when none qualifies
/// - confidence: Σ(confidence × weight) / Σ(weight)
pub fn aggregate_profile(scores: &[FacetScore]) -> IntentProfile {
    let characteristics: Vec<Characteristic> = scores
        .iter()
        .filter(|s| s.confidence > CHARACTERISTIC_CONFIDENCE_THRESHOLD)
        .map(|s| Characteristic {
            facet: s.facet.clone(),
            dimension: s.primary_dimension.clone(),
            confidence: s.confidence,
            weight: s.weight,
        })
        .collect();

    let mut top: Option<&Characteristic> = None;
    for c in &characteristics {
        match top {
            Some(t) if c.confidence <= t.confidence => {}
            _ => top = Some(c),
        }
    }
    let primary_intent = intent_label(top.map(|c| c.dimension.as_str()).unwrap_or("")).to_string();

    let total_weight: f64 = scores.iter().map(|s| s.weight).sum();
    let confidence = if total_weight > 0.0 {
        let weighted: f64 = scores.iter().map(|s| s.confidence * s.weight).sum();
        (weighted / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let primary_of = |facet: &str, default: &str| {
        scores
            .iter()
            .find(|s| s.facet == facet && !s.primary_dimension.is_empty())
            .map(|s| s.primary_dimension.clone())
            .unwrap_or_else(|| default.to_string())
    };

    IntentProfile {
        primary_intent,
        confidence,
        characteristics,
        complexity_level: primary_of(facet_names::COGNITIVE_COMPLEXITY, "medium"),
        workflow_type: primary_of(facet_names::WORKFLOW_PATTERN, "mixed"),
        expertise_level: primary_of(facet_names::DOMAIN_EXPERTISE, "intermediate"),
    }
}
