//! Facet scorer: blends code and conversation similarity to each
//! dimension prototype, then applies session-derived adjustments.

use std::collections::HashMap;

use pkl_core::constants::{
    facet_names, CODE_SIMILARITY_WEIGHT, CONVERSATION_SIMILARITY_WEIGHT, SEMANTIC_EMBEDDING_DIMS,
};
use pkl_core::models::{DimensionScore, Facet, FacetScore, Session};

use super::catalog::FacetCatalog;
use crate::embeddings::{cosine_similarity, dimension_prototype};
use crate::embeddings::generator::normalize_text;

/// Inputs shared by every facet for one session.
pub struct ScoringContext<'a> {
    pub code_embedding: &'a [f32],
    pub conversation_embedding: &'a [f32],
    pub session: &'a Session,
    /// Raw code + conversation text, searched for indicator terms.
    pub text: &'a str,
}

/// Scores every dimension of every facet in a catalog.
///
/// Prototypes are computed once at construction.
pub struct FacetScorer {
    catalog: FacetCatalog,
    prototypes: HashMap<(String, String), Vec<f32>>,
}

impl FacetScorer {
    pub fn new(catalog: FacetCatalog) -> Self {
        let mut prototypes = HashMap::new();
        for facet in catalog.facets() {
            for dim in &facet.dimensions {
                prototypes.insert(
                    (facet.name.clone(), dim.clone()),
                    dimension_prototype(&facet.name, dim, SEMANTIC_EMBEDDING_DIMS),
                );
            }
        }
        Self {
            catalog,
            prototypes,
        }
    }

    pub fn catalog(&self) -> &FacetCatalog {
        &self.catalog
    }

    /// Score all facets, in catalog order.
    pub fn score_all(&self, ctx: &ScoringContext<'_>) -> Vec<FacetScore> {
        let text = normalize_text(ctx.text);
        self.catalog
            .facets()
            .iter()
            .map(|f| self.score_facet(f, ctx, &text))
            .collect()
    }

    fn score_facet(&self, facet: &Facet, ctx: &ScoringContext<'_>, text: &str) -> FacetScore {
        let adjustment = session_adjustment(&facet.name, ctx.session);

        let scores: Vec<DimensionScore> = facet
            .dimensions
            .iter()
            .map(|dim| {
                let base = match self.prototypes.get(&(facet.name.clone(), dim.clone())) {
                    Some(proto) => {
                        CODE_SIMILARITY_WEIGHT * cosine_similarity(ctx.code_embedding, proto)
                            + CONVERSATION_SIMILARITY_WEIGHT
                                * cosine_similarity(ctx.conversation_embedding, proto)
                    }
                    None => 0.0,
                };
                let score = (base + adjustment).clamp(0.0, 1.0);
                let matched_indicators = facet
                    .indicators
                    .get(dim)
                    .map(|terms| {
                        terms
                            .iter()
                            .filter(|t| text.contains(t.to_lowercase().as_str()))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                DimensionScore {
                    dimension: dim.clone(),
                    score,
                    matched_indicators,
                }
            })
            .collect();

        let (primary_dimension, confidence) = pick_primary(&scores);

        FacetScore {
            facet: facet.name.clone(),
            scores,
            primary_dimension,
            confidence,
            weight: facet.weight,
        }
    }
}

/// Session-derived additive adjustment for a facet.
fn session_adjustment(facet: &str, session: &Session) -> f64 {
    match facet {
        facet_names::COGNITIVE_COMPLEXITY => 0.05 * (session.code_deltas.len() as f64 - 5.0),
        facet_names::TEMPORAL_PATTERN => {
            let hours = session.duration_hours();
            if hours < 1.0 {
                0.2
            } else if hours > 4.0 {
                0.1
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Argmax (first wins on ties) and the gap to the runner-up.
fn pick_primary(scores: &[DimensionScore]) -> (String, f64) {
    let mut best: Option<&DimensionScore> = None;
    for s in scores {
        match best {
            Some(b) if s.score <= b.score => {}
            _ => best = Some(s),
        }
    }
    let Some(best) = best else {
        return (String::new(), 0.0);
    };
    let second = scores
        .iter()
        .filter(|s| !std::ptr::eq(*s, best))
        .map(|s| s.score)
        .fold(f64::NEG_INFINITY, f64::max);
    let confidence = if second.is_finite() {
        (best.score - second).clamp(0.0, 1.0)
    } else {
        best.score.clamp(0.0, 1.0)
    };
    (best.dimension.clone(), confidence)
}
