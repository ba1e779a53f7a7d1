use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named classification axis with an ordered set of candidate dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    /// Candidate dimensions, in tie-break order.
    pub dimensions: Vec<String>,
    /// Dimension → indicator terms that tend to co-occur with it.
    pub indicators: BTreeMap<String, Vec<String>>,
    /// Relative weight of this facet in profile aggregation.
    pub weight: f64,
}

impl Facet {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            dimensions: Vec::new(),
            indicators: BTreeMap::new(),
            weight,
        }
    }

    /// Append a dimension together with its indicator terms.
    pub fn dimension(mut self, name: &str, indicators: &[&str]) -> Self {
        self.dimensions.push(name.to_string());
        self.indicators.insert(
            name.to_string(),
            indicators.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

/// Score of one dimension within a facet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: String,
    /// Similarity score in [0.0, 1.0].
    pub score: f64,
    /// Indicator terms for this dimension found in the session text.
    pub matched_indicators: Vec<String>,
}

/// Scores of every dimension of a facet plus the winning dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetScore {
    pub facet: String,
    /// Per-dimension scores in the facet's dimension order.
    pub scores: Vec<DimensionScore>,
    pub primary_dimension: String,
    /// Gap between the best and second-best score, in [0.0, 1.0].
    pub confidence: f64,
    pub weight: f64,
}

impl FacetScore {
    /// Score for a dimension, if the facet has it.
    pub fn score_of(&self, dimension: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|s| s.dimension == dimension)
            .map(|s| s.score)
    }
}
