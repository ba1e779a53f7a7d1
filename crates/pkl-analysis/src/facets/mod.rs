//! Multi-facet intent scoring.

pub mod catalog;
pub mod scorer;

pub use catalog::FacetCatalog;
pub use scorer::{FacetScorer, ScoringContext};
