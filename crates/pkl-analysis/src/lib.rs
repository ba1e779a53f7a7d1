//! # pkl-analysis
//!
//! Local, deterministic session analysis.
//!
//! | Stage | Module |
//! |-------|--------|
//! | Vocabulary-weighted pseudo-embeddings | `embeddings` |
//! | Dimension prototypes + facet scoring | `facets` |
//! | Intent profile aggregation | `intent` |
//! | Actions, sequences, goals, procedural profile | `procedural` |
//!
//! `SessionAnalyzer` runs all stages for one session (or a rayon batch).

pub mod embeddings;
pub mod facets;
pub mod intent;
pub mod pipeline;
pub mod procedural;

pub use embeddings::EmbeddingGenerator;
pub use facets::{FacetCatalog, FacetScorer};
pub use intent::{aggregate_profile, intent_label};
pub use pipeline::SessionAnalyzer;
pub use procedural::ProceduralAnalyzer;
