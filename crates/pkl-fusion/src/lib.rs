//! # pkl-fusion
//!
//! Hybrid intent classification for mined coding sessions.
//!
//! Two independently failing signals, the local pattern classifier and an
//! external analysis engine, are fused under a configurable weighting
//! policy. When a signal is missing the weights shift to the survivor;
//! when both are missing a fixed low-confidence fallback is returned.
//!
//! ```text
//! raw JSON ──ingest──▶ Session + Conversation
//!                          │
//!                          ├─▶ SessionAnalyzer (embeddings, facets, procedure)
//!                          ├─▶ AstClassifier ──┐
//!                          └─▶ AnalysisEngine ─┴─▶ fuse + toggle boost ─▶ ClassificationResult
//! ```

pub mod adapters;
pub mod config_store;
pub mod coordinator;
pub mod fusion;
pub mod ingest;

pub use adapters::{PatternAstClassifier, SubprocessEngine};
pub use config_store::{ConfigSnapshot, ConfigStore};
pub use coordinator::{canonical_intent, fallback_result, ConfiguredClassifier, HybridClassifier};
pub use fusion::{fuse, Availability, Vote};
pub use ingest::{normalize, parse_session, parse_sessions};
