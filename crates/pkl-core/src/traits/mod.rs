//! Seams for the two independently failing classification signals.

pub mod analysis_engine;
pub mod ast_classifier;

pub use analysis_engine::{AnalysisEngine, UnavailableEngine};
pub use ast_classifier::{AstClassifier, AstSignal};
