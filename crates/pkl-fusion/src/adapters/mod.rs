//! Concrete signal adapters behind the `pkl_core::traits` seams.

pub mod ast_patterns;
pub mod engine_facets;
pub mod language;
pub mod response;
pub mod subprocess_engine;

pub use ast_patterns::PatternAstClassifier;
pub use engine_facets::default_engine_facets;
pub use language::{detect_language, Language};
pub use response::parse_engine_output;
pub use subprocess_engine::SubprocessEngine;
