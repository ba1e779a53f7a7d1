//! Configuration system for PKL.
//! TOML-based, layered resolution: env > project > user > defaults.
//! Weight and proportion tables are repaired, never rejected.

pub mod analysis_config;
pub mod engine_config;
pub mod facet_config;
pub mod fusion_config;
pub mod normalize;
pub mod pkl_config;
pub mod resolved;
pub mod toggle_config;

pub use analysis_config::AnalysisConfig;
pub use engine_config::EngineConfig;
pub use facet_config::FacetWeightConfig;
pub use fusion_config::{FusionConfig, FusionProportions};
pub use normalize::{normalize_table, NormalizationOutcome};
pub use pkl_config::PklConfig;
pub use resolved::ResolvedConfig;
pub use toggle_config::{ToggleConfig, ToggleFacet};
