/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of semantic (code / conversation) embeddings.
pub const SEMANTIC_EMBEDDING_DIMS: usize = 512;

/// Dimensionality of procedural embeddings.
pub const PROCEDURAL_EMBEDDING_DIMS: usize = 128;

/// Bucket stride between vocabulary categories.
pub const CATEGORY_STRIDE: usize = 64;

/// Namespace offset for code-derived signal.
pub const CODE_NAMESPACE_OFFSET: usize = 0;

/// Namespace offset for conversation-derived signal.
pub const CONVERSATION_NAMESPACE_OFFSET: usize = 256;

/// Blend weight of the code embedding in facet scoring.
pub const CODE_SIMILARITY_WEIGHT: f64 = 0.6;

/// Blend weight of the conversation embedding in facet scoring.
pub const CONVERSATION_SIMILARITY_WEIGHT: f64 = 0.4;

/// Minimum facet confidence for a facet to become a profile characteristic.
pub const CHARACTERISTIC_CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Maximum gap between consecutive actions of one sequence (seconds).
pub const DEFAULT_SEQUENCE_GAP_SECS: i64 = 300;

/// Hard ceiling for any fused or boosted confidence.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Confidence of the fixed fallback result when no signal is available.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Label used whenever no specific intent can be assigned.
pub const DEFAULT_INTENT_LABEL: &str = "general_development";

/// Multiplier applied to an expected proportion when boosting confidence.
pub const TOGGLE_BOOST_FACTOR: f64 = 0.3;

/// Tolerance used when checking whether a table sums to 1.0.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// Default timeout for one analysis-engine invocation (seconds).
pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 20;

/// Consecutive engine failures after which availability is re-probed.
pub const DEFAULT_REPROBE_AFTER_FAILURES: u32 = 3;

/// Default capacity of the embedding memo cache.
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 2_048;

/// Canonical facet names.
pub mod facet_names {
    pub const PRIMARY_INTENT: &str = "primary_intent";
    pub const WORKFLOW_PATTERN: &str = "workflow_pattern";
    pub const COGNITIVE_COMPLEXITY: &str = "cognitive_complexity";
    pub const DOMAIN_EXPERTISE: &str = "domain_expertise";
    pub const TEMPORAL_PATTERN: &str = "temporal_pattern";
    pub const TECHNICAL_FOCUS: &str = "technical_focus";
}
