//! Fixed dimension → intent label table.

use pkl_core::constants::DEFAULT_INTENT_LABEL;

/// Every label the pipeline can emit as a primary intent.
pub const INTENT_LABELS: &[&str] = &[
    "explore",
    "implement",
    "debug",
    "refactor",
    "optimize",
    "document",
    "test",
    "data_exploration",
    "data_visualization",
    "model_development",
    DEFAULT_INTENT_LABEL,
];

/// Map a facet dimension to its intent label.
///
/// Dimensions without an entry map to `general_development`.
pub fn intent_label(dimension: &str) -> &'static str {
    match dimension {
        "explore" | "exploratory" => "explore",
        "implement" | "linear" | "systematic" => "implement",
        "debug" => "debug",
        "refactor" | "iterative" => "refactor",
        "optimize" => "optimize",
        "document" => "document",
        "test" => "test",
        "data_analysis" => "data_exploration",
        "visualization" => "data_visualization",
        "modeling" => "model_development",
        _ => DEFAULT_INTENT_LABEL,
    }
}

/// Whether `label` is one the pipeline can produce.
pub fn is_known_label(label: &str) -> bool {
    INTENT_LABELS.contains(&label)
}
