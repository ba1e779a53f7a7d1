use serde::{Deserialize, Serialize};

/// Verdict of the local, language-pattern-based classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstSignal {
    pub primary_intent: String,
    pub confidence: f64,
    pub evidence: Vec<String>,
}

/// Synchronous in-process classifier over code content.
///
/// Availability is fixed at construction. An available classifier may
/// still return `None` for content it cannot judge (e.g. empty code).
pub trait AstClassifier: Send + Sync {
    /// Classify `code` taken from `file_name`.
    fn classify(&self, code: &str, file_name: &str) -> Option<AstSignal>;

    /// Whether this classifier was constructed enabled.
    fn is_available(&self) -> bool;

    /// Human-readable classifier name.
    fn name(&self) -> &str;
}
