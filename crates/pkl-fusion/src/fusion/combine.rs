//! Combination rule for two verdicts.

use pkl_core::models::{Confidence, SignalWeights};

/// One signal's label and confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vote<'a> {
    pub intent: &'a str,
    pub confidence: f64,
}

impl<'a> Vote<'a> {
    pub fn new(intent: &'a str, confidence: f64) -> Self {
        Self { intent, confidence }
    }
}

/// Outcome of [`fuse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fused {
    pub intent: String,
    pub confidence: Confidence,
    pub agreed: bool,
}

/// Combine the engine and AST votes.
///
/// Agreement averages the two confidences, capped at 0.95. On disagreement
/// the engine's label wins and the confidence is the weighted sum.
pub fn fuse(engine: Vote<'_>, ast: Vote<'_>, weights: SignalWeights) -> Fused {
    if engine.intent == ast.intent {
        let mean = (engine.confidence + ast.confidence) / 2.0;
        Fused {
            intent: engine.intent.to_string(),
            confidence: Confidence::new(mean).capped(),
            agreed: true,
        }
    } else {
        let weighted = engine.confidence * weights.clio + ast.confidence * weights.ast;
        Fused {
            intent: engine.intent.to_string(),
            confidence: Confidence::new(weighted),
            agreed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: SignalWeights = SignalWeights { clio: 0.6, ast: 0.4 };

    #[test]
    fn agreement_averages() {
        let f = fuse(Vote::new("debug", 0.6), Vote::new("debug", 0.8), W);
        assert!(f.agreed);
        assert_eq!(f.intent, "debug");
        assert!((f.confidence.value() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn agreement_is_capped() {
        let f = fuse(Vote::new("test", 1.0), Vote::new("test", 0.98), W);
        assert!((f.confidence.value() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn disagreement_prefers_engine_label() {
        let f = fuse(Vote::new("explore", 0.5), Vote::new("implement", 0.9), W);
        assert!(!f.agreed);
        assert_eq!(f.intent, "explore");
        assert!((f.confidence.value() - (0.5 * 0.6 + 0.9 * 0.4)).abs() < 1e-12);
    }
}
