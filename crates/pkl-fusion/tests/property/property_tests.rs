//! Property tests: fused and boosted confidences stay in range.

use proptest::prelude::*;

use pkl_core::config::{ResolvedConfig, ToggleFacet};
use pkl_core::models::{Confidence, SignalWeights};
use pkl_fusion::fusion::apply_toggle_boost;
use pkl_fusion::{canonical_intent, fuse, Vote};

fn label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["debug", "implement", "explore", "test", "refactor"])
}

proptest! {
    #[test]
    fn fused_confidence_in_unit_range(
        engine in -1.0f64..2.0,
        ast in -1.0f64..2.0,
        clio_w in 0.0f64..=1.0,
        a in label(),
        b in label(),
    ) {
        let weights = SignalWeights { clio: clio_w, ast: 1.0 - clio_w };
        let fused = fuse(Vote::new(a, engine), Vote::new(b, ast), weights);
        prop_assert!((0.0..=1.0).contains(&fused.confidence.value()));
        prop_assert_eq!(fused.intent.as_str(), a);
        if a == b {
            prop_assert!(fused.confidence.value() <= 0.95);
        }
    }

    #[test]
    fn toggle_boost_never_exceeds_cap(start in 0.0f64..=0.95, intent in label()) {
        let config = ResolvedConfig::default();
        let (boosted, _) = apply_toggle_boost(
            Confidence::new(start),
            &[
                (ToggleFacet::Intent, intent),
                (ToggleFacet::Task, "data_analysis"),
                (ToggleFacet::Complexity, "high"),
                (ToggleFacet::Domain, "general"),
            ],
            &config,
        );
        prop_assert!(boosted.value() <= 0.95 + 1e-12);
        prop_assert!(boosted.value() >= start - 1e-12);
    }

    #[test]
    fn canonical_intent_is_always_known(raw in "\\PC{0,40}") {
        let label = canonical_intent(&raw);
        prop_assert!(pkl_analysis::intent::is_known_label(&label));
    }
}
