//! Toggle-percentage confidence adjustment.

use pkl_core::config::{ResolvedConfig, ToggleFacet};
use pkl_core::constants::TOGGLE_BOOST_FACTOR;
use pkl_core::models::Confidence;

/// Applied boost for one facet.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleBoost {
    pub facet: ToggleFacet,
    pub label: String,
    pub expected_proportion: f64,
    pub delta: f64,
}

/// Nudge `confidence` by `p × 0.3` for every predicted label that has an
/// expected proportion `p`. Boosts accumulate facet by facet and each step
/// is capped at 0.95.
pub fn apply_toggle_boost(
    confidence: Confidence,
    labels: &[(ToggleFacet, &str)],
    config: &ResolvedConfig,
) -> (Confidence, Vec<ToggleBoost>) {
    let mut current = confidence;
    let mut applied = Vec::new();
    for (facet, label) in labels {
        let Some(p) = config.toggle(*facet, label) else {
            continue;
        };
        let delta = p * TOGGLE_BOOST_FACTOR;
        current = current.boosted(delta);
        applied.push(ToggleBoost {
            facet: *facet,
            label: (*label).to_string(),
            expected_proportion: p,
            delta,
        });
    }
    (current, applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_boost_uses_expected_proportion() {
        let config = ResolvedConfig::default();
        let p = config.toggle(ToggleFacet::Intent, "debug").unwrap();
        let (c, applied) =
            apply_toggle_boost(Confidence::new(0.5), &[(ToggleFacet::Intent, "debug")], &config);
        assert_eq!(applied.len(), 1);
        assert!((c.value() - (0.5 + p * 0.3)).abs() < 1e-12);
    }

    #[test]
    fn unknown_label_is_not_boosted() {
        let config = ResolvedConfig::default();
        let (c, applied) = apply_toggle_boost(
            Confidence::new(0.5),
            &[(ToggleFacet::Domain, "astrophysics")],
            &config,
        );
        assert!(applied.is_empty());
        assert_eq!(c.value(), 0.5);
    }

    #[test]
    fn boosts_accumulate_and_cap() {
        let config = ResolvedConfig::default();
        let (c, applied) = apply_toggle_boost(
            Confidence::new(0.8),
            &[
                (ToggleFacet::Intent, "implement"),
                (ToggleFacet::Task, "feature_development"),
                (ToggleFacet::Complexity, "medium"),
            ],
            &config,
        );
        assert_eq!(applied.len(), 3);
        assert!((c.value() - 0.95).abs() < 1e-12);
    }
}
