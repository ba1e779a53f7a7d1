//! Weight-table repair: NaN protection, negative clamping, sum-to-one scaling.
//!
//! Invariants after `normalize_table`:
//! - every entry is finite and ≥ 0.0
//! - the entries sum to 1.0 (±1e-6) unless the table is empty

use std::collections::BTreeMap;

use tracing::warn;

use crate::constants::SUM_TOLERANCE;

/// Result of repairing one table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationOutcome {
    pub table: BTreeMap<String, f64>,
    /// Sum of the sanitized input before scaling.
    pub original_sum: f64,
    /// Whether any entry was changed.
    pub adjusted: bool,
}

/// Sanitize a single entry. NaN/Infinity → `default`, negative → 0.0.
pub fn sanitize_weight(weight: f64, default: f64) -> f64 {
    if !weight.is_finite() {
        return default;
    }
    weight.max(0.0)
}

/// Repair a label → weight table so that it sums to 1.0.
///
/// - Non-finite entries take the matching default (or 0.0).
/// - An all-zero table is replaced by `defaults`.
/// - A table whose sum is off by more than the tolerance is scaled
///   proportionally; the correction is logged.
pub fn normalize_table(
    name: &str,
    table: &BTreeMap<String, f64>,
    defaults: &BTreeMap<String, f64>,
) -> NormalizationOutcome {
    let mut adjusted = false;
    let mut result: BTreeMap<String, f64> = table
        .iter()
        .map(|(k, v)| {
            let clean = sanitize_weight(*v, defaults.get(k).copied().unwrap_or(0.0));
            if clean != *v {
                adjusted = true;
            }
            (k.clone(), clean)
        })
        .collect();

    if result.is_empty() {
        return NormalizationOutcome {
            table: result,
            original_sum: 0.0,
            adjusted,
        };
    }

    let mut sum: f64 = result.values().sum();
    if sum <= 0.0 {
        warn!(table = name, "all weights are zero, falling back to defaults");
        result = defaults.clone();
        sum = result.values().sum();
        adjusted = true;
        if sum <= 0.0 {
            return NormalizationOutcome {
                table: result,
                original_sum: 0.0,
                adjusted,
            };
        }
    }

    if (sum - 1.0).abs() > SUM_TOLERANCE {
        warn!(
            table = name,
            sum,
            entries = result.len(),
            "weights do not sum to 1.0, renormalizing"
        );
        for w in result.values_mut() {
            *w /= sum;
        }
        adjusted = true;
    }

    NormalizationOutcome {
        table: result,
        original_sum: sum,
        adjusted,
    }
}
