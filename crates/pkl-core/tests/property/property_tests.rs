//! Property tests for weight-table repair.

use std::collections::BTreeMap;

use proptest::prelude::*;

use pkl_core::config::normalize_table;

fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0f64..5.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

proptest! {
    #[test]
    fn normalized_tables_sum_to_one(weights in prop::collection::vec(arb_weight(), 1..8)) {
        let table: BTreeMap<String, f64> = weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("label_{i}"), *w))
            .collect();
        let defaults: BTreeMap<String, f64> = table
            .keys()
            .map(|k| (k.clone(), 1.0 / table.len() as f64))
            .collect();

        let out = normalize_table("prop", &table, &defaults);
        let sum: f64 = out.table.values().sum();
        prop_assert!((sum - 1.0).abs() < 1e-6, "sum was {}", sum);
        for w in out.table.values() {
            prop_assert!(w.is_finite() && *w >= 0.0);
        }
    }
}
