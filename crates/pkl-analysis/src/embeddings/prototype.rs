//! Label prototypes: a (facet, dimension) pair turned into a comparable vector.

use pkl_core::hash::string_hash;

/// Deterministic prototype for a facet dimension.
///
/// `v[i] = sin(((hash + i*31) mod 1000) * 0.01) * 0.5`, where `hash` is the
/// 32-bit string hash of `facet + dimension`. Not unit length.
pub fn dimension_prototype(facet: &str, dimension: &str, dims: usize) -> Vec<f32> {
    let hash = string_hash(&format!("{facet}{dimension}")) as i64;
    (0..dims)
        .map(|i| {
            // truncated remainder keeps the sign of the hash
            let phase = (hash + i as i64 * 31) % 1000;
            ((phase as f64 * 0.01).sin() * 0.5) as f32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prototype_is_deterministic() {
        let a = dimension_prototype("primary_intent", "debug", 512);
        let b = dimension_prototype("primary_intent", "debug", 512);
        assert_eq!(a, b);
        assert_eq!(a.len(), 512);
    }

    #[test]
    fn prototypes_differ_per_dimension() {
        let a = dimension_prototype("primary_intent", "debug", 64);
        let b = dimension_prototype("primary_intent", "explore", 64);
        assert_ne!(a, b);
    }

    #[test]
    fn magnitude_is_bounded() {
        let p = dimension_prototype("workflow_pattern", "iterative", 512);
        assert!(p.iter().all(|x| x.abs() <= 0.5));
    }
}
