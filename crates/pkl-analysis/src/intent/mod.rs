//! Reduce facet scores to a single intent profile.

pub mod labels;
pub mod profile;

pub use labels::{intent_label, is_known_label, INTENT_LABELS};
pub use profile::aggregate_profile;
