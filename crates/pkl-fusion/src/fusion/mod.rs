//! Fusion policy: tier selection, combination, and toggle adjustment.

pub mod combine;
pub mod policy;
pub mod toggle;

pub use combine::{fuse, Fused, Vote};
pub use policy::Availability;
pub use toggle::{apply_toggle_boost, ToggleBoost};
