use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence score clamped to [0.0, 1.0].
///
/// Non-finite input collapses to 0.0 so a NaN from an upstream division
/// can never leak into a result.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Confidence reported by the fixed fallback result.
    pub const FALLBACK: f64 = crate::constants::FALLBACK_CONFIDENCE;
    /// Ceiling for fused and boosted confidences.
    pub const CAP: f64 = crate::constants::CONFIDENCE_CAP;

    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Add `delta`; the result never exceeds [`Confidence::CAP`].
    pub fn boosted(self, delta: f64) -> Self {
        Self::new((self.0 + delta).min(Self::CAP))
    }

    /// Clamp to [`Confidence::CAP`].
    pub fn capped(self) -> Self {
        Self(self.0.min(Self::CAP))
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}
