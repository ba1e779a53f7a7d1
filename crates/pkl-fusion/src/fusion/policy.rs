//! Availability → proportion state machine.

use std::fmt;

use pkl_core::config::FusionProportions;
use pkl_core::models::SignalWeights;

/// Which signals produced a verdict for the current call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Both,
    EngineOnly,
    AstOnly,
    Neither,
}

impl Availability {
    pub fn from_flags(engine: bool, ast: bool) -> Self {
        match (engine, ast) {
            (true, true) => Self::Both,
            (true, false) => Self::EngineOnly,
            (false, true) => Self::AstOnly,
            (false, false) => Self::Neither,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::EngineOnly => "engine_only",
            Self::AstOnly => "ast_only",
            Self::Neither => "neither",
        }
    }

    /// Proportions the tier runs under.
    ///
    /// `configured` is expected to be normalized already. The fallback tier
    /// weighs neither signal.
    pub fn weights(self, configured: &FusionProportions) -> SignalWeights {
        match self {
            Self::Both => SignalWeights {
                clio: configured.clio,
                ast: configured.ast,
            },
            Self::EngineOnly => SignalWeights { clio: 1.0, ast: 0.0 },
            Self::AstOnly => SignalWeights { clio: 0.0, ast: 1.0 },
            Self::Neither => SignalWeights { clio: 0.0, ast: 0.0 },
        }
    }

    /// Proportions reported on the result.
    ///
    /// With `auto_adjust` off a single-signal tier still reports the stored
    /// proportions; the verdict itself comes from the one signal either way.
    pub fn reported_weights(self, configured: &FusionProportions) -> SignalWeights {
        match self {
            Self::EngineOnly | Self::AstOnly if !configured.auto_adjust => {
                Self::Both.weights(configured)
            }
            _ => self.weights(configured),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
