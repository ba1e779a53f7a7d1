//! Fusion proportions between the external engine ("clio") and the local classifier ("ast").

use serde::{Deserialize, Serialize};

use crate::constants::SUM_TOLERANCE;

/// Default engine share when both signals are available.
pub const DEFAULT_CLIO_PROPORTION: f64 = 0.6;
/// Default local-classifier share when both signals are available.
pub const DEFAULT_AST_PROPORTION: f64 = 0.4;

/// Fusion settings as written in config files. `None` means "default".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FusionConfig {
    pub clio: Option<f64>,
    pub ast: Option<f64>,
    /// Re-derive proportions from live availability. Default: true.
    pub auto_adjust: Option<bool>,
}

/// Normalized proportions in effect for a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionProportions {
    pub clio: f64,
    pub ast: f64,
    pub auto_adjust: bool,
}

impl Default for FusionProportions {
    fn default() -> Self {
        Self {
            clio: DEFAULT_CLIO_PROPORTION,
            ast: DEFAULT_AST_PROPORTION,
            auto_adjust: true,
        }
    }
}

impl FusionConfig {
    /// Resolve to proportions summing to 1.0.
    ///
    /// Returns the proportions and whether a correction was applied.
    pub fn effective_proportions(&self) -> (FusionProportions, bool) {
        let clean = |v: Option<f64>, default: f64| match v {
            Some(x) if x.is_finite() => x.max(0.0),
            Some(_) => default,
            None => default,
        };
        let mut clio = clean(self.clio, DEFAULT_CLIO_PROPORTION);
        let mut ast = clean(self.ast, DEFAULT_AST_PROPORTION);
        let mut adjusted =
            self.clio.is_some_and(|x| x != clio) || self.ast.is_some_and(|x| x != ast);

        let sum = clio + ast;
        if sum <= 0.0 {
            clio = DEFAULT_CLIO_PROPORTION;
            ast = DEFAULT_AST_PROPORTION;
            adjusted = true;
        } else if (sum - 1.0).abs() > SUM_TOLERANCE {
            clio /= sum;
            ast /= sum;
            adjusted = true;
        }

        (
            FusionProportions {
                clio,
                ast,
                auto_adjust: self.auto_adjust.unwrap_or(true),
            },
            adjusted,
        )
    }
}
