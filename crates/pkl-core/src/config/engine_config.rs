//! External analysis engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENGINE_TIMEOUT_SECS, DEFAULT_REPROBE_AFTER_FAILURES};

/// How to reach the external conversation-analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Master switch. Default: true (still requires `command`).
    pub enabled: Option<bool>,
    /// Executable that speaks the JSON stdin/stdout protocol.
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /// Per-request timeout. Default: 20.
    pub timeout_secs: Option<u64>,
    /// Consecutive failures before the availability probe is re-run. Default: 3.
    pub reprobe_after_failures: Option<u32>,
}

impl EngineConfig {
    /// True when the engine is switched on and has a command to run.
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true) && self.command.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_ENGINE_TIMEOUT_SECS)
    }

    pub fn effective_reprobe_after_failures(&self) -> u32 {
        self.reprobe_after_failures
            .unwrap_or(DEFAULT_REPROBE_AFTER_FAILURES)
    }
}
