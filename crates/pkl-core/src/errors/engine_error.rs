/// Failures of one external analysis-engine invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to spawn engine process: {0}")]
    SpawnFailed(String),

    #[error("engine timed out after {0}s")]
    Timeout(u64),

    #[error("engine exited with code {code:?}: {stderr}")]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("malformed engine output: {0}")]
    MalformedOutput(String),

    #[error("engine reported an error: {0}")]
    Reported(String),

    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Short machine-readable tag for logs and degradation events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SpawnFailed(_) => "spawn_failed",
            Self::Timeout(_) => "timeout",
            Self::NonZeroExit { .. } => "non_zero_exit",
            Self::MalformedOutput(_) => "malformed_output",
            Self::Reported(_) => "reported_error",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_has_a_distinct_kind() {
        let errors = [
            EngineError::SpawnFailed("no such file".into()),
            EngineError::Timeout(30),
            EngineError::NonZeroExit { code: Some(2), stderr: String::new() },
            EngineError::MalformedOutput("eof".into()),
            EngineError::Reported("model not loaded".into()),
            EngineError::Io(std::io::Error::other("broken pipe")),
        ];
        let mut kinds: Vec<_> = errors.iter().map(EngineError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
        assert!(!kinds.contains(&"disabled"));
    }
}
