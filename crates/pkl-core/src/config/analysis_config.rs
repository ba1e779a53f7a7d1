//! Local analysis configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EMBEDDING_CACHE_SIZE, DEFAULT_SEQUENCE_GAP_SECS};

/// Configuration for the embedding/facet/procedural pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Max cached embeddings. Default: 2048.
    pub embedding_cache_size: Option<u64>,
    /// Gap that splits action sequences, in seconds. Default: 300.
    pub sequence_gap_secs: Option<i64>,
}

impl AnalysisConfig {
    /// Returns the effective embedding cache size, defaulting to 2048.
    pub fn effective_embedding_cache_size(&self) -> u64 {
        self.embedding_cache_size
            .unwrap_or(DEFAULT_EMBEDDING_CACHE_SIZE)
    }

    /// Returns the effective sequence gap, defaulting to 300 seconds.
    pub fn effective_sequence_gap_secs(&self) -> i64 {
        self.sequence_gap_secs.unwrap_or(DEFAULT_SEQUENCE_GAP_SECS)
    }
}
