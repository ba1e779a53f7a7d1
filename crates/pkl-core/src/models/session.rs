use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mined coding session in canonical shape.
///
/// Raw records with alternative field spellings are normalized before they
/// reach the classifier (see `pkl_fusion::ingest`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub current_file: Option<String>,
    #[serde(default)]
    pub code_deltas: Vec<CodeDelta>,
    #[serde(default)]
    pub file_changes: Vec<FileChange>,
    /// Session duration in milliseconds, when the miner recorded one.
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

/// One edit captured by the miner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDelta {
    #[serde(default)]
    pub before_content: Option<String>,
    pub after_content: String,
    pub timestamp: DateTime<Utc>,
}

/// Kind of file-system change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Added,
    Modified,
}

/// A file added or modified during the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub file_path: String,
    pub timestamp: DateTime<Utc>,
}

impl Session {
    /// Create an empty session.
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            timestamp,
            current_file: None,
            code_deltas: Vec::new(),
            file_changes: Vec::new(),
            duration_ms: None,
        }
    }

    /// Concatenated after-content of every code delta, in order.
    pub fn code_content(&self) -> String {
        self.code_deltas
            .iter()
            .map(|d| d.after_content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Session duration in hours. A missing duration counts as zero.
    pub fn duration_hours(&self) -> f64 {
        self.duration_ms.unwrap_or(0) as f64 / 3_600_000.0
    }

    /// File name used when handing code to the local classifier.
    pub fn file_name(&self) -> &str {
        self.current_file.as_deref().unwrap_or("")
    }
}
