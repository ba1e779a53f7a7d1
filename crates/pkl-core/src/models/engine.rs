//! Wire shapes exchanged with the external analysis engine.

use serde::{Deserialize, Serialize};

use super::{Conversation, Session};

/// Session block of an engine request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSession {
    pub id: String,
    pub timestamp: String,
    pub file_path: Option<String>,
    pub code_deltas: Vec<serde_json::Value>,
    pub file_changes: Vec<serde_json::Value>,
}

/// Conversation turn of an engine request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineMessage {
    pub role: String,
    pub content: String,
    pub timestamp: String,
    pub code_blocks: Vec<String>,
}

/// Clio-style facet definition the engine is asked to answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineFacet {
    pub name: String,
    pub question: String,
    pub prefill: String,
    pub summary_criteria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<(u32, u32)>,
}

/// Single JSON object written to the engine's input channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRequest {
    pub session: EngineSession,
    pub conversations: Vec<EngineMessage>,
    pub facets: Vec<EngineFacet>,
}

impl EngineRequest {
    /// Build a request from canonical records.
    pub fn from_records(
        session: &Session,
        conversation: &Conversation,
        facets: Vec<EngineFacet>,
    ) -> Self {
        let code_deltas = session
            .code_deltas
            .iter()
            .filter_map(|d| serde_json::to_value(d).ok())
            .collect();
        let file_changes = session
            .file_changes
            .iter()
            .filter_map(|c| serde_json::to_value(c).ok())
            .collect();
        let conversations = conversation
            .messages
            .iter()
            .map(|m| EngineMessage {
                role: match m.role {
                    super::Role::User => "user".to_string(),
                    super::Role::Assistant => "assistant".to_string(),
                },
                content: m.content.clone(),
                timestamp: m.timestamp.to_rfc3339(),
                code_blocks: m.code_blocks.clone(),
            })
            .collect();

        Self {
            session: EngineSession {
                id: session.id.clone(),
                timestamp: session.timestamp.to_rfc3339(),
                file_path: session.current_file.clone(),
                code_deltas,
                file_changes,
            },
            conversations,
            facets,
        }
    }
}

/// Successful engine answer after parsing and clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineVerdict {
    pub intent: String,
    pub task: Option<String>,
    pub complexity: Option<String>,
    pub domain: Option<String>,
    pub confidence: f64,
    pub evidence: Vec<String>,
}
