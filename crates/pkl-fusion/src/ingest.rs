//! Ingestion boundary: miner records with mixed field spellings are
//! normalized into the canonical `Session` / `Conversation` shape.
//!
//! Nothing past this module sees a raw record.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use pkl_core::errors::PklResult;
use pkl_core::models::{ChangeType, CodeDelta, Conversation, FileChange, Message, Role, Session};

/// Max code deltas quoted in a synthetic user message.
const SYNTHETIC_DELTA_LIMIT: usize = 3;
/// Max characters quoted per code delta.
const SYNTHETIC_EXCERPT_CHARS: usize = 200;
/// Max file changes listed in a synthetic assistant message.
const SYNTHETIC_FILE_LIMIT: usize = 3;

/// Session record as written by the miner.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSession {
    pub id: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(alias = "endTime")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(alias = "currentFile", alias = "filePath", alias = "file_path")]
    pub current_file: Option<String>,
    #[serde(alias = "workspacePath")]
    pub workspace_path: Option<String>,
    #[serde(alias = "durationMs", alias = "duration")]
    pub duration_ms: Option<u64>,
    pub intent: Option<String>,
    pub outcome: Option<String>,
    pub phase: Option<String>,
    #[serde(alias = "codeDeltas")]
    pub code_deltas: Vec<RawCodeDelta>,
    #[serde(alias = "fileChanges")]
    pub file_changes: Vec<RawFileChange>,
    #[serde(alias = "conversationEvents", alias = "messages")]
    pub conversation_events: Vec<RawMessage>,
    #[serde(alias = "linkedEvents")]
    pub linked_events: Vec<RawLinkedEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCodeDelta {
    #[serde(alias = "beforeContent")]
    pub before_content: Option<String>,
    #[serde(alias = "afterContent")]
    pub after_content: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFileChange {
    #[serde(rename = "type", alias = "changeType", alias = "change_type")]
    pub change_type: Option<String>,
    #[serde(alias = "filePath", alias = "path")]
    pub file_path: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMessage {
    pub role: Option<String>,
    pub content: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(alias = "codeBlocks")]
    pub code_blocks: Vec<String>,
}

/// Execution event linked to a session (code run, success, error).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLinkedEvent {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub output: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Parse one raw session record from JSON and normalize it.
pub fn parse_session(json: &str) -> PklResult<(Session, Conversation)> {
    let raw: RawSession = serde_json::from_str(json)?;
    Ok(normalize(raw))
}

/// Parse a JSON array of raw session records.
pub fn parse_sessions(json: &str) -> PklResult<Vec<(Session, Conversation)>> {
    let raws: Vec<RawSession> = serde_json::from_str(json)?;
    Ok(raws.into_iter().map(normalize).collect())
}

/// Convert a raw record into canonical records.
pub fn normalize(raw: RawSession) -> (Session, Conversation) {
    let timestamp = raw.timestamp.unwrap_or_else(Utc::now);
    let id = raw
        .id
        .clone()
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    let code_deltas: Vec<CodeDelta> = raw
        .code_deltas
        .iter()
        .map(|d| CodeDelta {
            before_content: d.before_content.clone(),
            after_content: d.after_content.clone().unwrap_or_default(),
            timestamp: d.timestamp.unwrap_or(timestamp),
        })
        .collect();

    let file_changes: Vec<FileChange> = raw
        .file_changes
        .iter()
        .filter_map(|c| {
            let change_type = match c.change_type.as_deref().map(str::to_ascii_lowercase) {
                Some(t) if t == "added" || t == "add" || t == "created" => ChangeType::Added,
                Some(t) if t == "modified" || t == "modify" || t == "changed" => {
                    ChangeType::Modified
                }
                other => {
                    debug!(session_id = %id, change_type = ?other, "dropping unknown file change type");
                    return None;
                }
            };
            Some(FileChange {
                change_type,
                file_path: c.file_path.clone().unwrap_or_default(),
                timestamp: c.timestamp.unwrap_or(timestamp),
            })
        })
        .collect();

    let duration_ms = raw.duration_ms.or_else(|| {
        raw.end_time
            .map(|end| (end - timestamp).num_milliseconds())
            .filter(|ms| *ms >= 0)
            .map(|ms| ms as u64)
    });

    let session = Session {
        id,
        timestamp,
        current_file: raw.current_file.clone(),
        code_deltas,
        file_changes,
        duration_ms,
    };

    let mut messages: Vec<Message> = raw
        .conversation_events
        .iter()
        .filter_map(|m| {
            let role = match m.role.as_deref() {
                Some("assistant") => Role::Assistant,
                Some("user") | None => Role::User,
                Some(other) => {
                    debug!(role = other, "dropping message with unsupported role");
                    return None;
                }
            };
            Some(Message {
                role,
                content: m.content.clone().unwrap_or_default(),
                timestamp: m.timestamp.unwrap_or(timestamp),
                code_blocks: m.code_blocks.clone(),
            })
        })
        .collect();

    if messages.is_empty() {
        messages = raw
            .linked_events
            .iter()
            .filter_map(|e| {
                let role = match e.event_type.as_deref()? {
                    "code_run" => Role::User,
                    "success" | "error" => Role::Assistant,
                    _ => return None,
                };
                Some(Message {
                    role,
                    content: e.output.clone().unwrap_or_default(),
                    timestamp: e.timestamp.unwrap_or(timestamp),
                    code_blocks: Vec::new(),
                })
            })
            .collect();
    }

    let conversation = if messages.is_empty() {
        synthetic_conversation(&raw, &session)
    } else {
        Conversation::new(messages)
    };

    (session, conversation)
}

/// Two-message conversation reconstructed from session metadata.
pub fn synthetic_conversation(raw: &RawSession, session: &Session) -> Conversation {
    let intent = raw.intent.as_deref().unwrap_or("unknown");
    let location = raw
        .current_file
        .as_deref()
        .or(raw.workspace_path.as_deref())
        .unwrap_or("unknown file");

    let mut user = format!("Working on {intent} task in {location}");
    let changes: Vec<String> = session
        .code_deltas
        .iter()
        .take(SYNTHETIC_DELTA_LIMIT)
        .filter(|d| !d.after_content.is_empty())
        .map(|d| {
            let excerpt: String = d.after_content.chars().take(SYNTHETIC_EXCERPT_CHARS).collect();
            format!("Added/modified: {excerpt}...")
        })
        .collect();
    if !changes.is_empty() {
        user.push_str("\n\nCode changes:\n");
        user.push_str(&changes.join("\n"));
    }

    let phase = raw.phase.as_deref().unwrap_or("start");
    let mut assistant = match raw.outcome.as_deref().unwrap_or("in-progress") {
        "success" => format!(
            "Successfully completed the {intent} task. The solution worked as expected."
        ),
        "stuck" => format!(
            "Encountered difficulties with the {intent} task. May need alternative approach."
        ),
        _ => format!("Working on the {intent} task, currently in {phase} phase."),
    };
    let files: Vec<String> = session
        .file_changes
        .iter()
        .take(SYNTHETIC_FILE_LIMIT)
        .map(|c| format!("Modified {}", c.file_path))
        .collect();
    if !files.is_empty() {
        assistant.push_str("\n\nFiles affected: ");
        assistant.push_str(&files.join(", "));
    }

    let end = raw.end_time.unwrap_or(session.timestamp);
    Conversation::new(vec![
        Message::user(user, session.timestamp),
        Message::assistant(assistant, end),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_and_snake_spellings_agree() {
        let camel = r#"{"id":"a","timestamp":"2024-01-01T00:00:00Z","currentFile":"x.py",
            "codeDeltas":[{"afterContent":"print(1)","timestamp":"2024-01-01T00:01:00Z"}]}"#;
        let snake = r#"{"id":"a","timestamp":"2024-01-01T00:00:00Z","current_file":"x.py",
            "code_deltas":[{"after_content":"print(1)","timestamp":"2024-01-01T00:01:00Z"}]}"#;
        let (a, _) = parse_session(camel).unwrap();
        let (b, _) = parse_session(snake).unwrap();
        assert_eq!(a.current_file, b.current_file);
        assert_eq!(a.code_deltas[0].after_content, b.code_deltas[0].after_content);
        assert_eq!(a.code_deltas[0].before_content, None);
    }

    #[test]
    fn missing_id_gets_generated() {
        let (s, _) = parse_session(r#"{"timestamp":"2024-01-01T00:00:00Z"}"#).unwrap();
        assert!(s.id.starts_with("session-"));
    }

    #[test]
    fn duration_derived_from_end_time() {
        let (s, _) = parse_session(
            r#"{"id":"d","timestamp":"2024-01-01T00:00:00Z","endTime":"2024-01-01T02:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(s.duration_ms, Some(7_200_000));
    }

    #[test]
    fn linked_events_become_messages() {
        let (_, c) = parse_session(
            r#"{"id":"l","timestamp":"2024-01-01T00:00:00Z","linkedEvents":[
                {"type":"code_run","output":"python train.py"},
                {"type":"error","output":"ValueError"},
                {"type":"file_open","output":"ignored"}]}"#,
        )
        .unwrap();
        assert_eq!(c.messages.len(), 2);
        assert_eq!(c.messages[0].role, Role::User);
        assert_eq!(c.messages[1].content, "ValueError");
    }

    #[test]
    fn synthetic_conversation_mentions_outcome() {
        let (_, c) = parse_session(
            r#"{"id":"s","timestamp":"2024-01-01T00:00:00Z","intent":"debug",
                "outcome":"success","currentFile":"a.rs"}"#,
        )
        .unwrap();
        assert_eq!(c.messages.len(), 2);
        assert_eq!(c.messages[0].content, "Working on debug task in a.rs");
        assert_eq!(
            c.messages[1].content,
            "Successfully completed the debug task. The solution worked as expected."
        );
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = parse_session("{not json").unwrap_err();
        assert!(matches!(err, pkl_core::PklError::Serialization(_)));
    }
}
