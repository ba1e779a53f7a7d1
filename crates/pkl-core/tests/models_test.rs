//! Tests for the canonical record types.

use chrono::{TimeZone, Utc};

use pkl_core::models::{
    ActionVerb, ChangeType, Conversation, EngineRequest, GoalLevel, Message, Role,
    SequencePattern, Session,
};
use pkl_core::Confidence;

fn ts(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

#[test]
fn test_session_deserializes_camel_case() {
    let json = r#"{
        "id": "s-1",
        "timestamp": "2024-03-01T10:00:00Z",
        "currentFile": "analysis.py",
        "codeDeltas": [
            {"beforeContent": null, "afterContent": "import pandas as pd", "timestamp": "2024-03-01T10:01:00Z"}
        ],
        "fileChanges": [
            {"type": "added", "filePath": "analysis.py", "timestamp": "2024-03-01T10:00:30Z"}
        ],
        "durationMs": 1800000
    }"#;
    let session: Session = serde_json::from_str(json).unwrap();
    assert_eq!(session.file_name(), "analysis.py");
    assert_eq!(session.code_deltas.len(), 1);
    assert_eq!(session.file_changes[0].change_type, ChangeType::Added);
    assert!((session.duration_hours() - 0.5).abs() < 1e-12);
}

#[test]
fn test_missing_duration_counts_as_zero() {
    let session = Session::new("s-2", ts(0));
    assert_eq!(session.duration_hours(), 0.0);
    assert_eq!(session.file_name(), "");
    assert_eq!(session.code_content(), "");
}

#[test]
fn test_conversation_prompts_are_user_messages() {
    let conv = Conversation::new(vec![
        Message::user("create a parser", ts(0)),
        Message::assistant("here is one", ts(1)),
        Message::user("now test it", ts(2)),
    ]);
    let prompts: Vec<_> = conv.prompts().map(|m| m.content.as_str()).collect();
    assert_eq!(prompts, vec!["create a parser", "now test it"]);
    assert!(conv.messages.iter().any(|m| m.role == Role::Assistant));
    assert_eq!(conv.text(), "create a parser\nhere is one\nnow test it");
}

#[test]
fn test_confidence_clamps_and_caps() {
    assert_eq!(Confidence::new(1.7).value(), 1.0);
    assert_eq!(Confidence::new(-0.2).value(), 0.0);
    assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    assert!((Confidence::new(0.9).boosted(0.2).value() - 0.95).abs() < 1e-12);
    assert!((Confidence::new(0.5).boosted(0.06).value() - 0.56).abs() < 1e-12);
}

#[test]
fn test_engine_request_shape() {
    let mut session = Session::new("s-3", ts(0));
    session.current_file = Some("app.js".to_string());
    let conv = Conversation::new(vec![Message::user("fix the login bug", ts(5))]);

    let request = EngineRequest::from_records(&session, &conv, Vec::new());
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["session"]["id"], "s-3");
    assert_eq!(value["session"]["filePath"], "app.js");
    assert_eq!(value["conversations"][0]["role"], "user");
    assert_eq!(value["conversations"][0]["content"], "fix the login bug");
}

#[test]
fn test_vocabulary_indices_are_stable() {
    assert_eq!(ActionVerb::Create.index(), 0);
    assert_eq!(ActionVerb::ALL.len(), 8);
    assert_eq!(SequencePattern::CreateThenTest.as_str(), "create_then_test");
    assert_eq!(GoalLevel::ALL.len(), 4);
}
