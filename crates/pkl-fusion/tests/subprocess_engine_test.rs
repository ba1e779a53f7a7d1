//! SubprocessEngine against `sh -c` stub engines.
#![cfg(unix)]

use std::time::Duration;

use chrono::Utc;

use pkl_core::errors::EngineError;
use pkl_core::models::{CodeDelta, Conversation, EngineRequest, Message, Session};
use pkl_core::traits::AnalysisEngine;
use pkl_fusion::adapters::default_engine_facets;
use pkl_fusion::SubprocessEngine;

fn stub(script: &str) -> SubprocessEngine {
    SubprocessEngine::new("sh", vec!["-c".to_string(), script.to_string()])
        .with_timeout(Duration::from_secs(5))
}

fn request() -> EngineRequest {
    let now = Utc::now();
    let session = Session::new("engine-test", now);
    let conversation = Conversation::new(vec![Message::user("debug the parser", now)]);
    EngineRequest::from_records(&session, &conversation, default_engine_facets())
}

const SUCCESS: &str = r#"cat > /dev/null; echo '{"intent":"debug","task":"bug_fixing","confidence":0.8,"evidence":["stack trace"]}'"#;

#[tokio::test]
async fn test_success_round_trip() {
    let engine = stub(SUCCESS);
    assert!(engine.is_available().await);

    let verdict = engine.classify(&request()).await.expect("verdict");
    assert_eq!(verdict.intent, "debug");
    assert_eq!(verdict.task.as_deref(), Some("bug_fixing"));
    assert!((verdict.confidence - 0.8).abs() < 1e-12);
    assert_eq!(engine.consecutive_failures(), 0);
}

#[tokio::test]
async fn test_request_is_written_to_stdin() {
    // Echo back the session id read from stdin as the intent.
    let engine = stub(
        r#"id=$(cat | grep -o '"id":"[^"]*"' | head -n 1 | cut -d'"' -f4); printf '{"intent":"%s","confidence":0.5}' "$id""#,
    );
    let verdict = engine.invoke(&request()).await.unwrap();
    assert_eq!(verdict.intent, "engine-test");
}

#[tokio::test]
async fn test_large_request_with_chatty_engine() {
    // The engine echoes its whole input to stderr before answering, so both
    // pipes fill up while the request is still being written.
    let now = Utc::now();
    let mut session = Session::new("large-request", now);
    for i in 0..2000 {
        session.code_deltas.push(CodeDelta {
            before_content: None,
            after_content: format!("def handler_{i}(event):\n    return process(event, retries=3)\n"),
            timestamp: now,
        });
    }
    let conversation = Conversation::new(vec![Message::user("debug the handlers", now)]);
    let request = EngineRequest::from_records(&session, &conversation, default_engine_facets());

    let engine = stub(r#"cat >&2; echo '{"intent":"debug","confidence":0.8}'"#);
    let verdict = engine.invoke(&request).await.expect("verdict for large request");
    assert_eq!(verdict.intent, "debug");
    assert_eq!(engine.consecutive_failures(), 0);
}

#[tokio::test]
async fn test_error_field_is_no_result() {
    let engine = stub(r#"cat > /dev/null; echo '{"error":"model not loaded"}'"#);
    assert!(!engine.is_available().await);
    match engine.invoke(&request()).await {
        Err(EngineError::Reported(msg)) => assert_eq!(msg, "model not loaded"),
        other => panic!("expected Reported, got {other:?}"),
    }
    assert!(engine.classify(&request()).await.is_none());
}

#[tokio::test]
async fn test_non_zero_exit_is_no_result() {
    let engine = stub("cat > /dev/null; echo oops >&2; exit 3");
    match engine.invoke(&request()).await {
        Err(EngineError::NonZeroExit { code, stderr }) => {
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "oops");
        }
        other => panic!("expected NonZeroExit, got {other:?}"),
    }
    assert!(engine.classify(&request()).await.is_none());
}

#[tokio::test]
async fn test_malformed_output_is_no_result() {
    let engine = stub("cat > /dev/null; echo not-json");
    assert!(matches!(
        engine.invoke(&request()).await,
        Err(EngineError::MalformedOutput(_))
    ));
    assert!(!engine.is_available().await);
}

#[tokio::test]
async fn test_timeout_is_no_result() {
    let engine = stub("sleep 5").with_timeout(Duration::from_millis(300));
    assert!(matches!(
        engine.invoke(&request()).await,
        Err(EngineError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_missing_binary_is_unavailable() {
    let engine = SubprocessEngine::new("/nonexistent/pkl-engine", Vec::new());
    assert!(!engine.is_available().await);
    assert!(matches!(
        engine.invoke(&request()).await,
        Err(EngineError::SpawnFailed(_))
    ));
}

#[tokio::test]
async fn test_repeated_failures_trigger_reprobe() {
    let dir = tempfile::TempDir::new().unwrap();
    let flag = dir.path().join("healthy");
    std::fs::write(&flag, "").unwrap();

    let script = r#"cat > /dev/null; if [ -f "$1" ]; then echo '{"intent":"debug","confidence":0.5}'; else exit 1; fi"#;
    let engine = SubprocessEngine::new(
        "sh",
        vec![
            "-c".to_string(),
            script.to_string(),
            "sh".to_string(),
            flag.display().to_string(),
        ],
    )
    .with_reprobe_after(3);

    assert!(engine.is_available().await);
    std::fs::remove_file(&flag).unwrap();

    assert!(engine.classify(&request()).await.is_none());
    assert!(engine.classify(&request()).await.is_none());
    assert_eq!(engine.consecutive_failures(), 2);
    // probe result still cached
    assert!(engine.is_available().await);

    assert!(engine.classify(&request()).await.is_none());
    assert_eq!(engine.consecutive_failures(), 0);
    // cache cleared: the next check re-probes and sees the broken engine
    assert!(!engine.is_available().await);
}

#[tokio::test]
async fn test_success_resets_failure_count() {
    let dir = tempfile::TempDir::new().unwrap();
    let flag = dir.path().join("healthy");

    let script = r#"cat > /dev/null; if [ -f "$1" ]; then echo '{"intent":"test","confidence":0.5}'; else exit 1; fi"#;
    let engine = SubprocessEngine::new(
        "sh",
        vec![
            "-c".to_string(),
            script.to_string(),
            "sh".to_string(),
            flag.display().to_string(),
        ],
    );

    assert!(engine.classify(&request()).await.is_none());
    assert_eq!(engine.consecutive_failures(), 1);
    std::fs::write(&flag, "").unwrap();
    assert!(engine.classify(&request()).await.is_some());
    assert_eq!(engine.consecutive_failures(), 0);
}
