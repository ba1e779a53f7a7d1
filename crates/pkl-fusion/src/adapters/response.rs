//! Parsing of the engine's single-object answer.

use serde::Deserialize;
use serde_json::Value;

use pkl_core::errors::EngineError;
use pkl_core::models::EngineVerdict;

/// Either answer shape. `Failure` is tried first so an object carrying an
/// `error` field is never mistaken for a success with defaulted fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EngineResponse {
    Failure { error: String },
    Success(SuccessBody),
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    intent: String,
    #[serde(default)]
    task: Option<String>,
    #[serde(default)]
    complexity: Option<String>,
    #[serde(default)]
    domain: Option<String>,
    confidence: f64,
    #[serde(default)]
    evidence: Value,
}

/// Parse stdout into a verdict.
///
/// Confidence is clamped to [0, 1]; evidence may be a list, an object, a
/// string, or absent and is flattened to strings.
pub fn parse_engine_output(stdout: &str) -> Result<EngineVerdict, EngineError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MalformedOutput("empty output".into()));
    }
    let response: EngineResponse = serde_json::from_str(trimmed)
        .map_err(|e| EngineError::MalformedOutput(e.to_string()))?;

    match response {
        EngineResponse::Failure { error } => Err(EngineError::Reported(error)),
        EngineResponse::Success(body) => {
            if body.intent.trim().is_empty() {
                return Err(EngineError::MalformedOutput("empty intent".into()));
            }
            let confidence = if body.confidence.is_finite() {
                body.confidence.clamp(0.0, 1.0)
            } else {
                0.0
            };
            Ok(EngineVerdict {
                intent: body.intent,
                task: body.task,
                complexity: body.complexity,
                domain: body.domain,
                confidence,
                evidence: flatten_evidence(&body.evidence),
            })
        }
    }
}

fn flatten_evidence(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect(),
        other => vec![other.to_string()],
    }
}
