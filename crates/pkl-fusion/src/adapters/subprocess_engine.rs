//! External analysis engine reached through a child process.
//!
//! One process per call: the request is written to stdin as a single JSON
//! object, stdin is closed, and stdout is parsed once the process exits.
//! Every call is bounded by a timeout and the child is killed on drop.

use std::process::Stdio;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use pkl_core::config::ResolvedConfig;
use pkl_core::constants::{DEFAULT_ENGINE_TIMEOUT_SECS, DEFAULT_REPROBE_AFTER_FAILURES};
use pkl_core::errors::EngineError;
use pkl_core::models::{EngineRequest, EngineVerdict};
use pkl_core::traits::AnalysisEngine;

use super::response::parse_engine_output;

/// Payload of the availability round trip.
const PROBE_PAYLOAD: &[u8] = br#"{"probe":true}"#;

/// Longest stderr excerpt carried in an error.
const STDERR_EXCERPT: usize = 512;

pub struct SubprocessEngine {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    reprobe_after: u32,
    /// Cached probe outcome; `None` until the first probe.
    probe: Mutex<Option<bool>>,
    consecutive_failures: AtomicU32,
}

impl SubprocessEngine {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout: Duration::from_secs(DEFAULT_ENGINE_TIMEOUT_SECS),
            reprobe_after: DEFAULT_REPROBE_AFTER_FAILURES,
            probe: Mutex::new(None),
            consecutive_failures: AtomicU32::new(0),
        }
    }

    /// Build from resolved config. `None` when the engine is disabled or
    /// no command is configured.
    pub fn from_config(config: &ResolvedConfig) -> Option<Self> {
        if !config.engine_enabled {
            return None;
        }
        let command = config.engine_command.as_deref()?.trim();
        if command.is_empty() {
            return None;
        }
        Some(
            Self::new(command, config.engine_args.clone())
                .with_timeout(Duration::from_secs(config.engine_timeout_secs))
                .with_reprobe_after(config.reprobe_after_failures),
        )
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_reprobe_after(mut self, failures: u32) -> Self {
        self.reprobe_after = failures.max(1);
        self
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    /// Run one classification round trip, surfacing the failure cause.
    pub async fn invoke(&self, request: &EngineRequest) -> Result<EngineVerdict, EngineError> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| EngineError::MalformedOutput(format!("request encoding: {e}")))?;
        let stdout = self.run(&payload).await?;
        parse_engine_output(&stdout)
    }

    /// Spawn, feed `payload`, and collect stdout within the timeout.
    async fn run(&self, payload: &[u8]) -> Result<String, EngineError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| EngineError::SpawnFailed(format!("{}: {e}", self.command)))?;

        // Feed stdin while draining stdout and stderr; an engine that writes
        // before it finishes reading would otherwise block on a full pipe.
        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                // A child that exits without reading closes the pipe; its
                // exit status decides the outcome, not the write error.
                if let Err(e) = stdin.write_all(payload).await {
                    debug!(error = %e, "engine closed stdin early");
                }
            }
        };
        let round_trip = async {
            let ((), output) = tokio::join!(write, child.wait_with_output());
            output
        };

        let output = match timeout(self.timeout, round_trip).await {
            Ok(result) => result?,
            Err(_) => return Err(EngineError::Timeout(self.timeout.as_secs())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr: String = stderr.trim().chars().take(STDERR_EXCERPT).collect();
            return Err(EngineError::NonZeroExit {
                code: output.status.code(),
                stderr,
            });
        }

        String::from_utf8(output.stdout)
            .map_err(|e| EngineError::MalformedOutput(format!("stdout is not utf-8: {e}")))
    }

    /// Lightweight round trip: exit 0 with a JSON object that is not an
    /// error report.
    async fn probe_once(&self) -> bool {
        match self.run(PROBE_PAYLOAD).await {
            Ok(stdout) => match serde_json::from_str::<serde_json::Value>(stdout.trim()) {
                Ok(serde_json::Value::Object(map)) => !map.contains_key("error"),
                _ => false,
            },
            Err(e) => {
                debug!(engine = %self.command, error = %e, "engine probe failed");
                false
            }
        }
    }

    fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
    }

    async fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.reprobe_after {
            info!(
                engine = %self.command,
                failures,
                "engine failed repeatedly, availability will be re-probed"
            );
            *self.probe.lock().await = None;
            self.consecutive_failures.store(0, Ordering::Relaxed);
        }
    }
}

impl AnalysisEngine for SubprocessEngine {
    async fn classify(&self, request: &EngineRequest) -> Option<EngineVerdict> {
        let started = Instant::now();
        match self.invoke(request).await {
            Ok(verdict) => {
                debug!(
                    engine = %self.command,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    intent = %verdict.intent,
                    "engine call succeeded"
                );
                self.record_success();
                Some(verdict)
            }
            Err(e) => {
                let exit_code = match &e {
                    EngineError::NonZeroExit { code, .. } => *code,
                    _ => None,
                };
                warn!(
                    engine = %self.command,
                    session_id = %request.session.id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    exit_code = ?exit_code,
                    kind = e.kind(),
                    error = %e,
                    "engine call failed, no result for this call"
                );
                self.record_failure().await;
                None
            }
        }
    }

    async fn is_available(&self) -> bool {
        let mut cached = self.probe.lock().await;
        if let Some(available) = *cached {
            return available;
        }
        let available = self.probe_once().await;
        info!(engine = %self.command, available, "probed analysis engine");
        *cached = Some(available);
        available
    }

    fn name(&self) -> &str {
        &self.command
    }
}
