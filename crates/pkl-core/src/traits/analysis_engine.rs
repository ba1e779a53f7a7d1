use std::future::Future;

use crate::models::{EngineRequest, EngineVerdict};

/// Out-of-process analysis capability.
///
/// The transport (process spawn, RPC, HTTP) is an implementation choice.
/// Implementations never fail loudly: every failure is `None`.
pub trait AnalysisEngine: Send + Sync {
    /// Classify one session. `None` means "no result for this call".
    fn classify(&self, request: &EngineRequest)
        -> impl Future<Output = Option<EngineVerdict>> + Send;

    /// Whether the engine is reachable. May probe lazily and cache.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Human-readable engine name.
    fn name(&self) -> &str;
}

/// Engine stand-in for deployments without an external engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableEngine;

impl AnalysisEngine for UnavailableEngine {
    async fn classify(&self, _request: &EngineRequest) -> Option<EngineVerdict> {
        None
    }

    async fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// An optional engine: `None` behaves like [`UnavailableEngine`].
impl<E: AnalysisEngine> AnalysisEngine for Option<E> {
    async fn classify(&self, request: &EngineRequest) -> Option<EngineVerdict> {
        match self {
            Some(engine) => engine.classify(request).await,
            None => None,
        }
    }

    async fn is_available(&self) -> bool {
        match self {
            Some(engine) => engine.is_available().await,
            None => false,
        }
    }

    fn name(&self) -> &str {
        match self {
            Some(engine) => engine.name(),
            None => "unavailable",
        }
    }
}
