//! HybridClassifier: runs local analysis, gathers both signals, and fuses
//! them under the availability policy.
//!
//! `classify` never fails. Every unavailable or failing signal degrades
//! the call to the next tier and is recorded as a `DegradationEvent`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use pkl_analysis::intent::{intent_label, is_known_label};
use pkl_core::config::{PklConfig, ToggleFacet};
use pkl_core::constants::DEFAULT_INTENT_LABEL;
use pkl_core::errors::ConfigError;
use pkl_core::models::{
    ClassificationResult, Confidence, Conversation, DegradationEvent, EngineFacet, EngineLabels,
    EngineRequest, EngineVerdict, Evidence, Provenance, Session, SignalSource, SignalWeights,
};
use pkl_core::traits::{AnalysisEngine, AstClassifier, AstSignal};

use crate::adapters::{default_engine_facets, PatternAstClassifier, SubprocessEngine};
use crate::config_store::{ConfigSnapshot, ConfigStore};
use crate::fusion::{apply_toggle_boost, fuse, Availability, Vote};

/// Classifier wired from configuration: pattern classifier plus the
/// subprocess engine when one is configured.
pub type ConfiguredClassifier = HybridClassifier<PatternAstClassifier, Option<SubprocessEngine>>;

pub struct HybridClassifier<A, E> {
    ast: A,
    engine: E,
    config: Arc<ConfigStore>,
    facets: Vec<EngineFacet>,
}

impl ConfiguredClassifier {
    /// Build both adapters from `config`. Engine settings are read once here;
    /// later config replacements affect tables and proportions only.
    pub fn from_config(config: PklConfig) -> Result<Self, ConfigError> {
        let store = Arc::new(ConfigStore::new(config)?);
        let resolved = store.snapshot().resolved.clone();
        let engine = SubprocessEngine::from_config(&resolved);
        if engine.is_none() {
            info!("no analysis engine configured, running on the local classifier only");
        }
        Ok(Self::new(PatternAstClassifier::default(), engine, store))
    }
}

impl<A, E> HybridClassifier<A, E>
where
    A: AstClassifier,
    E: AnalysisEngine,
{
    pub fn new(ast: A, engine: E, config: Arc<ConfigStore>) -> Self {
        Self {
            ast,
            engine,
            config,
            facets: default_engine_facets(),
        }
    }

    /// Replace the facet definitions sent to the engine.
    pub fn with_engine_facets(mut self, facets: Vec<EngineFacet>) -> Self {
        self.facets = facets;
        self
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    pub fn ast(&self) -> &A {
        &self.ast
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Classify one session against the current config snapshot.
    pub async fn classify(
        &self,
        session: &Session,
        conversation: &Conversation,
    ) -> ClassificationResult {
        let snapshot = self.config.snapshot();
        let analysis = snapshot.analyzer.analyze(session, conversation);
        let mut degradations = Vec::new();

        let ast_signal = self.ast_signal(session, &mut degradations);
        let engine_verdict = self
            .engine_verdict(session, conversation, &mut degradations)
            .await;

        let availability =
            Availability::from_flags(engine_verdict.is_some(), ast_signal.is_some());
        debug!(
            session_id = %session.id,
            tier = %availability,
            config_version = snapshot.version,
            "fusion tier selected"
        );

        let mut result = match (engine_verdict, ast_signal) {
            (Some(verdict), Some(signal)) => self.both(&snapshot, session, &verdict, &signal),
            (Some(verdict), None) => self.engine_only(&snapshot, session, &verdict),
            (None, Some(signal)) => self.ast_only(&snapshot, session, &signal),
            (None, None) => {
                info!(session_id = %session.id, "no classifier available, using fallback");
                fallback_result(&session.id, snapshot.version)
            }
        };
        result.degradations = degradations;
        result.analysis = Some(analysis);
        result
    }

    /// Classify many sessions concurrently. Output order matches input order.
    pub async fn classify_batch(
        self: &Arc<Self>,
        items: Vec<(Session, Conversation)>,
    ) -> Vec<ClassificationResult>
    where
        A: 'static,
        E: 'static,
    {
        let handles: Vec<_> = items
            .into_iter()
            .map(|(session, conversation)| {
                let this = Arc::clone(self);
                let id = session.id.clone();
                let handle =
                    tokio::spawn(async move { this.classify(&session, &conversation).await });
                (id, handle)
            })
            .collect();

        let version = self.config.version();
        let mut results = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    error!(session_id = %id, error = %e, "classification task failed");
                    results.push(fallback_result(&id, version));
                }
            }
        }
        results
    }

    fn ast_signal(
        &self,
        session: &Session,
        degradations: &mut Vec<DegradationEvent>,
    ) -> Option<AstSignal> {
        if !self.ast.is_available() {
            degradations.push(DegradationEvent::now(
                self.ast.name(),
                "classifier disabled",
                "engine_only",
            ));
            return None;
        }
        let signal = self.ast.classify(&session.code_content(), session.file_name());
        if signal.is_none() {
            degradations.push(DegradationEvent::now(
                self.ast.name(),
                "no verdict for this session",
                "engine_only",
            ));
        }
        signal
    }

    async fn engine_verdict(
        &self,
        session: &Session,
        conversation: &Conversation,
        degradations: &mut Vec<DegradationEvent>,
    ) -> Option<EngineVerdict> {
        if !self.engine.is_available().await {
            degradations.push(DegradationEvent::now(
                self.engine.name(),
                "engine unavailable",
                "ast_only",
            ));
            return None;
        }
        let request = EngineRequest::from_records(session, conversation, self.facets.clone());
        let verdict = self.engine.classify(&request).await;
        if verdict.is_none() {
            degradations.push(DegradationEvent::now(
                self.engine.name(),
                "engine call failed",
                "ast_only",
            ));
        }
        verdict
    }

    fn both(
        &self,
        snapshot: &ConfigSnapshot,
        session: &Session,
        verdict: &EngineVerdict,
        signal: &AstSignal,
    ) -> ClassificationResult {
        let fusion = &snapshot.resolved.fusion;
        let weights = Availability::Both.weights(fusion);
        let engine_intent = canonical_intent(&verdict.intent);
        let ast_intent = canonical_intent(&signal.primary_intent);

        let fused = fuse(
            Vote::new(&engine_intent, verdict.confidence),
            Vote::new(&ast_intent, signal.confidence),
            weights,
        );
        let (confidence, _) = apply_toggle_boost(
            fused.confidence,
            &toggle_labels(&fused.intent, verdict),
            &snapshot.resolved,
        );

        let mut intent_scores = BTreeMap::new();
        add_score(&mut intent_scores, &engine_intent, verdict.confidence * weights.clio);
        add_score(&mut intent_scores, &ast_intent, signal.confidence * weights.ast);

        let mut evidence = engine_evidence(verdict);
        evidence.extend(ast_evidence(signal));
        if !fused.agreed {
            evidence.push(Evidence::new(
                SignalSource::Ast,
                format!("disagreed: {ast_intent}"),
            ));
        }

        ClassificationResult {
            session_id: session.id.clone(),
            primary_intent: fused.intent,
            confidence,
            weights: Availability::Both.reported_weights(fusion),
            evidence,
            intent_scores,
            provenance: Provenance {
                ast: true,
                clio: true,
                fallback: false,
            },
            engine_labels: engine_labels(verdict),
            degradations: Vec::new(),
            config_version: snapshot.version,
            analysis: None,
        }
    }

    fn engine_only(
        &self,
        snapshot: &ConfigSnapshot,
        session: &Session,
        verdict: &EngineVerdict,
    ) -> ClassificationResult {
        let intent = canonical_intent(&verdict.intent);
        let (confidence, _) = apply_toggle_boost(
            Confidence::new(verdict.confidence),
            &toggle_labels(&intent, verdict),
            &snapshot.resolved,
        );

        let mut intent_scores = BTreeMap::new();
        add_score(&mut intent_scores, &intent, verdict.confidence);

        ClassificationResult {
            session_id: session.id.clone(),
            primary_intent: intent,
            confidence,
            weights: Availability::EngineOnly.reported_weights(&snapshot.resolved.fusion),
            evidence: engine_evidence(verdict),
            intent_scores,
            provenance: Provenance {
                ast: false,
                clio: true,
                fallback: false,
            },
            engine_labels: engine_labels(verdict),
            degradations: Vec::new(),
            config_version: snapshot.version,
            analysis: None,
        }
    }

    fn ast_only(
        &self,
        snapshot: &ConfigSnapshot,
        session: &Session,
        signal: &AstSignal,
    ) -> ClassificationResult {
        let intent = canonical_intent(&signal.primary_intent);
        let (confidence, _) = apply_toggle_boost(
            Confidence::new(signal.confidence),
            &[(ToggleFacet::Intent, intent.as_str())],
            &snapshot.resolved,
        );

        let mut intent_scores = BTreeMap::new();
        add_score(&mut intent_scores, &intent, signal.confidence);

        ClassificationResult {
            session_id: session.id.clone(),
            primary_intent: intent,
            confidence,
            weights: Availability::AstOnly.reported_weights(&snapshot.resolved.fusion),
            evidence: ast_evidence(signal),
            intent_scores,
            provenance: Provenance {
                ast: true,
                clio: false,
                fallback: false,
            },
            engine_labels: EngineLabels::default(),
            degradations: Vec::new(),
            config_version: snapshot.version,
            analysis: None,
        }
    }
}

/// Fixed result used when no signal produced a verdict.
pub fn fallback_result(session_id: &str, config_version: u64) -> ClassificationResult {
    let mut intent_scores = BTreeMap::new();
    intent_scores.insert(DEFAULT_INTENT_LABEL.to_string(), Confidence::FALLBACK);
    ClassificationResult {
        session_id: session_id.to_string(),
        primary_intent: DEFAULT_INTENT_LABEL.to_string(),
        confidence: Confidence::new(Confidence::FALLBACK),
        weights: SignalWeights { clio: 0.0, ast: 0.0 },
        evidence: vec![Evidence::new(
            SignalSource::Default,
            "no classifier available",
        )],
        intent_scores,
        provenance: Provenance {
            ast: false,
            clio: false,
            fallback: true,
        },
        engine_labels: EngineLabels::default(),
        degradations: Vec::new(),
        config_version,
        analysis: None,
    }
}

/// Map a free-form label onto the fixed intent table.
///
/// Known labels pass through; anything else goes through the dimension
/// table, which sends unmapped text to `general_development`.
pub fn canonical_intent(raw: &str) -> String {
    let slug = raw
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if is_known_label(&slug) {
        slug
    } else {
        intent_label(&slug).to_string()
    }
}

fn toggle_labels<'a>(intent: &'a str, verdict: &'a EngineVerdict) -> Vec<(ToggleFacet, &'a str)> {
    let mut labels = vec![(ToggleFacet::Intent, intent)];
    if let Some(task) = verdict.task.as_deref() {
        labels.push((ToggleFacet::Task, task));
    }
    if let Some(complexity) = verdict.complexity.as_deref() {
        labels.push((ToggleFacet::Complexity, complexity));
    }
    if let Some(domain) = verdict.domain.as_deref() {
        labels.push((ToggleFacet::Domain, domain));
    }
    labels
}

fn add_score(scores: &mut BTreeMap<String, f64>, label: &str, support: f64) {
    let entry = scores.entry(label.to_string()).or_insert(0.0);
    *entry = Confidence::new(*entry + support).value();
}

fn engine_labels(verdict: &EngineVerdict) -> EngineLabels {
    EngineLabels {
        task: verdict.task.clone(),
        complexity: verdict.complexity.clone(),
        domain: verdict.domain.clone(),
    }
}

fn engine_evidence(verdict: &EngineVerdict) -> Vec<Evidence> {
    let mut evidence = vec![Evidence::new(
        SignalSource::Clio,
        format!("engine intent: {}", verdict.intent),
    )];
    evidence.extend(
        verdict
            .evidence
            .iter()
            .map(|e| Evidence::new(SignalSource::Clio, e.clone())),
    );
    evidence
}

fn ast_evidence(signal: &AstSignal) -> Vec<Evidence> {
    signal
        .evidence
        .iter()
        .map(|e| Evidence::new(SignalSource::Ast, e.clone()))
        .collect()
}
