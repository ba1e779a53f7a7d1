//! SessionAnalyzer: runs embeddings, facet scoring, intent aggregation,
//! and procedural analysis for one session or a batch.

use rayon::prelude::*;

use pkl_core::models::{Conversation, Session, SessionAnalysis};
use pkl_core::ResolvedConfig;

use crate::embeddings::EmbeddingGenerator;
use crate::facets::{FacetCatalog, FacetScorer, ScoringContext};
use crate::intent::aggregate_profile;
use crate::procedural::ProceduralAnalyzer;

/// Local analysis pipeline. Stateless per call apart from the embedding cache.
pub struct SessionAnalyzer {
    embeddings: EmbeddingGenerator,
    scorer: FacetScorer,
    procedural: ProceduralAnalyzer,
}

impl Default for SessionAnalyzer {
    fn default() -> Self {
        Self::new(&ResolvedConfig::default())
    }
}

impl SessionAnalyzer {
    /// Build an analyzer from resolved configuration.
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            embeddings: EmbeddingGenerator::new(config.embedding_cache_size),
            scorer: FacetScorer::new(FacetCatalog::with_weights(&config.facet_weights)),
            procedural: ProceduralAnalyzer::new(config.sequence_gap_secs),
        }
    }

    pub fn embeddings(&self) -> &EmbeddingGenerator {
        &self.embeddings
    }

    pub fn catalog(&self) -> &FacetCatalog {
        self.scorer.catalog()
    }

    pub fn analyze(&self, session: &Session, conversation: &Conversation) -> SessionAnalysis {
        let code = session.code_content();
        let conversation_text = conversation.text();

        let code_embedding = self.embeddings.code_embedding(&code);
        let conversation_embedding = self.embeddings.conversation_embedding(&conversation_text);

        let text = format!("{code}\n{conversation_text}");
        let facet_scores = self.scorer.score_all(&ScoringContext {
            code_embedding: &code_embedding,
            conversation_embedding: &conversation_embedding,
            session,
            text: &text,
        });
        let intent_profile = aggregate_profile(&facet_scores);
        let procedural = self
            .procedural
            .analyze(session, conversation, &self.embeddings);

        tracing::debug!(
            session_id = %session.id,
            intent = %intent_profile.primary_intent,
            confidence = intent_profile.confidence,
            "session analyzed"
        );

        SessionAnalysis {
            session_id: session.id.clone(),
            code_embedding,
            conversation_embedding,
            facet_scores,
            intent_profile,
            procedural,
        }
    }

    /// Analyze many sessions in parallel. Output order matches input order.
    pub fn analyze_batch(&self, items: &[(Session, Conversation)]) -> Vec<SessionAnalysis> {
        items
            .par_iter()
            .map(|(session, conversation)| self.analyze(session, conversation))
            .collect()
    }
}
