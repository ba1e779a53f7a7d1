//! Procedural analysis: actions → sequences → goals → profile.

pub mod embedding;
pub mod extractor;
pub mod goals;
pub mod profile;
pub mod sequences;

use pkl_core::constants::DEFAULT_SEQUENCE_GAP_SECS;
use pkl_core::models::{Conversation, ProceduralAnalysis, Session};

use crate::embeddings::EmbeddingGenerator;

pub use extractor::ActionExtractor;
pub use goals::{infer_goal, infer_goals};
pub use profile::aggregate_procedural_profile;
pub use sequences::{classify_pattern, group_sequences};

/// Runs every procedural stage for one session.
pub struct ProceduralAnalyzer {
    extractor: ActionExtractor,
    gap_secs: i64,
}

impl Default for ProceduralAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_GAP_SECS)
    }
}

impl ProceduralAnalyzer {
    pub fn new(gap_secs: i64) -> Self {
        Self {
            extractor: ActionExtractor::new(),
            gap_secs,
        }
    }

    pub fn analyze(
        &self,
        session: &Session,
        conversation: &Conversation,
        embeddings: &EmbeddingGenerator,
    ) -> ProceduralAnalysis {
        let actions = self.extractor.extract(session, conversation);
        let sequences = group_sequences(&actions, self.gap_secs);
        let goals = infer_goals(&sequences);
        let profile = aggregate_procedural_profile(&actions, &sequences, &goals);

        let prompt_text = conversation
            .prompts()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let embeddings = embedding::procedural_embeddings(
            &actions,
            &sequences,
            &goals,
            embeddings.prompt_embedding(&prompt_text),
        );

        tracing::debug!(
            session_id = %session.id,
            actions = actions.len(),
            sequences = sequences.len(),
            goals = goals.len(),
            "procedural analysis complete"
        );

        ProceduralAnalysis {
            actions,
            sequences,
            goals,
            embeddings,
            profile,
        }
    }
}
