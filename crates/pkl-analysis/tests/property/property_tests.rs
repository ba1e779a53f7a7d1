//! Property-based tests for the analysis pipeline.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use pkl_analysis::embeddings::generator::embed_text;
use pkl_analysis::embeddings::Vocabulary;
use pkl_analysis::procedural::group_sequences;
use pkl_analysis::SessionAnalyzer;
use pkl_core::models::{
    Action, ActionOrigin, ActionVerb, CodeDelta, Conversation, Message, Session,
};

fn arb_verb() -> impl Strategy<Value = ActionVerb> {
    (0usize..ActionVerb::ALL.len()).prop_map(|i| ActionVerb::ALL[i])
}

proptest! {
    #[test]
    fn embedding_is_deterministic(text in ".{0,200}") {
        let vocab = Vocabulary::conversation();
        let a = embed_text(&text, &vocab, 512, 256);
        let b = embed_text(&text, &vocab, 512, 256);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn embedding_is_unit_or_zero(text in "[a-z ().:]{0,300}") {
        let v = embed_text(&text, &Vocabulary::code(), 512, 0);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4, "norm {}", norm);
    }

    #[test]
    fn whitespace_only_is_zero(ws in "[ \t\n\r]{0,40}") {
        let v = embed_text(&ws, &Vocabulary::code(), 512, 0);
        prop_assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn sequences_never_contain_a_lone_action(
        steps in prop::collection::vec((arb_verb(), 0i64..900), 0..60)
    ) {
        let mut t = 0i64;
        let actions: Vec<Action> = steps
            .iter()
            .map(|(verb, gap)| {
                t += gap;
                Action {
                    verb: *verb,
                    object: "code".to_string(),
                    origin: ActionOrigin::CodeChange,
                    timestamp: Utc.timestamp_opt(1_700_000_000 + t, 0).unwrap(),
                    source_context: String::new(),
                }
            })
            .collect();
        let sequences = group_sequences(&actions, 300);
        let covered: usize = sequences.iter().map(|s| s.actions.len()).sum();
        prop_assert!(covered <= actions.len());
        for s in &sequences {
            prop_assert!(s.actions.len() >= 2);
            prop_assert!(s.complexity.complexity_score >= 1.3 - 1e-9);
            for w in s.actions.windows(2) {
                let gap = (w[1].timestamp - w[0].timestamp).num_seconds();
                prop_assert!((0..=300).contains(&gap));
            }
        }
    }

    #[test]
    fn scores_stay_in_unit_range(
        prompts in prop::collection::vec("[a-z ]{1,40}", 0..5),
        codes in prop::collection::vec("[a-z(). =]{0,60}", 0..12),
        duration in prop::option::of(0u64..40_000_000),
    ) {
        let base = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut session = Session::new("prop", base);
        session.duration_ms = duration;
        for (i, c) in codes.iter().enumerate() {
            session.code_deltas.push(CodeDelta {
                before_content: if i % 2 == 0 { None } else { Some(String::new()) },
                after_content: c.clone(),
                timestamp: base + chrono::Duration::seconds(i as i64 * 30),
            });
        }
        let conversation = Conversation::new(
            prompts
                .iter()
                .enumerate()
                .map(|(i, p)| Message::user(p.clone(), base + chrono::Duration::seconds(i as i64)))
                .collect(),
        );

        let analysis = SessionAnalyzer::default().analyze(&session, &conversation);
        for facet in &analysis.facet_scores {
            prop_assert!((0.0..=1.0).contains(&facet.confidence));
            for d in &facet.scores {
                prop_assert!((0.0..=1.0).contains(&d.score));
            }
        }
        prop_assert!((0.0..=1.0).contains(&analysis.intent_profile.confidence));
        prop_assert!((0.0..=1.0).contains(&analysis.procedural.profile.procedural_confidence));
    }
}

#[test]
fn large_session_stays_bounded() {
    let base = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let mut session = Session::new("large", base);
    for i in 0..10_000i64 {
        session.code_deltas.push(CodeDelta {
            before_content: Some("x".to_string()),
            after_content: "y = x + 1".to_string(),
            timestamp: base + chrono::Duration::seconds(i),
        });
    }
    let analysis = SessionAnalyzer::default().analyze(&session, &Conversation::default());
    assert_eq!(analysis.procedural.actions.len(), 10_000);
    assert_eq!(analysis.procedural.sequences.len(), 1);
    for facet in &analysis.facet_scores {
        for d in &facet.scores {
            assert!((0.0..=1.0).contains(&d.score));
        }
    }
}
