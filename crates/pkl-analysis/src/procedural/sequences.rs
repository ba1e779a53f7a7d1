//! Time-proximity grouping and pattern classification.

use std::collections::HashSet;

use pkl_core::models::{Action, ActionSequence, ActionVerb, SequenceComplexity, SequencePattern};

/// Group actions into sequences.
///
/// Actions are sorted by timestamp (stable, so extraction order breaks
/// ties). A new sequence starts whenever the gap to the previous action
/// exceeds `gap_secs`. Groups of a single action are not reported.
pub fn group_sequences(actions: &[Action], gap_secs: i64) -> Vec<ActionSequence> {
    let mut sorted: Vec<&Action> = actions.iter().collect();
    sorted.sort_by_key(|a| a.timestamp);

    let gap_ms = gap_secs.saturating_mul(1000);
    let mut groups: Vec<Vec<Action>> = Vec::new();
    let mut current: Vec<Action> = Vec::new();

    for action in sorted {
        if let Some(prev) = current.last() {
            let elapsed = (action.timestamp - prev.timestamp).num_milliseconds();
            if elapsed > gap_ms {
                groups.push(std::mem::take(&mut current));
            }
        }
        current.push(action.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups
        .into_iter()
        .filter(|g| g.len() > 1)
        .map(build_sequence)
        .collect()
}

fn build_sequence(actions: Vec<Action>) -> ActionSequence {
    let verbs: Vec<ActionVerb> = actions.iter().map(|a| a.verb).collect();
    let pattern = classify_pattern(&verbs);
    let complexity = sequence_complexity(&actions);
    let duration_minutes = match (actions.first(), actions.last()) {
        (Some(first), Some(last)) => {
            (last.timestamp - first.timestamp).num_milliseconds() as f64 / 60_000.0
        }
        _ => 0.0,
    };
    ActionSequence {
        actions,
        pattern,
        complexity,
        duration_minutes,
    }
}

/// Exact match of the ordered verb list against the pattern library.
pub fn classify_pattern(verbs: &[ActionVerb]) -> SequencePattern {
    use ActionVerb::*;
    match verbs {
        [Create, Test] => SequencePattern::CreateThenTest,
        [Analyze, Fix] => SequencePattern::AnalyzeThenFix,
        [Create, Modify, Test] => SequencePattern::CreateModifyTest,
        _ if !verbs.is_empty() && verbs.iter().all(|v| *v == Modify) => {
            SequencePattern::IterativeModification
        }
        _ => SequencePattern::CustomSequence,
    }
}

/// `0.4 × unique verbs + 0.3 × unique objects + 0.3 × total actions`.
pub fn sequence_complexity(actions: &[Action]) -> SequenceComplexity {
    let action_diversity = actions.iter().map(|a| a.verb).collect::<HashSet<_>>().len();
    let object_diversity = actions
        .iter()
        .map(|a| a.object.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_actions = actions.len();
    let complexity_score = 0.4 * action_diversity as f64
        + 0.3 * object_diversity as f64
        + 0.3 * total_actions as f64;
    SequenceComplexity {
        action_diversity,
        object_diversity,
        total_actions,
        complexity_score,
    }
}
