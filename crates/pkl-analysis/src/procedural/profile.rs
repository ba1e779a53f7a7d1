//! Procedural profile aggregation.

use std::collections::HashMap;
use std::hash::Hash;

use pkl_core::models::{
    Action, ActionSequence, ComplexityLevel, Goal, ProceduralProfile, ProceduralSummary,
    WorkflowType,
};

/// Most frequent item; on ties the one seen first wins.
fn most_frequent<T: Copy + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Option<T> {
    let mut order: Vec<T> = Vec::new();
    let mut counts: HashMap<T, usize> = HashMap::new();
    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }
    let mut best: Option<(T, usize)> = None;
    for item in order {
        let n = counts.get(&item).copied().unwrap_or(0);
        match best {
            Some((_, b)) if n <= b => {}
            _ => best = Some((item, n)),
        }
    }
    best.map(|(item, _)| item)
}

/// Distinct items in first-seen order.
fn distinct<T: Copy + Eq + Hash>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|i| seen.insert(*i)).collect()
}

/// Bucket the mean sequence complexity score.
pub fn complexity_level(sequences: &[ActionSequence]) -> ComplexityLevel {
    let mean = if sequences.is_empty() {
        0.0
    } else {
        sequences
            .iter()
            .map(|s| s.complexity.complexity_score)
            .sum::<f64>()
            / sequences.len() as f64
    };
    if mean < 0.3 {
        ComplexityLevel::Low
    } else if mean < 0.6 {
        ComplexityLevel::Medium
    } else if mean < 0.8 {
        ComplexityLevel::High
    } else {
        ComplexityLevel::VeryHigh
    }
}

/// One distinct pattern is systematic, up to three iterative, more exploratory.
pub fn workflow_type(sequences: &[ActionSequence]) -> WorkflowType {
    match distinct(sequences.iter().map(|s| s.pattern)).len() {
        1 => WorkflowType::Systematic,
        n if n <= 3 => WorkflowType::Iterative,
        _ => WorkflowType::Exploratory,
    }
}

pub fn aggregate_procedural_profile(
    actions: &[Action],
    sequences: &[ActionSequence],
    goals: &[Goal],
) -> ProceduralProfile {
    let mut confidence = 0.0;
    if !actions.is_empty() {
        confidence += 0.3;
    }
    if !sequences.is_empty() {
        confidence += 0.4;
    }
    if !goals.is_empty() {
        confidence += 0.3;
    }

    ProceduralProfile {
        primary_action_type: most_frequent(actions.iter().map(|a| a.verb)),
        goal_level: most_frequent(goals.iter().map(|g| g.level)),
        complexity_level: complexity_level(sequences),
        workflow_type: workflow_type(sequences),
        procedural_confidence: f64::min(confidence, 1.0),
        summary: ProceduralSummary {
            total_actions: actions.len(),
            total_sequences: sequences.len(),
            total_goals: goals.len(),
            action_types: distinct(actions.iter().map(|a| a.verb)),
            sequence_patterns: distinct(sequences.iter().map(|s| s.pattern)),
            goal_levels: distinct(goals.iter().map(|g| g.level)),
        },
    }
}
