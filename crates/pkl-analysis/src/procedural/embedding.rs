//! Procedural embeddings: fixed slots for verbs, patterns, and goal levels.

use pkl_core::constants::PROCEDURAL_EMBEDDING_DIMS;
use pkl_core::models::{Action, ActionSequence, Goal, ProceduralEmbeddings};

use crate::embeddings::l2_normalize;

const ACTION_WEIGHT: f32 = 0.1;
const SEQUENCE_WEIGHT: f32 = 0.2;
const PATTERN_SLOT_BASE: usize = 50;
const LENGTH_SLOT: usize = 100;
const GOAL_SLOT_BASE: usize = 110;

fn slot(vector: &mut [f32], idx: usize, delta: f32) {
    if let Some(v) = vector.get_mut(idx) {
        *v += delta;
    }
}

pub fn action_embedding(actions: &[Action]) -> Vec<f32> {
    let mut v = vec![0.0f32; PROCEDURAL_EMBEDDING_DIMS];
    for a in actions {
        slot(&mut v, a.verb.index(), ACTION_WEIGHT);
    }
    l2_normalize(&mut v);
    v
}

/// Pattern slot per sequence, plus a length signal `min(len / 10, 1)` at slot 100.
pub fn sequence_embedding(sequences: &[ActionSequence]) -> Vec<f32> {
    let mut v = vec![0.0f32; PROCEDURAL_EMBEDDING_DIMS];
    for s in sequences {
        slot(&mut v, s.pattern.index() + PATTERN_SLOT_BASE, SEQUENCE_WEIGHT);
        slot(
            &mut v,
            LENGTH_SLOT,
            (s.actions.len() as f32 / 10.0).min(1.0),
        );
    }
    l2_normalize(&mut v);
    v
}

pub fn goal_embedding(goals: &[Goal]) -> Vec<f32> {
    let mut v = vec![0.0f32; PROCEDURAL_EMBEDDING_DIMS];
    for g in goals {
        slot(&mut v, g.level.index() + GOAL_SLOT_BASE, g.confidence as f32);
    }
    l2_normalize(&mut v);
    v
}

/// Element-wise sum of the three, re-normalized.
pub fn combined_embedding(actions: &[f32], sequences: &[f32], goals: &[f32]) -> Vec<f32> {
    let mut v: Vec<f32> = (0..PROCEDURAL_EMBEDDING_DIMS)
        .map(|i| {
            actions.get(i).copied().unwrap_or(0.0)
                + sequences.get(i).copied().unwrap_or(0.0)
                + goals.get(i).copied().unwrap_or(0.0)
        })
        .collect();
    l2_normalize(&mut v);
    v
}

/// All structural embeddings; `prompts` is filled in by the caller.
pub fn procedural_embeddings(
    actions: &[Action],
    sequences: &[ActionSequence],
    goals: &[Goal],
    prompts: Vec<f32>,
) -> ProceduralEmbeddings {
    let a = action_embedding(actions);
    let s = sequence_embedding(sequences);
    let g = goal_embedding(goals);
    let combined = combined_embedding(&a, &s, &g);
    ProceduralEmbeddings {
        actions: a,
        sequences: s,
        goals: g,
        combined,
        prompts,
    }
}
