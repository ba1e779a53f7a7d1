//! Pattern → goal lookup.

use pkl_core::models::{ActionSequence, ActionVerb, Goal, GoalLevel, SequencePattern};

/// Goal implied by one sequence.
pub fn infer_goal(sequence: &ActionSequence) -> Goal {
    let (level, description, confidence) = match sequence.pattern {
        SequencePattern::CreateThenTest => (
            GoalLevel::FeatureDevelopment,
            "Develop and validate new functionality",
            0.8,
        ),
        SequencePattern::AnalyzeThenFix => (
            GoalLevel::SystemImprovement,
            "Identify and resolve issues",
            0.9,
        ),
        SequencePattern::CreateModifyTest => (
            GoalLevel::FeatureDevelopment,
            "Iterative feature development",
            0.7,
        ),
        SequencePattern::IterativeModification => (
            GoalLevel::ImmediateTask,
            "Refinement and optimization",
            0.6,
        ),
        SequencePattern::CustomSequence => custom_goal(&sequence.verbs()),
    };
    Goal {
        level,
        description: description.to_string(),
        confidence,
    }
}

fn custom_goal(verbs: &[ActionVerb]) -> (GoalLevel, &'static str, f64) {
    if verbs.contains(&ActionVerb::Create) {
        (
            GoalLevel::FeatureDevelopment,
            "Custom feature development workflow",
            0.5,
        )
    } else if verbs.contains(&ActionVerb::Fix) {
        (GoalLevel::SystemImprovement, "Custom debugging workflow", 0.5)
    } else {
        (GoalLevel::ImmediateTask, "Custom workflow execution", 0.4)
    }
}

/// One goal per sequence, in sequence order.
pub fn infer_goals(sequences: &[ActionSequence]) -> Vec<Goal> {
    sequences.iter().map(infer_goal).collect()
}
