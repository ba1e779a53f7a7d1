//! Procedural account of a session: what was done, in what order, toward what goal.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical action verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionVerb {
    Create,
    Modify,
    Fix,
    Test,
    Refactor,
    Document,
    Analyze,
    Deploy,
}

impl ActionVerb {
    /// All verbs in vocabulary order.
    pub const ALL: [ActionVerb; 8] = [
        Self::Create,
        Self::Modify,
        Self::Fix,
        Self::Test,
        Self::Refactor,
        Self::Document,
        Self::Analyze,
        Self::Deploy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Fix => "fix",
            Self::Test => "test",
            Self::Refactor => "refactor",
            Self::Document => "document",
            Self::Analyze => "analyze",
            Self::Deploy => "deploy",
        }
    }

    /// Surface synonyms recognized in prompts.
    pub fn synonyms(self) -> &'static [&'static str] {
        match self {
            Self::Create => &["add", "create", "implement", "build", "develop"],
            Self::Modify => &["change", "update", "edit", "adjust", "modify"],
            Self::Fix => &["fix", "debug", "resolve", "correct", "repair"],
            Self::Test => &["test", "validate", "verify", "check", "examine"],
            Self::Refactor => &["refactor", "optimize", "improve", "enhance", "restructure"],
            Self::Document => &["document", "explain", "describe", "comment", "annotate"],
            Self::Analyze => &["analyze", "investigate", "explore", "research", "study"],
            Self::Deploy => &["deploy", "release", "publish", "distribute", "ship"],
        }
    }

    /// Position in [`ActionVerb::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an action was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOrigin {
    Prompt,
    CodeChange,
    FileChange,
}

/// One discrete (verb, object) step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub verb: ActionVerb,
    /// Known object term (e.g. `function`, `file`) or the captured free text.
    pub object: String,
    pub origin: ActionOrigin,
    pub timestamp: DateTime<Utc>,
    /// Leading excerpt of the text the action was extracted from.
    pub source_context: String,
}

/// Library of recognized verb orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePattern {
    CreateThenTest,
    AnalyzeThenFix,
    CreateModifyTest,
    IterativeModification,
    CustomSequence,
}

impl SequencePattern {
    pub const ALL: [SequencePattern; 5] = [
        Self::CreateThenTest,
        Self::AnalyzeThenFix,
        Self::CreateModifyTest,
        Self::IterativeModification,
        Self::CustomSequence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateThenTest => "create_then_test",
            Self::AnalyzeThenFix => "analyze_then_fix",
            Self::CreateModifyTest => "create_modify_test",
            Self::IterativeModification => "iterative_modification",
            Self::CustomSequence => "custom_sequence",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }
}

impl fmt::Display for SequencePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diversity measures of a sequence.
///
/// `complexity_score = 0.4 * action_diversity + 0.3 * object_diversity + 0.3 * total_actions`.
/// It is an unnormalized weighted count: any reported sequence scores at
/// least 1.3, and the score grows linearly with sequence length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceComplexity {
    pub action_diversity: usize,
    pub object_diversity: usize,
    pub total_actions: usize,
    pub complexity_score: f64,
}

/// Actions that occurred close together in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionSequence {
    pub actions: Vec<Action>,
    pub pattern: SequencePattern,
    pub complexity: SequenceComplexity,
    /// Minutes between the first and last action.
    pub duration_minutes: f64,
}

impl ActionSequence {
    pub fn verbs(&self) -> Vec<ActionVerb> {
        self.actions.iter().map(|a| a.verb).collect()
    }
}

/// Level of the goal a sequence serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalLevel {
    ImmediateTask,
    FeatureDevelopment,
    SystemImprovement,
    ProjectGoal,
}

impl GoalLevel {
    pub const ALL: [GoalLevel; 4] = [
        Self::ImmediateTask,
        Self::FeatureDevelopment,
        Self::SystemImprovement,
        Self::ProjectGoal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImmediateTask => "immediate_task",
            Self::FeatureDevelopment => "feature_development",
            Self::SystemImprovement => "system_improvement",
            Self::ProjectGoal => "project_goal",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|g| *g == self).unwrap_or(0)
    }
}

/// Higher-level goal inferred from a sequence pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub level: GoalLevel,
    pub description: String,
    pub confidence: f64,
}

/// Bucketed mean sequence complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// How varied the session's sequence patterns were.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    Systematic,
    Iterative,
    Exploratory,
}

/// Counts and distinct labels across the procedural analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProceduralSummary {
    pub total_actions: usize,
    pub total_sequences: usize,
    pub total_goals: usize,
    pub action_types: Vec<ActionVerb>,
    pub sequence_patterns: Vec<SequencePattern>,
    pub goal_levels: Vec<GoalLevel>,
}

/// Reduction of actions, sequences, and goals into one "what" summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProceduralProfile {
    pub primary_action_type: Option<ActionVerb>,
    pub goal_level: Option<GoalLevel>,
    pub complexity_level: ComplexityLevel,
    pub workflow_type: WorkflowType,
    pub procedural_confidence: f64,
    pub summary: ProceduralSummary,
}

/// Fixed-length vectors describing the procedure, for clustering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProceduralEmbeddings {
    pub actions: Vec<f32>,
    pub sequences: Vec<f32>,
    pub goals: Vec<f32>,
    pub combined: Vec<f32>,
    /// Text embedding of all user prompts over the procedural vocabulary.
    pub prompts: Vec<f32>,
}

/// Everything the procedural stages produce for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProceduralAnalysis {
    pub actions: Vec<Action>,
    pub sequences: Vec<ActionSequence>,
    pub goals: Vec<Goal>,
    pub embeddings: ProceduralEmbeddings,
    pub profile: ProceduralProfile,
}
