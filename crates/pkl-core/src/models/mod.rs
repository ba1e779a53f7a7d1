//! Canonical data model shared by the analysis and fusion crates.

pub mod analysis;
pub mod classification;
pub mod confidence;
pub mod conversation;
pub mod degradation_event;
pub mod engine;
pub mod facet;
pub mod intent_profile;
pub mod procedural;
pub mod session;

pub use analysis::SessionAnalysis;
pub use classification::{
    ClassificationResult, EngineLabels, Evidence, Provenance, SignalSource, SignalWeights,
};
pub use confidence::Confidence;
pub use conversation::{Conversation, Message, Role};
pub use degradation_event::DegradationEvent;
pub use engine::{EngineFacet, EngineMessage, EngineRequest, EngineSession, EngineVerdict};
pub use facet::{DimensionScore, Facet, FacetScore};
pub use intent_profile::{Characteristic, IntentProfile};
pub use procedural::{
    Action, ActionOrigin, ActionSequence, ActionVerb, ComplexityLevel, Goal, GoalLevel,
    ProceduralAnalysis, ProceduralEmbeddings, ProceduralProfile, ProceduralSummary,
    SequenceComplexity, SequencePattern, WorkflowType,
};
pub use session::{ChangeType, CodeDelta, FileChange, Session};
