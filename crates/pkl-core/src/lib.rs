//! # pkl-core
//!
//! Foundation crate for the PKL session intent classifier.
//! Defines the canonical session model, config, errors, constants,
//! and the two signal-adapter traits. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod hash;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{PklConfig, ResolvedConfig};
pub use errors::{PklError, PklResult};
pub use models::{
    ClassificationResult, CodeDelta, Confidence, Conversation, FileChange, Message, Session,
};
