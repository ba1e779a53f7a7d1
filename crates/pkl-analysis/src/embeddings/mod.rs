//! Deterministic pseudo-embeddings: vocabulary-weighted term hashing,
//! label prototypes, and vector similarity.

pub mod generator;
pub mod prototype;
pub mod similarity;
pub mod vocabulary;

pub use generator::{EmbeddingGenerator, EmbeddingNamespace};
pub use prototype::dimension_prototype;
pub use similarity::{cosine_similarity, l2_normalize};
pub use vocabulary::Vocabulary;
