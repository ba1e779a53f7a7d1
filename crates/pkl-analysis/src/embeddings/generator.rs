//! Embedding generator with an in-memory cache.
//!
//! `embed_text` is the pure algorithm; `EmbeddingGenerator` wraps it with
//! a moka cache keyed by a blake3 hash of (namespace, text).

use std::time::Duration;

use moka::sync::Cache;

use pkl_core::constants::{
    CATEGORY_STRIDE, CODE_NAMESPACE_OFFSET, CONVERSATION_NAMESPACE_OFFSET,
    DEFAULT_EMBEDDING_CACHE_SIZE, PROCEDURAL_EMBEDDING_DIMS, SEMANTIC_EMBEDDING_DIMS,
};

use super::similarity::l2_normalize;
use super::vocabulary::Vocabulary;

/// Which content an embedding was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddingNamespace {
    Code,
    Conversation,
    /// User prompts, embedded over the action-verb vocabulary.
    Procedural,
}

impl EmbeddingNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Conversation => "conversation",
            Self::Procedural => "procedural",
        }
    }

    pub fn dims(self) -> usize {
        match self {
            Self::Code | Self::Conversation => SEMANTIC_EMBEDDING_DIMS,
            Self::Procedural => PROCEDURAL_EMBEDDING_DIMS,
        }
    }

    /// Bucket offset separating this namespace from the others.
    pub fn offset(self) -> usize {
        match self {
            Self::Code | Self::Procedural => CODE_NAMESPACE_OFFSET,
            Self::Conversation => CONVERSATION_NAMESPACE_OFFSET,
        }
    }
}

/// Lower-case, split on whitespace, re-join with single spaces.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-overlapping occurrences of `term` in already-normalized text.
fn count_occurrences(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    haystack.matches(term).count()
}

/// Build a vocabulary-weighted embedding.
///
/// For category `c` and term `t` occurring `n > 0` times, adds
/// `n / |categories|` at `(c*64 + len(t) + offset) mod dims`, then
/// L2-normalizes. Text with no vocabulary hits yields the zero vector.
pub fn embed_text(text: &str, vocabulary: &Vocabulary, dims: usize, offset: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dims];
    if dims == 0 {
        return vector;
    }
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return vector;
    }

    let weight = vocabulary.category_weight();
    for (c, category) in vocabulary.categories.iter().enumerate() {
        for term in &category.terms {
            let term = term.to_lowercase();
            let count = count_occurrences(&normalized, &term);
            if count > 0 {
                let idx = (c * CATEGORY_STRIDE + term.len() + offset) % dims;
                vector[idx] += count as f32 * weight;
            }
        }
    }

    l2_normalize(&mut vector);
    vector
}

/// Cached embedding generator for the three built-in namespaces.
pub struct EmbeddingGenerator {
    code: Vocabulary,
    conversation: Vocabulary,
    procedural: Vocabulary,
    cache: Cache<String, Vec<f32>>,
}

impl Default for EmbeddingGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_CACHE_SIZE)
    }
}

impl EmbeddingGenerator {
    /// Create a generator whose cache holds at most `max_entries` vectors.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self {
            code: Vocabulary::code(),
            conversation: Vocabulary::conversation(),
            procedural: Vocabulary::procedural(),
            cache,
        }
    }

    fn vocabulary(&self, namespace: EmbeddingNamespace) -> &Vocabulary {
        match namespace {
            EmbeddingNamespace::Code => &self.code,
            EmbeddingNamespace::Conversation => &self.conversation,
            EmbeddingNamespace::Procedural => &self.procedural,
        }
    }

    fn cache_key(namespace: EmbeddingNamespace, text: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(namespace.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Embed `text` in `namespace`, consulting the cache first.
    pub fn embed(&self, namespace: EmbeddingNamespace, text: &str) -> Vec<f32> {
        let key = Self::cache_key(namespace, text);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }
        let vector = embed_text(
            text,
            self.vocabulary(namespace),
            namespace.dims(),
            namespace.offset(),
        );
        self.cache.insert(key, vector.clone());
        vector
    }

    pub fn code_embedding(&self, code: &str) -> Vec<f32> {
        self.embed(EmbeddingNamespace::Code, code)
    }

    pub fn conversation_embedding(&self, text: &str) -> Vec<f32> {
        self.embed(EmbeddingNamespace::Conversation, text)
    }

    pub fn prompt_embedding(&self, prompts: &str) -> Vec<f32> {
        self.embed(EmbeddingNamespace::Procedural, prompts)
    }

    /// Number of cached vectors (approximate, see moka docs).
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_vector() {
        let v = embed_text("", &Vocabulary::code(), 512, 0);
        assert_eq!(v.len(), 512);
        assert!(v.iter().all(|x| *x == 0.0));

        let v = embed_text("   \n\t ", &Vocabulary::code(), 512, 0);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn term_lands_in_expected_bucket() {
        // "pandas" is category 0, length 6
        let v = embed_text("import pandas", &Vocabulary::new("t").category("a", &["pandas"]), 512, 0);
        assert!((v[6] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn offset_shifts_bucket() {
        let vocab = Vocabulary::new("t").category("a", &["pandas"]);
        let v = embed_text("pandas", &vocab, 512, 256);
        assert!((v[262] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn counting_is_case_insensitive_and_repeated() {
        let vocab = Vocabulary::new("t")
            .category("a", &["fix"])
            .category("b", &["test"]);
        // "fix" twice at bucket 3, "test" once at bucket 64+4
        let v = embed_text("FIX it,   then Fix   and test", &vocab, 512, 0);
        let ratio = v[3] / v[68];
        assert!((ratio - 2.0).abs() < 1e-5);
    }

    #[test]
    fn whitespace_is_collapsed_before_matching() {
        let vocab = Vocabulary::new("t").category("a", &["look at"]);
        let v = embed_text("please look\n\n   at this", &vocab, 512, 0);
        assert!(v.iter().any(|x| *x > 0.0));
    }

    #[test]
    fn result_is_unit_length() {
        let v = embed_text(
            "import pandas as pd\ndf = pd.read_csv('x.csv')\nplt.plot(df)",
            &Vocabulary::code(),
            512,
            0,
        );
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn generator_is_deterministic_and_caches() {
        let generator = EmbeddingGenerator::new(16);
        let a = generator.code_embedding("def train(model): return model.fit(x)");
        let b = generator.code_embedding("def train(model): return model.fit(x)");
        assert_eq!(a, b);
        assert_eq!(a, embed_text("def train(model): return model.fit(x)", &Vocabulary::code(), 512, 0));
    }

    #[test]
    fn namespaces_do_not_share_cache_entries() {
        let generator = EmbeddingGenerator::new(16);
        let code = generator.code_embedding("fix the error");
        let conv = generator.conversation_embedding("fix the error");
        assert_ne!(code, conv);
    }

    #[test]
    fn procedural_embedding_has_128_dims() {
        let generator = EmbeddingGenerator::default();
        let v = generator.prompt_embedding("please add a test");
        assert_eq!(v.len(), 128);
        assert!(v.iter().any(|x| *x != 0.0));
    }
}
