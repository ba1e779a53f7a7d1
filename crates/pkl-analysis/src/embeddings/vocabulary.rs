//! Fixed term vocabularies used by the embedding generator.
//!
//! Category order is significant: a term's bucket depends on its
//! category index, so reordering changes every embedding.

use pkl_core::models::ActionVerb;

/// One named group of terms.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularyCategory {
    pub name: String,
    pub terms: Vec<String>,
}

/// Ordered list of term categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub name: String,
    pub categories: Vec<VocabularyCategory>,
}

impl Vocabulary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            categories: Vec::new(),
        }
    }

    /// Append a category.
    pub fn category(mut self, name: &str, terms: &[&str]) -> Self {
        self.categories.push(VocabularyCategory {
            name: name.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
        });
        self
    }

    /// Weight every category contributes per occurrence: `1 / |categories|`.
    pub fn category_weight(&self) -> f32 {
        if self.categories.is_empty() {
            0.0
        } else {
            1.0 / self.categories.len() as f32
        }
    }

    /// Source-code vocabulary.
    pub fn code() -> Self {
        Self::new("code")
            .category(
                "data_manipulation",
                &["pandas", "dataframe", "numpy", "groupby", "read_csv", "merge(", ".loc["],
            )
            .category(
                "visualization",
                &["matplotlib", "plt.", "seaborn", "plot", "chart", "figure", "axes"],
            )
            .category(
                "modeling",
                &["sklearn", "model", "fit(", "predict", "train", "tensorflow", "torch"],
            )
            .category(
                "web",
                &["function", "const ", "=>", "react", "express", "route", "html"],
            )
            .category(
                "testing",
                &["test", "assert", "expect(", "mock", "describe(", "pytest"],
            )
            .category(
                "debugging",
                &["console.log", "print(", "debug", "error", "except", "catch", "traceback"],
            )
            .category(
                "documentation",
                &["\"\"\"", "//", "docstring", "readme", "@param", "@returns"],
            )
            .category(
                "structure",
                &["class ", "def ", "import ", "return", "interface", "async "],
            )
    }

    /// Conversation vocabulary.
    pub fn conversation() -> Self {
        Self::new("conversation")
            .category(
                "explore",
                &["explore", "look at", "understand", "what is", "investigate", "analyze"],
            )
            .category(
                "implement",
                &["add", "create", "implement", "build", "new", "feature"],
            )
            .category(
                "debug",
                &["fix", "bug", "error", "debug", "broken", "issue", "fail"],
            )
            .category(
                "refactor",
                &["refactor", "clean up", "restructure", "rename", "simplify"],
            )
            .category(
                "optimize",
                &["optimize", "faster", "performance", "slow", "memory"],
            )
            .category(
                "document",
                &["document", "explain", "comment", "readme", "docs"],
            )
            .category(
                "test",
                &["test", "verify", "validate", "coverage", "assert"],
            )
            .category(
                "data",
                &["data", "dataset", "plot", "chart", "model", "train"],
            )
    }

    /// Procedural vocabulary: one category per action verb, its synonyms as terms.
    pub fn procedural() -> Self {
        ActionVerb::ALL
            .iter()
            .fold(Self::new("procedural"), |vocab, verb| {
                vocab.category(verb.as_str(), verb.synonyms())
            })
    }
}
