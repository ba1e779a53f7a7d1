//! Pattern-based local classifier.
//!
//! Scores code against per-intent regex rules and reports the label with
//! the most weighted hits. Availability is fixed at construction.

use regex::Regex;
use tracing::error;

use pkl_core::traits::{AstClassifier, AstSignal};

use super::language::{detect_language, Language};

/// Floor and span of the reported confidence.
const BASE_CONFIDENCE: f64 = 0.4;
const CONFIDENCE_SPAN: f64 = 0.5;

struct PatternRule {
    label: &'static str,
    name: &'static str,
    /// Restrict to these languages; empty = any language.
    languages: &'static [Language],
    weight: f64,
    regex: Regex,
}

/// Rule table: (label, rule name, languages, weight, pattern).
const RULES: &[(&str, &str, &[Language], f64, &str)] = &[
    ("data_exploration", "dataframe load", &[], 1.5, r"read_csv|read_parquet|read_excel|pd\.DataFrame"),
    ("data_exploration", "aggregation", &[], 1.0, r"\.groupby\(|\.describe\(\)|\.value_counts\(|\.pivot_table\("),
    ("data_exploration", "inspection", &[Language::Python], 0.5, r"\.head\(|\.info\(\)|\.shape\b"),
    ("data_visualization", "plotting", &[], 1.5, r"plt\.|matplotlib|seaborn|sns\.|plotly"),
    ("data_visualization", "chart call", &[], 1.0, r"\.plot\(|\.hist\(|\.scatter\(|d3\.|new Chart\("),
    ("model_development", "ml library", &[], 1.5, r"sklearn|tensorflow|torch|keras|xgboost"),
    ("model_development", "training", &[], 1.0, r"\.fit\(|\.predict\(|train_test_split|\.compile\("),
    ("debug", "print tracing", &[], 0.75, r"print\(|console\.log\(|println!\(|dbg!\(|System\.out\.print"),
    ("debug", "error handling", &[], 1.0, r"\bexcept\b|\bcatch\s*\(|traceback|\braise\b|\.unwrap_err\(|debugger;"),
    ("test", "assertions", &[], 1.5, r"\bassert(_eq|_ne)?!?\s*\(|\bassert\s+|expect\(|\.should\b"),
    ("test", "test harness", &[], 1.5, r"#\[test\]|#\[tokio::test\]|\bdef test_|\bdescribe\(|\bit\(|pytest|unittest"),
    ("document", "doc comments", &[], 1.0, "\"\"\"|///|/\\*\\*|@param|@returns|:param "),
    ("refactor", "extraction", &[], 0.75, r"\bextends\b|\bimpl\s+\w+\s+for\b|\binterface\s+\w+|@staticmethod|\bsuper\("),
    ("implement", "python definition", &[Language::Python], 1.0, r"\bdef\s+\w+\s*\(|\bclass\s+\w+"),
    ("implement", "js definition", &[Language::JavaScript, Language::TypeScript], 1.0, r"\bfunction\s+\w+|\bconst\s+\w+\s*=\s*\(|=>|\bclass\s+\w+"),
    ("implement", "rust definition", &[Language::Rust], 1.0, r"\bfn\s+\w+|\bstruct\s+\w+|\benum\s+\w+"),
    ("implement", "generic definition", &[Language::Go, Language::Java, Language::Cpp, Language::C, Language::Unknown], 1.0, r"\bfunc\s+\w+|\bpublic\s+\w+|\bvoid\s+\w+\s*\("),
];

/// Local classifier over raw code text.
pub struct PatternAstClassifier {
    enabled: bool,
    rules: Vec<PatternRule>,
}

impl Default for PatternAstClassifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PatternAstClassifier {
    pub fn new(enabled: bool) -> Self {
        let rules = RULES
            .iter()
            .filter_map(|(label, name, languages, weight, pattern)| {
                match Regex::new(pattern) {
                    Ok(regex) => Some(PatternRule {
                        label: *label,
                        name: *name,
                        languages: *languages,
                        weight: *weight,
                        regex,
                    }),
                    Err(e) => {
                        error!(rule = name, error = %e, "invalid classifier pattern");
                        None
                    }
                }
            })
            .collect();
        Self { enabled, rules }
    }

    /// A classifier that reports itself unavailable.
    pub fn disabled() -> Self {
        Self::new(false)
    }
}

impl AstClassifier for PatternAstClassifier {
    fn classify(&self, code: &str, file_name: &str) -> Option<AstSignal> {
        if !self.enabled || code.trim().is_empty() {
            return None;
        }
        let language = detect_language(code, file_name);

        // label → (score, evidence), in first-hit order
        let mut tally: Vec<(&'static str, f64, Vec<String>)> = Vec::new();
        for rule in &self.rules {
            if !rule.languages.is_empty() && !rule.languages.contains(&language) {
                continue;
            }
            let hits = rule.regex.find_iter(code).count();
            if hits == 0 {
                continue;
            }
            let evidence = format!("{} ({hits}x)", rule.name);
            let score = rule.weight * hits as f64;
            match tally.iter_mut().find(|(l, _, _)| *l == rule.label) {
                Some(entry) => {
                    entry.1 += score;
                    entry.2.push(evidence);
                }
                None => tally.push((rule.label, score, vec![evidence])),
            }
        }

        let total: f64 = tally.iter().map(|(_, s, _)| s).sum();
        let mut best: Option<&(&'static str, f64, Vec<String>)> = None;
        for entry in &tally {
            match best {
                Some(b) if entry.1 <= b.1 => {}
                _ => best = Some(entry),
            }
        }
        let (label, score, evidence) = best?;
        if total <= 0.0 {
            return None;
        }

        let confidence = (BASE_CONFIDENCE + CONFIDENCE_SPAN * (score / total)).min(0.95);
        let mut evidence = evidence.clone();
        evidence.push(format!("language: {language}"));

        Some(AstSignal {
            primary_intent: label.to_string(),
            confidence,
            evidence,
        })
    }

    fn is_available(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "pattern-ast"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pandas_code_is_data_exploration() {
        let code = "import pandas as pd\ndf = pd.read_csv('x.csv')\nprint(df.groupby('a').sum())";
        let signal = PatternAstClassifier::default()
            .classify(code, "analysis.py")
            .unwrap();
        assert_eq!(signal.primary_intent, "data_exploration");
        assert!(signal.confidence > 0.4 && signal.confidence <= 0.95);
        assert!(signal.evidence.iter().any(|e| e == "language: python"));
    }

    #[test]
    fn test_code_is_test() {
        let code = "#[test]\nfn parses() {\n    assert_eq!(parse(\"1\"), 1);\n}";
        let signal = PatternAstClassifier::default().classify(code, "lib.rs").unwrap();
        assert_eq!(signal.primary_intent, "test");
    }

    #[test]
    fn plain_function_is_implement() {
        let code = "function login(user, password) { return auth.check(user, password); }";
        let signal = PatternAstClassifier::default().classify(code, "auth.js").unwrap();
        assert_eq!(signal.primary_intent, "implement");
    }

    #[test]
    fn empty_code_has_no_verdict() {
        assert!(PatternAstClassifier::default().classify("   ", "a.py").is_none());
    }

    #[test]
    fn disabled_classifier_is_unavailable() {
        let c = PatternAstClassifier::disabled();
        assert!(!c.is_available());
        assert!(c.classify("def f(): pass", "a.py").is_none());
    }
}
