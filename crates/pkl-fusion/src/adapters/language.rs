//! Heuristic source-language detection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    Cpp,
    C,
    Unknown,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Go => "go",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File extension first, then content markers.
pub fn detect_language(content: &str, file_name: &str) -> Language {
    let ext = file_name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("rs") => return Language::Rust,
        Some("js" | "jsx" | "mjs") => return Language::JavaScript,
        Some("ts" | "tsx") => return Language::TypeScript,
        Some("py" | "ipynb") => return Language::Python,
        Some("go") => return Language::Go,
        Some("java") => return Language::Java,
        Some("cpp" | "cc" | "cxx" | "hpp") => return Language::Cpp,
        Some("c" | "h") => return Language::C,
        _ => {}
    }

    if content.contains("fn main()") || content.contains("impl ") {
        Language::Rust
    } else if content.contains("def ") || (content.contains("import ") && content.contains(" as ")) {
        Language::Python
    } else if content.contains("function ") || content.contains("const ") || content.contains("=>") {
        Language::JavaScript
    } else if content.contains("package main") {
        Language::Go
    } else {
        Language::Unknown
    }
}
