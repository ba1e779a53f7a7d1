//! Recorded sessions and conversations shared by the integration tests.
//!
//! Fixtures live under `sessions/` next to this crate's manifest:
//! `canonical/` holds records already in canonical shape, `raw/` holds
//! miner output with mixed field spellings for the ingestion layer.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Absolute path of a fixture, relative to `sessions/`.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("sessions")
        .join(relative_path)
}

/// Raw text of a fixture.
///
/// # Panics
/// Panics with the offending path when the file can't be read.
pub fn read_fixture(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => panic!("cannot read fixture {}: {e}", path.display()),
    }
}

/// A fixture deserialized into `T`.
///
/// # Panics
/// Panics with the offending path when the file is missing or doesn't
/// match `T`.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let text = read_fixture(relative_path);
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => panic!("fixture {relative_path} does not deserialize: {e}"),
    }
}

/// JSON fixtures in one subdirectory, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(fixture_path(subdir)) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_fixtures_are_present() {
        assert!(fixture_path("canonical/login_feature.json").is_file());
        assert!(!list_fixtures("canonical").is_empty());
    }

    #[test]
    fn fixtures_parse_as_json() {
        for path in list_fixtures("canonical")
            .into_iter()
            .chain(list_fixtures("raw"))
        {
            let content = std::fs::read_to_string(&path).unwrap();
            let parsed: Result<serde_json::Value, _> = serde_json::from_str(&content);
            assert!(parsed.is_ok(), "{} is not valid JSON", path.display());
        }
    }

    #[test]
    fn missing_subdir_lists_nothing() {
        assert!(list_fixtures("does-not-exist").is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot read fixture")]
    fn missing_fixture_names_its_path() {
        read_fixture("canonical/no_such_session.json");
    }
}
