use std::collections::HashMap;
use std::path::PathBuf;

use puzzle_types::{Category, LoadError, PuzzleDefinition};

/// Source of puzzle definitions: a JSON document mapping `YYYY-MM-DD`
/// date keys to an array of four `{ category, words, difficulty }`
/// groups.
///
/// The file is re-read on every lookup so a newly published puzzle file
/// is picked up without a restart. Lookups happen once per session load,
/// so this is cheap.
pub struct PuzzleProvider {
    source: ProviderSource,
}

enum ProviderSource {
    File(PathBuf),
    Inline(String),
}

impl PuzzleProvider {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ProviderSource::File(path.into()),
        }
    }

    pub fn from_json(raw: impl Into<String>) -> Self {
        Self {
            source: ProviderSource::Inline(raw.into()),
        }
    }

    /// Look up the puzzle for a date key, applying the structural
    /// validity predicate. A missing or invalid entry is
    /// `NoPuzzleForToday`; an unreadable or unparseable source is
    /// `ProviderUnavailable`.
    pub fn puzzle_for(&self, date_key: &str) -> Result<PuzzleDefinition, LoadError> {
        let raw = match &self.source {
            ProviderSource::File(path) => std::fs::read_to_string(path)
                .map_err(|err| LoadError::ProviderUnavailable(err.to_string()))?,
            ProviderSource::Inline(raw) => raw.clone(),
        };

        let puzzles: HashMap<String, Vec<Category>> = serde_json::from_str(&raw)
            .map_err(|err| LoadError::ProviderUnavailable(err.to_string()))?;

        match puzzles.get(date_key) {
            Some(groups) if PuzzleDefinition::is_valid(groups) => Ok(PuzzleDefinition {
                date_key: date_key.to_string(),
                categories: groups.clone(),
            }),
            _ => Err(LoadError::NoPuzzleForToday(date_key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "2026-08-29": [
            { "category": "Fruit", "words": ["apple", "pear", "plum", "fig"], "difficulty": 1 },
            { "category": "Colors", "words": ["red", "blue", "green", "gold"], "difficulty": 2 },
            { "category": "Metals", "words": ["iron", "tin", "lead", "zinc"], "difficulty": 3 },
            { "category": "Tools", "words": ["saw", "awl", "file", "plane"], "difficulty": 4 }
        ],
        "2026-08-30": [
            { "category": "Broken", "words": ["only", "three", "words"], "difficulty": 1 }
        ]
    }"#;

    #[test]
    fn test_lookup_by_date_key() {
        let provider = PuzzleProvider::from_json(FIXTURE);
        let puzzle = provider.puzzle_for("2026-08-29").unwrap();
        assert_eq!(puzzle.date_key, "2026-08-29");
        assert_eq!(puzzle.categories.len(), 4);
        assert_eq!(puzzle.categories[0].name, "Fruit");
    }

    #[test]
    fn test_missing_date_is_no_puzzle() {
        let provider = PuzzleProvider::from_json(FIXTURE);
        let err = provider.puzzle_for("2026-09-01").unwrap_err();
        assert!(matches!(err, LoadError::NoPuzzleForToday(_)));
    }

    #[test]
    fn test_structurally_invalid_entry_is_no_puzzle() {
        let provider = PuzzleProvider::from_json(FIXTURE);
        let err = provider.puzzle_for("2026-08-30").unwrap_err();
        assert!(matches!(err, LoadError::NoPuzzleForToday(_)));
    }

    #[test]
    fn test_unparseable_source_is_unavailable() {
        let provider = PuzzleProvider::from_json("{not json");
        let err = provider.puzzle_for("2026-08-29").unwrap_err();
        assert!(matches!(err, LoadError::ProviderUnavailable(_)));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let provider = PuzzleProvider::from_file("/nonexistent/puzzles.json");
        let err = provider.puzzle_for("2026-08-29").unwrap_err();
        assert!(matches!(err, LoadError::ProviderUnavailable(_)));
    }
}
