use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of categories per puzzle and words per category.
pub const GROUP_SIZE: usize = 4;
/// Incorrect guesses allowed before the session is lost.
pub const TOTAL_ATTEMPTS: u32 = 4;

/// A named group of exactly four words with a difficulty rank.
///
/// Categories are sourced externally and never mutated by the engine.
/// Word sets across the four categories of a puzzle are assumed to be
/// pairwise disjoint; the engine does not defend against a provider
/// that violates this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[serde(rename = "category")]
    pub name: String,
    pub words: Vec<String>,
    pub difficulty: i32,
}

impl Category {
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// How many of the given words belong to this category.
    pub fn overlap(&self, words: &[String]) -> usize {
        words.iter().filter(|w| self.contains_word(w)).count()
    }
}

/// The fixed puzzle for one calendar date: four categories, sixteen words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDefinition {
    pub date_key: String,
    pub categories: Vec<Category>,
}

impl PuzzleDefinition {
    /// Structural validity predicate for provider entries: exactly 4
    /// groups, each with a non-empty name, exactly 4 distinct words, and
    /// a numeric difficulty (guaranteed by the type).
    pub fn is_valid(categories: &[Category]) -> bool {
        categories.len() == GROUP_SIZE
            && categories.iter().all(|c| {
                !c.name.is_empty()
                    && c.words.len() == GROUP_SIZE
                    && c.words
                        .iter()
                        .all(|w| c.words.iter().filter(|o| *o == w).count() == 1)
            })
    }

    /// All sixteen words of the puzzle, in category order.
    pub fn all_words(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|c| c.words.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, words: [&str; 4]) -> Category {
        Category {
            name: name.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            difficulty: 1,
        }
    }

    #[test]
    fn test_validity_predicate() {
        let good = vec![
            category("A", ["a1", "a2", "a3", "a4"]),
            category("B", ["b1", "b2", "b3", "b4"]),
            category("C", ["c1", "c2", "c3", "c4"]),
            category("D", ["d1", "d2", "d3", "d4"]),
        ];
        assert!(PuzzleDefinition::is_valid(&good));

        // Wrong group count
        assert!(!PuzzleDefinition::is_valid(&good[..3]));

        // Empty category name
        let mut bad = good.clone();
        bad[0].name = String::new();
        assert!(!PuzzleDefinition::is_valid(&bad));

        // Wrong word count
        let mut bad = good.clone();
        bad[1].words.pop();
        assert!(!PuzzleDefinition::is_valid(&bad));

        // Duplicate word within a category
        let mut bad = good;
        bad[2].words[3] = bad[2].words[0].clone();
        assert!(!PuzzleDefinition::is_valid(&bad));
    }

    #[test]
    fn test_overlap() {
        let cat = category("Fruit", ["apple", "pear", "plum", "fig"]);
        let guess: Vec<String> = ["apple", "pear", "plum", "red"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        assert_eq!(cat.overlap(&guess), 3);
        assert!(cat.contains_word("fig"));
        assert!(!cat.contains_word("red"));
    }

    #[test]
    fn test_all_words() {
        let puzzle = PuzzleDefinition {
            date_key: "2026-01-01".to_string(),
            categories: vec![
                category("A", ["a1", "a2", "a3", "a4"]),
                category("B", ["b1", "b2", "b3", "b4"]),
                category("C", ["c1", "c2", "c3", "c4"]),
                category("D", ["d1", "d2", "d3", "d4"]),
            ],
        };
        assert_eq!(puzzle.all_words().len(), 16);
    }
}
