use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::puzzle::Category;

/// Result of submitting a 4-word guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "category")]
pub enum GuessOutcome {
    /// The selection exactly matched an unsolved category.
    Correct(Category),
    /// Wrong, and no unsolved category shared 3 of the 4 words.
    Incorrect,
    /// Wrong, but some unsolved category shared exactly 3 of the 4 words.
    OneAway,
    /// The same combination was already guessed incorrectly. Costs nothing.
    Repeated,
}

impl GuessOutcome {
    /// Repeated guesses consume no attempt and trigger no persistence.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, GuessOutcome::Repeated)
    }
}

/// The persisted form of a session, one record per date key.
///
/// Field names match the frontend's localStorage schema; `grid_words` is
/// the literal display order at save time so a restore reproduces the
/// board exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub date_key: String,
    pub attempts_remaining: u32,
    pub solved_category_names: Vec<String>,
    pub grid_words: Vec<String>,
    pub tried_guess_records: Vec<String>,
    pub is_over: bool,
    pub is_win: Option<bool>,
}

/// Client-safe projection of a session.
///
/// Only categories the player has already seen (solved or revealed on
/// loss) are included; the unsolved answer never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub date_key: String,
    pub grid_order: Vec<String>,
    pub selected: Vec<String>,
    pub solved: Vec<Category>,
    pub attempts_remaining: u32,
    pub mistakes_made: u32,
    pub is_over: bool,
    pub is_win: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_wire_format() {
        let category = Category {
            name: "Fruit".to_string(),
            words: vec!["apple".to_string()],
            difficulty: 1,
        };

        let correct = serde_json::to_value(GuessOutcome::Correct(category)).unwrap();
        assert_eq!(correct["kind"], "Correct");
        assert_eq!(correct["category"]["category"], "Fruit");

        let one_away = serde_json::to_value(GuessOutcome::OneAway).unwrap();
        assert_eq!(one_away["kind"], "OneAway");
        assert!(one_away.get("category").is_none());
    }

    #[test]
    fn test_snapshot_keys_are_camel_case() {
        let snapshot = SessionSnapshot {
            date_key: "2026-08-29".to_string(),
            attempts_remaining: 2,
            solved_category_names: vec![],
            grid_words: vec![],
            tried_guess_records: vec![],
            is_over: false,
            is_win: None,
        };

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["dateKey"], "2026-08-29");
        assert_eq!(value["attemptsRemaining"], 2);
        assert!(value.get("date_key").is_none());

        let back: SessionSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, snapshot);
    }
}
