use puzzle_core::Session;
use puzzle_types::{Category, PuzzleDefinition};

/// Creates a test category from a difficulty and four words
pub fn create_category(name: &str, difficulty: i32, words: [&str; 4]) -> Category {
    Category {
        name: name.to_string(),
        words: words.iter().map(|w| w.to_string()).collect(),
        difficulty,
    }
}

/// Creates a standard four-category test puzzle
pub fn create_test_puzzle() -> PuzzleDefinition {
    PuzzleDefinition {
        date_key: "2026-08-29".to_string(),
        categories: vec![
            create_category("Fruit", 1, ["apple", "pear", "plum", "fig"]),
            create_category("Colors", 2, ["red", "blue", "green", "gold"]),
            create_category("Metals", 3, ["iron", "tin", "lead", "zinc"]),
            create_category("Tools", 4, ["saw", "awl", "file", "plane"]),
        ],
    }
}

pub fn create_test_session() -> Session {
    Session::new(create_test_puzzle())
}

/// Selects exactly the given words, clearing any prior selection
pub fn select_words(session: &mut Session, words: &[&str]) {
    session.clear_selection();
    for word in words {
        session.toggle_word(word);
    }
}
