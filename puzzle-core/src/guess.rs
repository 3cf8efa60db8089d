use puzzle_types::{Category, GROUP_SIZE};

/// Canonical identifier for a 4-word selection: the words sorted
/// lexicographically and joined with commas. Guarantees order
/// independence for repeat-guess detection.
pub fn canonical_guess_key(selection: &[String]) -> String {
    let mut words: Vec<&str> = selection.iter().map(String::as_str).collect();
    words.sort_unstable();
    words.join(",")
}

/// Find the unsolved category whose word set exactly equals the selection.
///
/// A selection can match at most one category since word sets are disjoint
/// by construction.
pub fn find_correct_category<'a>(
    categories: &'a [Category],
    solved: &[Category],
    selection: &[String],
) -> Option<&'a Category> {
    categories.iter().find(|category| {
        !solved.iter().any(|s| s.name == category.name)
            && category.words.len() == selection.len()
            && category.words.iter().all(|w| selection.contains(w))
    })
}

/// True when some unsolved category contains exactly 3 of the 4 selected
/// words ("one away").
pub fn is_one_away(categories: &[Category], solved: &[Category], selection: &[String]) -> bool {
    categories
        .iter()
        .filter(|category| !solved.iter().any(|s| s.name == category.name))
        .any(|category| category.overlap(selection) == GROUP_SIZE - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: [&str; 4]) -> Vec<String> {
        items.iter().map(|w| w.to_string()).collect()
    }

    fn category(name: &str, items: [&str; 4], difficulty: i32) -> Category {
        Category {
            name: name.to_string(),
            words: words(items),
            difficulty,
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            category("Fruit", ["apple", "pear", "plum", "fig"], 1),
            category("Colors", ["red", "blue", "green", "gold"], 2),
            category("Metals", ["iron", "tin", "lead", "zinc"], 3),
            category("Tools", ["saw", "awl", "file", "plane"], 4),
        ]
    }

    #[test]
    fn test_canonical_key_is_order_independent() {
        let forwards = words(["apple", "pear", "plum", "fig"]);
        let backwards = words(["fig", "plum", "pear", "apple"]);
        let scrambled = words(["plum", "apple", "fig", "pear"]);

        let key = canonical_guess_key(&forwards);
        assert_eq!(key, canonical_guess_key(&backwards));
        assert_eq!(key, canonical_guess_key(&scrambled));
        assert_eq!(key, "apple,fig,pear,plum");
    }

    #[test]
    fn test_distinct_selections_have_distinct_keys() {
        let a = canonical_guess_key(&words(["apple", "pear", "plum", "fig"]));
        let b = canonical_guess_key(&words(["apple", "pear", "plum", "red"]));
        assert_ne!(a, b);
    }

    #[test]
    fn test_find_correct_category() {
        let cats = categories();
        let hit = find_correct_category(&cats, &[], &words(["gold", "red", "green", "blue"]));
        assert_eq!(hit.map(|c| c.name.as_str()), Some("Colors"));

        let miss = find_correct_category(&cats, &[], &words(["gold", "red", "green", "fig"]));
        assert!(miss.is_none());
    }

    #[test]
    fn test_solved_category_never_matches_again() {
        let cats = categories();
        let solved = vec![cats[1].clone()];
        let hit = find_correct_category(&cats, &solved, &words(["red", "blue", "green", "gold"]));
        assert!(hit.is_none());
    }

    #[test]
    fn test_one_away_detection() {
        let cats = categories();
        assert!(is_one_away(&cats, &[], &words(["red", "blue", "green", "fig"])));
        assert!(!is_one_away(&cats, &[], &words(["red", "blue", "iron", "fig"])));
    }

    #[test]
    fn test_one_away_ignores_solved_categories() {
        let cats = categories();
        let solved = vec![cats[1].clone()];
        // Three Colors words, but Colors is already solved.
        assert!(!is_one_away(&cats, &solved, &words(["red", "blue", "green", "fig"])));
    }
}
