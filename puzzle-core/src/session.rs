use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::thread_rng;

use puzzle_types::{
    Category, GuessOutcome, PuzzleDefinition, SessionSnapshot, SessionView, SnapshotError,
    GROUP_SIZE, TOTAL_ATTEMPTS,
};

use crate::events::SessionEvent;
use crate::guess::{canonical_guess_key, find_correct_category, is_one_away};

/// Result of a resolved `submit_guess` call: the outcome plus every state
/// transition the call produced, in order.
#[derive(Debug, Clone)]
pub struct SubmitResult {
    pub outcome: GuessOutcome,
    pub events: Vec<SessionEvent>,
}

/// One day's puzzle session. Owns all mutable state; every operation is a
/// synchronous command that either performs a transition and reports it,
/// or is a silent no-op when its guard fails. Once the session is over
/// the state is frozen.
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: PuzzleDefinition,
    grid_order: Vec<String>,
    selected: Vec<String>,
    solved: Vec<Category>,
    attempts_remaining: u32,
    tried_guesses: HashSet<String>,
    is_over: bool,
    is_win: Option<bool>,
}

impl Session {
    /// Start a fresh session: all sixteen words on the grid in a uniform
    /// random order (Fisher-Yates via `SliceRandom::shuffle`), full
    /// attempt budget, nothing selected, solved, or tried.
    pub fn new(puzzle: PuzzleDefinition) -> Self {
        let mut grid_order = puzzle.all_words();
        grid_order.shuffle(&mut thread_rng());

        Self {
            puzzle,
            grid_order,
            selected: Vec::new(),
            solved: Vec::new(),
            attempts_remaining: TOTAL_ATTEMPTS,
            tried_guesses: HashSet::new(),
            is_over: false,
            is_win: None,
        }
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    pub fn grid_order(&self) -> &[String] {
        &self.grid_order
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn solved(&self) -> &[Category] {
        &self.solved
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn mistakes_made(&self) -> u32 {
        TOTAL_ATTEMPTS - self.attempts_remaining
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn is_win(&self) -> Option<bool> {
        self.is_win
    }

    /// Select or deselect a word. No-op when the session is over, when
    /// the word is not on the grid, or when a 5th word is clicked while
    /// four are already selected: there is no eviction, the player must
    /// deselect explicitly first.
    pub fn toggle_word(&mut self, word: &str) -> Option<SessionEvent> {
        if self.is_over || !self.grid_order.iter().any(|w| w == word) {
            return None;
        }

        if let Some(pos) = self.selected.iter().position(|w| w == word) {
            self.selected.remove(pos);
            return Some(SessionEvent::WordToggled {
                word: word.to_string(),
                selected_now: false,
            });
        }

        if self.selected.len() >= GROUP_SIZE {
            return None;
        }

        self.selected.push(word.to_string());
        Some(SessionEvent::WordToggled {
            word: word.to_string(),
            selected_now: true,
        })
    }

    /// Drop the whole selection. Not persisted, like individual toggles.
    pub fn clear_selection(&mut self) {
        if self.is_over {
            return;
        }
        self.selected.clear();
    }

    /// Re-permute the display order of the remaining words. The selected
    /// set is unchanged; only display order moves.
    pub fn shuffle_grid(&mut self) -> Option<SessionEvent> {
        if self.is_over || self.grid_order.is_empty() {
            return None;
        }

        self.grid_order.shuffle(&mut thread_rng());
        Some(SessionEvent::GridShuffled {
            order: self.grid_order.clone(),
        })
    }

    /// Evaluate the current 4-word selection. Returns `None` when the
    /// guard fails (session over, or fewer than four words selected).
    pub fn submit_guess(&mut self) -> Option<SubmitResult> {
        if self.is_over || self.selected.len() != GROUP_SIZE {
            return None;
        }

        let record = canonical_guess_key(&self.selected);

        // An already-penalized combination costs nothing; the selection
        // stays so the player can adjust it.
        if self.tried_guesses.contains(&record) {
            let outcome = GuessOutcome::Repeated;
            return Some(SubmitResult {
                events: vec![SessionEvent::GuessResolved {
                    outcome: outcome.clone(),
                }],
                outcome,
            });
        }

        if let Some(category) =
            find_correct_category(&self.puzzle.categories, &self.solved, &self.selected).cloned()
        {
            return Some(self.resolve_correct(category));
        }

        self.resolve_incorrect(record)
    }

    fn resolve_correct(&mut self, category: Category) -> SubmitResult {
        self.grid_order.retain(|w| !category.contains_word(w));
        self.selected.clear();

        let order_index = self.insert_solved(category.clone());

        let outcome = GuessOutcome::Correct(category.clone());
        let mut events = vec![
            SessionEvent::GuessResolved {
                outcome: outcome.clone(),
            },
            SessionEvent::CategorySolved {
                category,
                order_index,
            },
        ];

        if self.solved.len() == GROUP_SIZE {
            self.is_over = true;
            self.is_win = Some(true);
            events.push(SessionEvent::GameEnded {
                is_win: true,
                mistakes: self.mistakes_made(),
            });
        }

        SubmitResult { outcome, events }
    }

    fn resolve_incorrect(&mut self, record: String) -> Option<SubmitResult> {
        self.tried_guesses.insert(record);
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);

        let outcome = if is_one_away(&self.puzzle.categories, &self.solved, &self.selected) {
            GuessOutcome::OneAway
        } else {
            GuessOutcome::Incorrect
        };

        let mut events = vec![
            SessionEvent::GuessResolved {
                outcome: outcome.clone(),
            },
            SessionEvent::AttemptsChanged {
                remaining: self.attempts_remaining,
            },
        ];

        if self.attempts_remaining == 0 {
            self.is_over = true;
            self.is_win = Some(false);
            // The reveal empties the grid, so the selection must go too
            // to keep it a subset of the grid.
            self.selected.clear();
            let revealed = self.reveal_remaining();
            events.push(SessionEvent::GameEnded {
                is_win: false,
                mistakes: self.mistakes_made(),
            });
            events.push(SessionEvent::CategoriesRevealed {
                categories: revealed,
            });
        }

        Some(SubmitResult { outcome, events })
    }

    /// Insert a category into `solved` keeping ascending difficulty order.
    fn insert_solved(&mut self, category: Category) -> usize {
        let order_index = self
            .solved
            .iter()
            .position(|c| c.difficulty > category.difficulty)
            .unwrap_or(self.solved.len());
        self.solved.insert(order_index, category);
        order_index
    }

    /// Move every still-unsolved category into `solved`, ascending by
    /// difficulty, clearing their words off the grid. Returns the newly
    /// revealed categories in reveal order.
    fn reveal_remaining(&mut self) -> Vec<Category> {
        let mut remaining: Vec<Category> = self
            .puzzle
            .categories
            .iter()
            .filter(|c| !self.solved.iter().any(|s| s.name == c.name))
            .cloned()
            .collect();
        remaining.sort_by_key(|c| c.difficulty);

        for category in &remaining {
            self.grid_order.retain(|w| !category.contains_word(w));
            self.solved.push(category.clone());
        }
        self.solved.sort_by_key(|c| c.difficulty);

        remaining
    }

    /// Serialize the session for the persistence store.
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut tried_guess_records: Vec<String> = self.tried_guesses.iter().cloned().collect();
        tried_guess_records.sort_unstable();

        SessionSnapshot {
            date_key: self.puzzle.date_key.clone(),
            attempts_remaining: self.attempts_remaining,
            solved_category_names: self.solved.iter().map(|c| c.name.clone()).collect(),
            grid_words: self.grid_order.clone(),
            tried_guess_records,
            is_over: self.is_over,
            is_win: self.is_win,
        }
    }

    /// Reconstruct a session from a persisted snapshot.
    ///
    /// The snapshot is not fully trusted: `solved` is re-derived from the
    /// puzzle by name membership and the grid is the snapshot's word list
    /// minus solved words. A lost session saved before its reveal
    /// finished re-runs the reveal here.
    pub fn restore(
        snapshot: SessionSnapshot,
        puzzle: PuzzleDefinition,
    ) -> Result<Self, SnapshotError> {
        if snapshot.date_key != puzzle.date_key {
            return Err(SnapshotError::DateKeyMismatch {
                snapshot: snapshot.date_key,
                puzzle: puzzle.date_key,
            });
        }

        let mut solved: Vec<Category> = puzzle
            .categories
            .iter()
            .filter(|c| snapshot.solved_category_names.contains(&c.name))
            .cloned()
            .collect();
        solved.sort_by_key(|c| c.difficulty);

        let grid_order: Vec<String> = snapshot
            .grid_words
            .into_iter()
            .filter(|w| !solved.iter().any(|c| c.contains_word(w)))
            .collect();

        let mut session = Self {
            puzzle,
            grid_order,
            selected: Vec::new(),
            solved,
            attempts_remaining: snapshot.attempts_remaining.min(TOTAL_ATTEMPTS),
            tried_guesses: snapshot.tried_guess_records.into_iter().collect(),
            is_over: snapshot.is_over,
            is_win: snapshot.is_win,
        };

        if session.is_over && session.is_win == Some(false) {
            session.reveal_remaining();
        }

        Ok(session)
    }

    /// Client-safe projection: solved categories are already known to the
    /// player, unsolved ones never leave the engine.
    pub fn view(&self) -> SessionView {
        SessionView {
            date_key: self.puzzle.date_key.clone(),
            grid_order: self.grid_order.clone(),
            selected: self.selected.clone(),
            solved: self.solved.clone(),
            attempts_remaining: self.attempts_remaining,
            mistakes_made: self.mistakes_made(),
            is_over: self.is_over,
            is_win: self.is_win,
        }
    }
}
