use puzzle_types::{Category, GuessOutcome};

/// Notification of a completed state transition. The presentation layer
/// reacts to these; it never feeds information back into the engine
/// except through the defined operations on `Session`.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    WordToggled {
        word: String,
        selected_now: bool,
    },
    GuessResolved {
        outcome: GuessOutcome,
    },
    CategorySolved {
        category: Category,
        order_index: usize,
    },
    AttemptsChanged {
        remaining: u32,
    },
    GameEnded {
        is_win: bool,
        mistakes: u32,
    },
    CategoriesRevealed {
        categories: Vec<Category>,
    },
    GridShuffled {
        order: Vec<String>,
    },
}

impl SessionEvent {
    /// Short stable name, used for logging and analytics labels.
    pub fn label(&self) -> &'static str {
        match self {
            SessionEvent::WordToggled { .. } => "word_toggled",
            SessionEvent::GuessResolved { .. } => "guess_resolved",
            SessionEvent::CategorySolved { .. } => "category_solved",
            SessionEvent::AttemptsChanged { .. } => "attempts_changed",
            SessionEvent::GameEnded { .. } => "game_ended",
            SessionEvent::CategoriesRevealed { .. } => "categories_revealed",
            SessionEvent::GridShuffled { .. } => "grid_shuffled",
        }
    }
}

/// Event handler trait for consumers of session events
pub trait SessionEventHandler {
    fn handle_event(&mut self, date_key: &str, event: &SessionEvent);
}

/// Simple event bus for distributing session events
pub struct SessionEventBus {
    handlers: Vec<Box<dyn SessionEventHandler + Send>>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, date_key: &str, event: &SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(date_key, event);
        }
    }

    pub fn publish_all(&mut self, date_key: &str, events: &[SessionEvent]) {
        for event in events {
            self.publish(date_key, event);
        }
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingHandler {
        labels: Arc<Mutex<Vec<String>>>,
    }

    impl SessionEventHandler for RecordingHandler {
        fn handle_event(&mut self, date_key: &str, event: &SessionEvent) {
            self.labels
                .lock()
                .unwrap()
                .push(format!("{date_key}:{}", event.label()));
        }
    }

    #[test]
    fn test_bus_delivers_to_all_handlers() {
        let labels = Arc::new(Mutex::new(Vec::new()));
        let mut bus = SessionEventBus::new();
        bus.add_handler(Box::new(RecordingHandler {
            labels: labels.clone(),
        }));
        bus.add_handler(Box::new(RecordingHandler {
            labels: labels.clone(),
        }));

        bus.publish_all(
            "2026-01-01",
            &[
                SessionEvent::AttemptsChanged { remaining: 3 },
                SessionEvent::GameEnded {
                    is_win: false,
                    mistakes: 4,
                },
            ],
        );

        let seen = labels.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0], "2026-01-01:attempts_changed");
        assert_eq!(seen[3], "2026-01-01:game_ended");
    }
}
