use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::analytics::AnalyticsReporter;
use crate::provider::PuzzleProvider;
use puzzle_core::{Session, SessionEvent, SessionEventBus, SessionEventHandler};
use puzzle_persistence::SnapshotRepository;
use puzzle_types::{GuessOutcome, LoadError, SessionSnapshot, SessionView};

/// Local calendar date key, `YYYY-MM-DD`. A new calendar day selects a
/// new session.
pub fn today_key() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Owner of live sessions, keyed by date key. All engine calls happen
/// sequentially under the write lock, so the engine never sees
/// concurrent mutation; persistence is best-effort and never blocks
/// play.
pub struct SessionManager {
    provider: PuzzleProvider,
    snapshots: Arc<SnapshotRepository>,
    sessions: RwLock<HashMap<String, Session>>,
    event_bus: Mutex<SessionEventBus>,
    analytics: AnalyticsReporter,
}

impl SessionManager {
    pub fn new(
        provider: PuzzleProvider,
        snapshots: Arc<SnapshotRepository>,
        analytics: AnalyticsReporter,
    ) -> Self {
        Self {
            provider,
            snapshots,
            sessions: RwLock::new(HashMap::new()),
            event_bus: Mutex::new(SessionEventBus::new()),
            analytics,
        }
    }

    pub async fn add_event_handler(&self, handler: Box<dyn SessionEventHandler + Send>) {
        self.event_bus.lock().await.add_handler(handler);
    }

    /// Today's session state, creating or restoring the session on first
    /// touch.
    pub async fn session_view(&self, date_key: &str) -> Result<SessionView, LoadError> {
        let mut sessions = self.sessions.write().await;
        let session = self.ensure_session(&mut sessions, date_key).await?;
        Ok(session.view())
    }

    pub async fn toggle_word(&self, date_key: &str, word: &str) -> Result<SessionView, LoadError> {
        let mut sessions = self.sessions.write().await;
        let session = self.ensure_session(&mut sessions, date_key).await?;

        let event = session.toggle_word(word);
        let view = session.view();
        drop(sessions);

        if let Some(event) = event {
            self.publish(date_key, std::slice::from_ref(&event)).await;
        }
        Ok(view)
    }

    /// Evaluate the current selection. `None` outcome means the guard
    /// failed (fewer than four words selected, or the session is over).
    pub async fn submit_guess(
        &self,
        date_key: &str,
    ) -> Result<(Option<GuessOutcome>, SessionView), LoadError> {
        let mut sessions = self.sessions.write().await;
        let session = self.ensure_session(&mut sessions, date_key).await?;

        let Some(result) = session.submit_guess() else {
            return Ok((None, session.view()));
        };

        // Repeated guesses change nothing and are not written back.
        let snapshot = result.outcome.is_resolved().then(|| session.snapshot());
        let view = session.view();
        drop(sessions);

        if let Some(snapshot) = snapshot {
            self.persist(&snapshot).await;
        }
        self.publish(date_key, &result.events).await;

        Ok((Some(result.outcome), view))
    }

    pub async fn shuffle(&self, date_key: &str) -> Result<SessionView, LoadError> {
        let mut sessions = self.sessions.write().await;
        let session = self.ensure_session(&mut sessions, date_key).await?;

        let event = session.shuffle_grid();
        let snapshot = event.is_some().then(|| session.snapshot());
        let view = session.view();
        drop(sessions);

        if let Some(snapshot) = snapshot {
            self.persist(&snapshot).await;
        }
        if let Some(event) = event {
            self.publish(date_key, std::slice::from_ref(&event)).await;
        }
        Ok(view)
    }

    /// Selection changes are not persisted; only guesses and shuffles
    /// are.
    pub async fn clear_selection(&self, date_key: &str) -> Result<SessionView, LoadError> {
        let mut sessions = self.sessions.write().await;
        let session = self.ensure_session(&mut sessions, date_key).await?;
        session.clear_selection();
        Ok(session.view())
    }

    async fn ensure_session<'a>(
        &self,
        sessions: &'a mut HashMap<String, Session>,
        date_key: &str,
    ) -> Result<&'a mut Session, LoadError> {
        if !sessions.contains_key(date_key) {
            // Day rollover: sessions for past dates are dead weight.
            sessions.retain(|key, _| key == date_key);

            let session = self.load_session(date_key).await?;
            if !session.is_over() {
                self.analytics.session_loaded(date_key);
            }
            sessions.insert(date_key.to_string(), session);
        }

        Ok(sessions
            .get_mut(date_key)
            .expect("session was just ensured"))
    }

    async fn load_session(&self, date_key: &str) -> Result<Session, LoadError> {
        let puzzle = self.provider.puzzle_for(date_key)?;

        if let Some(snapshot) = self.read_snapshot(date_key).await {
            let solved_before = snapshot.solved_category_names.len();
            match Session::restore(snapshot, puzzle.clone()) {
                Ok(session) => {
                    info!(date_key, "restored session from snapshot");
                    // A restore that completed an interrupted reveal owes
                    // a write of the final state.
                    if session.solved().len() != solved_before {
                        self.persist(&session.snapshot()).await;
                    }
                    return Ok(session);
                }
                Err(err) => {
                    warn!(date_key, %err, "snapshot rejected; starting fresh");
                }
            }
        }

        let session = Session::new(puzzle);
        self.persist(&session.snapshot()).await;
        Ok(session)
    }

    async fn read_snapshot(&self, date_key: &str) -> Option<SessionSnapshot> {
        match self.snapshots.find_by_date(date_key).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(date_key, %err, "snapshot read failed; starting fresh");
                None
            }
        }
    }

    async fn persist(&self, snapshot: &SessionSnapshot) {
        if let Err(err) = self.snapshots.save(snapshot).await {
            warn!(
                date_key = %snapshot.date_key,
                %err,
                "snapshot write failed; continuing from in-memory state"
            );
        }
    }

    async fn publish(&self, date_key: &str, events: &[SessionEvent]) {
        self.event_bus.lock().await.publish_all(date_key, events);
    }
}
