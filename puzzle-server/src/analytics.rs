use puzzle_core::{SessionEvent, SessionEventHandler};
use tracing::{debug, warn};

/// Fire-and-forget lifecycle pings: `game_load_today` when a playable
/// session is created or restored, `game_win`/`game_loss` (with the
/// mistake count) when it ends.
///
/// With an endpoint configured each ping is a detached POST whose
/// failure is logged and ignored; without one it degrades to a debug
/// log line. Nothing here may block or fail the game.
#[derive(Clone)]
pub struct AnalyticsReporter {
    endpoint: Option<String>,
    client: reqwest::Client,
}

impl AnalyticsReporter {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn session_loaded(&self, date_key: &str) {
        self.report("game_load_today", date_key, None);
    }

    fn report(&self, event_name: &str, date_key: &str, value: Option<u32>) {
        let Some(endpoint) = self.endpoint.clone() else {
            debug!(event_name, date_key, "analytics event (no endpoint configured)");
            return;
        };

        let client = self.client.clone();
        let body = serde_json::json!({
            "event": event_name,
            "event_category": "Game",
            "event_label": date_key,
            "value": value,
        });

        tokio::spawn(async move {
            if let Err(err) = client.post(&endpoint).json(&body).send().await {
                warn!(%err, "analytics ping failed");
            }
        });
    }
}

impl SessionEventHandler for AnalyticsReporter {
    fn handle_event(&mut self, date_key: &str, event: &SessionEvent) {
        if let SessionEvent::GameEnded { is_win, mistakes } = event {
            let name = if *is_win { "game_win" } else { "game_loss" };
            self.report(name, date_key, Some(*mistakes));
        }
    }
}
