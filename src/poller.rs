use crate::settings::Settings;
use chrono::Utc;
use log::{debug, error};
use mlb_api::client::MlbApi;
use mlb_api::{GameState, refresh};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Timer-driven poll loop. One cycle in flight at a time; a failed cycle
/// keeps the previous good state, which is also the prior snapshot handed
/// into the next extraction for the game-length stopwatch.
pub struct Poller {
    api: MlbApi,
    settings: Settings,
    updates: mpsc::Sender<GameState>,
}

impl Poller {
    pub fn new(settings: Settings, updates: mpsc::Sender<GameState>) -> Self {
        Self { api: MlbApi::new(), settings, updates }
    }

    pub async fn run(self) {
        let mut prior: Option<GameState> = None;
        loop {
            let interval = match self.cycle(prior.as_ref()).await {
                Ok(state) => {
                    let interval = refresh::interval_for(&state, Utc::now());
                    if self.updates.send(state.clone()).await.is_err() {
                        break; // publisher is gone, nothing left to do
                    }
                    prior = Some(state);
                    interval
                }
                Err(message) => {
                    error!("update failed: {message}; keeping previous state");
                    // Retry at whatever cadence the last good state called for.
                    prior
                        .as_ref()
                        .map(|s| refresh::interval_for(s, Utc::now()))
                        .unwrap_or(refresh::SLOW_INTERVAL)
                }
            };
            debug!("next poll in {interval:?}");
            tokio::time::sleep(interval).await;
        }
    }

    async fn cycle(&self, prior: Option<&GameState>) -> Result<GameState, String> {
        let now = Utc::now();
        debug!("polling game state for {}", self.settings.team_id);
        match timeout(
            self.settings.timeout,
            self.api.fetch_game_state(&self.settings.team_id, prior, now),
        )
        .await
        {
            Ok(Ok(state)) => Ok(state),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("cycle timed out after {:?}", self.settings.timeout)),
        }
    }
}
