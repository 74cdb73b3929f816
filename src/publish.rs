use log::{info, warn};
use mlb_api::GameState;
use tokio::sync::mpsc;

/// Presentation seam. Each fresh state goes out as one JSON object per line
/// on stdout — `state` is the headline value, everything else rides along as
/// attributes with a stable key set.
pub struct Publisher {
    name: String,
    updates: mpsc::Receiver<GameState>,
}

impl Publisher {
    pub fn new(name: String, updates: mpsc::Receiver<GameState>) -> Self {
        Self { name, updates }
    }

    pub async fn run(mut self) {
        while let Some(state) = self.updates.recv().await {
            info!(
                "{}: {} — {}",
                self.name,
                state.state.as_deref().unwrap_or("UNKNOWN"),
                state.event_short_name.as_deref().unwrap_or("no event"),
            );
            match serde_json::to_string(&state) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!("could not serialize state: {e}"),
            }
        }
    }
}
