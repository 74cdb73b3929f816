use anyhow::{Result, bail};
use std::time::Duration;

const DEFAULT_NAME: &str = "MLB";
const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Daemon configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Team abbreviation as ESPN spells it, e.g. "NYM".
    pub team_id: String,
    /// Display name used in log lines.
    pub name: String,
    /// Whole-cycle budget; a cycle that overruns counts as a failed update.
    pub timeout: Duration,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let team_id = match std::env::var("MLBRIDGE_TEAM") {
            Ok(v) if !v.trim().is_empty() => v.trim().to_uppercase(),
            _ => bail!("MLBRIDGE_TEAM must be set to a team abbreviation, e.g. NYM"),
        };
        let name = std::env::var("MLBRIDGE_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_owned());
        let timeout = std::env::var("MLBRIDGE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Ok(Self { team_id, name, timeout })
    }
}
