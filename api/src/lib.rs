pub mod client;
pub mod espn;
pub mod extract;
pub mod refresh;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// Game phase derived from the ESPN status name. Drives the refresh policy
/// and the post-game derivations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GamePhase {
    Scheduled,
    InProgress,
    Final,
    Postponed,
    /// No game today and no usable next event — the sentinel "OFF" state.
    Off,
    #[default]
    Unknown,
}

impl GamePhase {
    pub fn from_status_name(name: &str) -> Self {
        match name {
            "STATUS_SCHEDULED" => GamePhase::Scheduled,
            "STATUS_IN_PROGRESS" => GamePhase::InProgress,
            "STATUS_FINAL" => GamePhase::Final,
            "STATUS_POSTPONED" | "STATUS_CANCELED" | "STATUS_SUSPENDED" => GamePhase::Postponed,
            "OFF" => GamePhase::Off,
            _ => GamePhase::Unknown,
        }
    }
}

/// Fallback jersey colors when the payload carries none.
pub const DEFAULT_HOME_COLORS: [&str; 2] = ["#013369", "#013369"];
pub const DEFAULT_AWAY_COLORS: [&str; 2] = ["#D50A0A", "#D50A0A"];

/// Number of keys in the published attribute map. `attributes()` always
/// yields exactly this many, whatever the input looked like.
pub const FIELD_COUNT: usize = 92;

/// Flat, fully-defaulted snapshot of one team's game, rebuilt from scratch
/// every poll cycle. Every field that can be missing upstream is an Option;
/// serialization never skips a key, so consumers see a stable schema with
/// nulls where the payload was sparse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameState {
    /// Raw ESPN status name ("STATUS_IN_PROGRESS", ...) or the "OFF" sentinel.
    pub state: Option<String>,
    /// Scheduled first pitch, as delivered by the API.
    pub date: Option<String>,
    /// Wall-clock seconds from first pitch to the final out. Set once on the
    /// in-progress → final transition, carried forward afterwards.
    pub game_length: Option<i64>,
    /// When the final out was observed, RFC 3339.
    pub game_end_time: Option<String>,
    pub attendance: Option<u64>,
    pub event_name: Option<String>,
    pub event_short_name: Option<String>,
    pub event_type: Option<String>,
    pub game_notes: Option<String>,
    pub series_summary: Option<String>,
    pub venue_name: Option<String>,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
    pub venue_capacity: Option<u64>,
    pub venue_indoor: Option<bool>,
    pub inning: Option<u32>,
    pub inning_description: Option<String>,
    pub weather_conditions: Option<String>,
    pub weather_temp: Option<i64>,
    pub winning_pitcher: Option<String>,
    pub winning_pitcher_wins: Option<String>,
    pub winning_pitcher_losses: Option<String>,
    pub winning_pitcher_era: Option<String>,
    pub losing_pitcher: Option<String>,
    pub losing_pitcher_wins: Option<String>,
    pub losing_pitcher_losses: Option<String>,
    pub losing_pitcher_era: Option<String>,
    pub saving_pitcher: Option<String>,
    pub saving_pitcher_saves: Option<String>,
    pub game_status: Option<String>,

    pub home_team_abbr: Option<String>,
    pub home_team_id: Option<String>,
    pub home_team_city: Option<String>,
    pub home_team_name: Option<String>,
    pub home_team_color: Option<String>,
    pub home_team_alt_color: Option<String>,
    pub home_team_logo: Option<String>,
    pub home_team_runs: Option<String>,
    pub home_team_hits: Option<i64>,
    pub home_team_errors: Option<i64>,
    /// Always two entries; falls back to DEFAULT_HOME_COLORS.
    pub home_team_colors: Vec<String>,
    pub home_team_ls_1: Option<f64>,
    pub home_team_ls_2: Option<f64>,
    pub home_team_ls_3: Option<f64>,
    pub home_team_ls_4: Option<f64>,
    pub home_team_ls_5: Option<f64>,
    pub home_team_ls_6: Option<f64>,
    pub home_team_ls_7: Option<f64>,
    pub home_team_ls_8: Option<f64>,
    pub home_team_ls_9: Option<f64>,
    pub home_team_record: Option<String>,

    pub away_team_abbr: Option<String>,
    pub away_team_id: Option<String>,
    pub away_team_city: Option<String>,
    pub away_team_name: Option<String>,
    pub away_team_color: Option<String>,
    pub away_team_alt_color: Option<String>,
    pub away_team_logo: Option<String>,
    pub away_team_runs: Option<String>,
    pub away_team_hits: Option<i64>,
    pub away_team_errors: Option<i64>,
    /// Always two entries; falls back to DEFAULT_AWAY_COLORS.
    pub away_team_colors: Vec<String>,
    pub away_team_ls_1: Option<f64>,
    pub away_team_ls_2: Option<f64>,
    pub away_team_ls_3: Option<f64>,
    pub away_team_ls_4: Option<f64>,
    pub away_team_ls_5: Option<f64>,
    pub away_team_ls_6: Option<f64>,
    pub away_team_ls_7: Option<f64>,
    pub away_team_ls_8: Option<f64>,
    pub away_team_ls_9: Option<f64>,
    pub away_team_record: Option<String>,

    pub first_pitch_in: Option<String>,
    pub tv_network: Option<String>,
    pub last_play: Option<String>,
    pub balls: Option<u32>,
    pub strikes: Option<u32>,
    pub outs: Option<u32>,
    pub runner_on_1st: Option<bool>,
    pub runner_on_2nd: Option<bool>,
    pub runner_on_3rd: Option<bool>,
    pub current_batter: Option<String>,
    pub current_pitcher: Option<String>,
    pub home_team_starting_pitcher: Option<String>,
    pub away_team_starting_pitcher: Option<String>,
    pub odds: Option<String>,
    pub overunder: Option<f64>,
    pub home_team_odds_win_pct: Option<f64>,
    pub away_team_odds_win_pct: Option<f64>,
    pub headlines: Option<String>,
    pub win_or_loss: Option<String>,
    pub team_id: Option<String>,
    /// When this snapshot was produced, RFC 3339. Always set.
    pub last_update: Option<String>,
    /// True when the refresh policy picked the live cadence for this state.
    pub private_fast_refresh: bool,
}

impl GameState {
    pub fn phase(&self) -> GamePhase {
        self.state
            .as_deref()
            .map(GamePhase::from_status_name)
            .unwrap_or_default()
    }

    /// The everything-is-null state published when neither the scoreboard
    /// nor the team endpoint had anything usable.
    pub fn offline(team_id: &str, now: DateTime<Utc>) -> Self {
        GameState {
            state: Some("OFF".to_owned()),
            team_id: Some(team_id.to_owned()),
            last_update: Some(now.to_rfc3339()),
            home_team_colors: DEFAULT_HOME_COLORS.map(str::to_owned).to_vec(),
            away_team_colors: DEFAULT_AWAY_COLORS.map(str::to_owned).to_vec(),
            ..GameState::default()
        }
    }

    /// Flat attribute map as published to the presentation layer. The key
    /// set is identical for every state; absent data shows up as JSON null.
    pub fn attributes(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Parse an event timestamp. ESPN's site API usually omits seconds
/// ("2026-05-28T23:10Z"), which strict RFC 3339 parsing rejects.
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .ok()
                .map(|n| n.and_utc())
        })
}
