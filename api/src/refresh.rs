//! Polling cadence rules. A pure function of the extracted state and the
//! current wall clock — the daemon feeds the result straight into its sleep.

use crate::{GamePhase, GameState, parse_event_date};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::time::Duration;

/// Live cadence, applied near first pitch and during play.
pub const FAST_INTERVAL: Duration = Duration::from_secs(5);
/// Idle cadence for everything else.
pub const SLOW_INTERVAL: Duration = Duration::from_secs(20 * 60);
/// Scheduled games start fast-polling this close to first pitch.
const FAST_WINDOW_SECS: i64 = 20 * 60;

pub fn interval_for(state: &GameState, now: DateTime<Utc>) -> Duration {
    match state.phase() {
        GamePhase::InProgress => FAST_INTERVAL,
        GamePhase::Scheduled if starts_within_window(state, now) => FAST_INTERVAL,
        _ => SLOW_INTERVAL,
    }
}

pub fn is_fast(state: &GameState, now: DateTime<Utc>) -> bool {
    interval_for(state, now) == FAST_INTERVAL
}

/// True once first pitch is less than the window away — or already past,
/// which covers a game stuck in "scheduled" through a late start.
fn starts_within_window(state: &GameState, now: DateTime<Utc>) -> bool {
    state
        .date
        .as_deref()
        .and_then(parse_event_date)
        .is_some_and(|start| start - now < ChronoDuration::seconds(FAST_WINDOW_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn state_with(state: &str, date: Option<&str>) -> GameState {
        GameState {
            state: Some(state.to_owned()),
            date: date.map(str::to_owned),
            ..GameState::default()
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn live_games_poll_fast() {
        let state = state_with("STATUS_IN_PROGRESS", None);
        assert_eq!(interval_for(&state, noon()), FAST_INTERVAL);
    }

    #[test]
    fn scheduled_games_poll_fast_near_first_pitch() {
        // 10 minutes out.
        let state = state_with("STATUS_SCHEDULED", Some("2026-05-28T12:10Z"));
        assert_eq!(interval_for(&state, noon()), FAST_INTERVAL);

        // First pitch time already passed but the status hasn't flipped yet.
        let state = state_with("STATUS_SCHEDULED", Some("2026-05-28T11:55Z"));
        assert_eq!(interval_for(&state, noon()), FAST_INTERVAL);
    }

    #[test]
    fn scheduled_games_poll_slow_far_from_first_pitch() {
        // 2 hours out.
        let state = state_with("STATUS_SCHEDULED", Some("2026-05-28T14:00Z"));
        assert_eq!(interval_for(&state, noon()), SLOW_INTERVAL);

        // No usable date at all.
        let state = state_with("STATUS_SCHEDULED", None);
        assert_eq!(interval_for(&state, noon()), SLOW_INTERVAL);
    }

    #[test]
    fn finished_and_idle_states_poll_slow() {
        for name in ["STATUS_FINAL", "OFF", "STATUS_POSTPONED", "STATUS_RAIN_DELAY"] {
            let state = state_with(name, Some("2026-05-28T12:05Z"));
            assert_eq!(interval_for(&state, noon()), SLOW_INTERVAL, "state {name}");
        }
    }
}
