//! Scoreboard → `GameState` extraction. Pure and synchronous; the client
//! decides which payloads to fetch, this module only shapes them.

use crate::espn::{
    EspnCompetition, EspnCompetitor, EspnEvent, EspnFeaturedAthlete, EspnSituationRole,
    EspnTeamDetail, ScoreboardResponse,
};
use crate::refresh;
use crate::{
    DEFAULT_AWAY_COLORS, DEFAULT_HOME_COLORS, GamePhase, GameState, parse_event_date,
};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Home,
    Away,
}

/// Locate the configured team's event on today's scoreboard and flatten it.
/// Returns None when the team is not on the board at all (off day or
/// postseason gap) so the caller can fall back to the team endpoint.
pub fn from_scoreboard(
    scoreboard: &ScoreboardResponse,
    team_id: &str,
    prior: Option<&GameState>,
    now: DateTime<Utc>,
) -> Option<GameState> {
    let events = scoreboard.events.as_deref()?;
    let event = events
        .iter()
        .find(|e| e.short_name.as_deref().is_some_and(|s| s.contains(team_id)))?;
    Some(map_event(event, team_id, prior, now))
}

fn map_event(
    event: &EspnEvent,
    team_id: &str,
    prior: Option<&GameState>,
    now: DateTime<Utc>,
) -> GameState {
    let comp = event.competition();
    let competitors = comp.and_then(|c| c.competitors.as_deref()).unwrap_or_default();
    let home = scoreboard_team_block(competitors.first(), Side::Home);
    let away = scoreboard_team_block(competitors.get(1), Side::Away);
    let team_is_home = competitors.first().and_then(|c| c.abbreviation()) == Some(team_id);

    let state = event.status_type().and_then(|t| t.name.clone());
    let phase = state.as_deref().map(GamePhase::from_status_name).unwrap_or_default();
    let comp_status = comp.and_then(|c| c.status.as_ref());
    let situation = comp.and_then(|c| c.situation.as_ref());
    let odds = comp.and_then(|c| c.odds.as_deref()).unwrap_or_default();
    let venue = comp.and_then(|c| c.venue.as_ref());
    let (game_length, game_end_time) = game_clock(prior, phase, event.date.as_deref(), now);

    let mut gs = GameState {
        state,
        date: event.date.clone(),
        game_length,
        game_end_time,
        attendance: comp.and_then(|c| c.attendance),
        event_name: event.name.clone(),
        event_short_name: event.short_name.clone(),
        event_type: comp
            .and_then(|c| c.comp_type.as_ref())
            .and_then(|t| t.abbreviation.clone()),
        game_notes: first_note(comp),
        series_summary: comp.and_then(|c| c.series.as_ref()).and_then(|s| s.summary.clone()),
        venue_name: venue.and_then(|v| v.full_name.clone()),
        venue_city: venue.and_then(|v| v.address.as_ref()).and_then(|a| a.city.clone()),
        venue_state: venue.and_then(|v| v.address.as_ref()).and_then(|a| a.state.clone()),
        venue_capacity: venue.and_then(|v| v.capacity),
        venue_indoor: venue.and_then(|v| v.indoor),
        inning: comp_status.and_then(|s| s.period),
        inning_description: comp_status
            .and_then(|s| s.status_type.as_ref())
            .and_then(|t| t.short_detail.clone()),
        weather_conditions: event.weather.as_ref().and_then(|w| w.display_value.clone()),
        weather_temp: event.weather.as_ref().and_then(|w| w.temperature),
        game_status: event.status_type().and_then(|t| t.short_detail.clone()),

        home_team_abbr: home.abbr,
        home_team_id: home.id,
        home_team_city: home.city,
        home_team_name: home.name,
        home_team_color: home.color,
        home_team_alt_color: home.alt_color,
        home_team_logo: home.logo,
        home_team_runs: home.runs,
        home_team_hits: home.hits,
        home_team_errors: home.errors,
        home_team_colors: home.colors,
        home_team_ls_1: home.linescores[0],
        home_team_ls_2: home.linescores[1],
        home_team_ls_3: home.linescores[2],
        home_team_ls_4: home.linescores[3],
        home_team_ls_5: home.linescores[4],
        home_team_ls_6: home.linescores[5],
        home_team_ls_7: home.linescores[6],
        home_team_ls_8: home.linescores[7],
        home_team_ls_9: home.linescores[8],
        home_team_record: home.record,

        away_team_abbr: away.abbr,
        away_team_id: away.id,
        away_team_city: away.city,
        away_team_name: away.name,
        away_team_color: away.color,
        away_team_alt_color: away.alt_color,
        away_team_logo: away.logo,
        away_team_runs: away.runs,
        away_team_hits: away.hits,
        away_team_errors: away.errors,
        away_team_colors: away.colors,
        away_team_ls_1: away.linescores[0],
        away_team_ls_2: away.linescores[1],
        away_team_ls_3: away.linescores[2],
        away_team_ls_4: away.linescores[3],
        away_team_ls_5: away.linescores[4],
        away_team_ls_6: away.linescores[5],
        away_team_ls_7: away.linescores[6],
        away_team_ls_8: away.linescores[7],
        away_team_ls_9: away.linescores[8],
        away_team_record: away.record,

        first_pitch_in: event
            .date
            .as_deref()
            .and_then(parse_event_date)
            .map(|start| humanize_delta(start - now)),
        tv_network: broadcast_names(comp),
        last_play: situation
            .and_then(|s| s.last_play.as_ref())
            .and_then(|p| p.text.clone()),
        balls: situation.and_then(|s| s.balls),
        strikes: situation.and_then(|s| s.strikes),
        outs: situation.and_then(|s| s.outs),
        runner_on_1st: situation.and_then(|s| s.on_first),
        runner_on_2nd: situation.and_then(|s| s.on_second),
        runner_on_3rd: situation.and_then(|s| s.on_third),
        current_batter: situation.and_then(|s| s.batter.as_ref()).and_then(role_athlete),
        current_pitcher: situation.and_then(|s| s.pitcher.as_ref()).and_then(role_athlete),
        home_team_starting_pitcher: home.starting_pitcher,
        away_team_starting_pitcher: away.starting_pitcher,
        odds: odds.first().and_then(|o| o.details.clone()),
        overunder: odds.first().and_then(|o| o.over_under),
        home_team_odds_win_pct: odds
            .get(1)
            .and_then(|o| o.home_team_odds.as_ref())
            .and_then(|t| t.win_percentage),
        away_team_odds_win_pct: odds
            .get(1)
            .and_then(|o| o.away_team_odds.as_ref())
            .and_then(|t| t.win_percentage),
        headlines: comp
            .and_then(|c| c.headlines.as_ref())
            .and_then(|h| h.first())
            .and_then(|h| h.short_link_text.clone()),
        team_id: Some(team_id.to_owned()),
        last_update: Some(now.to_rfc3339()),
        ..GameState::default()
    };

    if phase == GamePhase::Final {
        let featured = comp_status
            .and_then(|s| s.featured_athletes.as_deref())
            .unwrap_or_default();
        fill_pitchers_of_record(&mut gs, featured);
        gs.win_or_loss =
            decide_win_or_loss(gs.home_team_runs.as_deref(), gs.away_team_runs.as_deref(), team_is_home);
    }
    if phase == GamePhase::Postponed {
        // Postponements put the explanation in the competition notes.
        gs.headlines = first_note(comp);
    }
    gs.private_fast_refresh = refresh::is_fast(&gs, now);
    gs
}

/// Flatten a team-endpoint lookup into a pre-game state. `team` is the
/// configured team's lookup, `oppo` the opponent's; colors and records are
/// assigned to home/away by matching each lookup to its side in the next
/// event. Returns None when the endpoint lists no next event.
pub fn from_team_lookup(
    team: &EspnTeamDetail,
    oppo: Option<&EspnTeamDetail>,
    team_id: &str,
    now: DateTime<Utc>,
) -> Option<GameState> {
    let next = team.next_event.as_ref()?.first()?;
    let comp = next.competition();
    let competitors = comp.and_then(|c| c.competitors.as_deref()).unwrap_or_default();
    let team_is_home = competitors.first().and_then(|c| c.abbreviation()) == Some(team_id);
    let (home_detail, away_detail) = if team_is_home {
        (Some(team), oppo)
    } else {
        (oppo, Some(team))
    };
    let home = lookup_team_block(competitors.first(), home_detail, Side::Home);
    let away = lookup_team_block(competitors.get(1), away_detail, Side::Away);
    let venue = comp.and_then(|c| c.venue.as_ref());
    let franchise_venue = home_detail.and_then(|d| d.franchise_venue());
    let comp_status = comp.and_then(|c| c.status.as_ref());

    let mut gs = GameState {
        state: comp_status
            .and_then(|s| s.status_type.as_ref())
            .and_then(|t| t.name.clone()),
        date: next.date.clone(),
        event_name: next.name.clone(),
        event_short_name: next.short_name.clone(),
        event_type: comp
            .and_then(|c| c.comp_type.as_ref())
            .and_then(|t| t.abbreviation.clone()),
        game_notes: first_note(comp),
        series_summary: comp.and_then(|c| c.series.as_ref()).and_then(|s| s.summary.clone()),
        venue_name: venue.and_then(|v| v.full_name.clone()),
        venue_city: venue.and_then(|v| v.address.as_ref()).and_then(|a| a.city.clone()),
        venue_state: venue.and_then(|v| v.address.as_ref()).and_then(|a| a.state.clone()),
        venue_capacity: franchise_venue.and_then(|v| v.capacity),
        venue_indoor: franchise_venue.and_then(|v| v.indoor),

        home_team_abbr: home.abbr,
        home_team_id: home.id,
        home_team_city: home.city,
        home_team_name: home.name,
        home_team_color: home.color,
        home_team_alt_color: home.alt_color,
        home_team_logo: home.logo,
        home_team_colors: home.colors,
        home_team_record: home.record,

        away_team_abbr: away.abbr,
        away_team_id: away.id,
        away_team_city: away.city,
        away_team_name: away.name,
        away_team_color: away.color,
        away_team_alt_color: away.alt_color,
        away_team_logo: away.logo,
        away_team_colors: away.colors,
        away_team_record: away.record,

        first_pitch_in: next
            .date
            .as_deref()
            .and_then(parse_event_date)
            .map(|start| humanize_delta(start - now)),
        tv_network: comp
            .and_then(|c| c.broadcasts.as_ref())
            .and_then(|b| b.first())
            .and_then(|b| b.media.as_ref())
            .and_then(|m| m.short_name.clone()),
        home_team_starting_pitcher: home.starting_pitcher,
        away_team_starting_pitcher: away.starting_pitcher,
        headlines: first_note(comp),
        team_id: Some(team_id.to_owned()),
        last_update: Some(now.to_rfc3339()),
        ..GameState::default()
    };
    gs.private_fast_refresh = refresh::is_fast(&gs, now);
    Some(gs)
}

/// The opponent's abbreviation according to the team's declared next event.
pub fn opponent_abbreviation(team: &EspnTeamDetail, team_id: &str) -> Option<String> {
    let next = team.next_event.as_ref()?.first()?;
    let competitors = next.competition()?.competitors.as_deref()?;
    competitors
        .iter()
        .filter_map(|c| c.abbreviation())
        .find(|abbr| *abbr != team_id)
        .map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Team blocks
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TeamBlock {
    abbr: Option<String>,
    id: Option<String>,
    city: Option<String>,
    name: Option<String>,
    color: Option<String>,
    alt_color: Option<String>,
    logo: Option<String>,
    runs: Option<String>,
    hits: Option<i64>,
    errors: Option<i64>,
    colors: Vec<String>,
    linescores: [Option<f64>; 9],
    record: Option<String>,
    starting_pitcher: Option<String>,
}

fn scoreboard_team_block(c: Option<&EspnCompetitor>, side: Side) -> TeamBlock {
    let team = c.and_then(|c| c.team.as_ref());
    let mut linescores = [None; 9];
    if let Some(slots) = c.and_then(|c| c.linescores.as_ref()) {
        for (slot, entry) in linescores.iter_mut().zip(slots) {
            *slot = entry.value;
        }
    }
    TeamBlock {
        abbr: team.and_then(|t| t.abbreviation.clone()),
        id: team.and_then(|t| t.id.clone()),
        city: team.and_then(|t| t.location.clone()),
        name: team.and_then(|t| t.name.clone()),
        color: team.and_then(|t| t.color.clone()),
        alt_color: team.and_then(|t| t.alternate_color.clone()),
        logo: team.and_then(|t| t.logo.clone()),
        runs: c.and_then(|c| c.score.clone()),
        hits: c.and_then(|c| c.hits),
        errors: c.and_then(|c| c.errors),
        colors: team_colors(
            team.and_then(|t| t.color.as_deref()),
            team.and_then(|t| t.alternate_color.as_deref()),
            side,
        ),
        linescores,
        record: c
            .and_then(|c| c.records.as_ref())
            .and_then(|r| r.first())
            .and_then(|r| r.summary.clone()),
        starting_pitcher: probable_pitcher(c),
    }
}

/// Pre-game block assembled from the next-event competitor plus the matching
/// team-endpoint lookup (colors and record live on the lookup, not the event).
fn lookup_team_block(
    c: Option<&EspnCompetitor>,
    detail: Option<&EspnTeamDetail>,
    side: Side,
) -> TeamBlock {
    let team = c.and_then(|c| c.team.as_ref());
    TeamBlock {
        abbr: team.and_then(|t| t.abbreviation.clone()),
        id: team.and_then(|t| t.id.clone()),
        city: team.and_then(|t| t.location.clone()),
        name: team.and_then(|t| t.short_display_name.clone()),
        color: detail.and_then(|d| d.color.clone()),
        alt_color: detail.and_then(|d| d.alternate_color.clone()),
        logo: team
            .and_then(|t| t.logos.as_ref())
            .and_then(|l| l.get(2))
            .and_then(|l| l.href.clone()),
        colors: team_colors(
            detail.and_then(|d| d.color.as_deref()),
            detail.and_then(|d| d.alternate_color.as_deref()),
            side,
        ),
        record: detail.and_then(|d| d.record_summary()),
        starting_pitcher: probable_pitcher(c),
        ..TeamBlock::default()
    }
}

fn probable_pitcher(c: Option<&EspnCompetitor>) -> Option<String> {
    c.and_then(|c| c.probables.as_ref())
        .and_then(|p| p.first())
        .and_then(|p| p.athlete.as_ref())
        .and_then(|a| a.display_name.clone())
}

fn team_colors(color: Option<&str>, alt: Option<&str>, side: Side) -> Vec<String> {
    match (color, alt) {
        (Some(c), Some(a)) => vec![format!("#{c}"), format!("#{a}")],
        _ => match side {
            Side::Home => DEFAULT_HOME_COLORS.map(str::to_owned).to_vec(),
            Side::Away => DEFAULT_AWAY_COLORS.map(str::to_owned).to_vec(),
        },
    }
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

fn fill_pitchers_of_record(gs: &mut GameState, featured: &[EspnFeaturedAthlete]) {
    if let Some(wp) = featured_role(featured, "winningPitcher") {
        gs.winning_pitcher = athlete_full_name(wp);
        gs.winning_pitcher_wins = stat_by_name(wp, "wins");
        gs.winning_pitcher_losses = stat_by_name(wp, "losses");
        gs.winning_pitcher_era = stat_by_name(wp, "ERA");
    }
    if let Some(lp) = featured_role(featured, "losingPitcher") {
        gs.losing_pitcher = athlete_full_name(lp);
        gs.losing_pitcher_wins = stat_by_name(lp, "wins");
        gs.losing_pitcher_losses = stat_by_name(lp, "losses");
        gs.losing_pitcher_era = stat_by_name(lp, "ERA");
    }
    if let Some(sp) = featured_role(featured, "savingPitcher") {
        gs.saving_pitcher = athlete_full_name(sp);
        gs.saving_pitcher_saves = stat_by_name(sp, "saves");
    }
}

fn featured_role<'a>(
    featured: &'a [EspnFeaturedAthlete],
    role: &str,
) -> Option<&'a EspnFeaturedAthlete> {
    featured.iter().find(|f| f.name.as_deref() == Some(role))
}

fn athlete_full_name(f: &EspnFeaturedAthlete) -> Option<String> {
    f.athlete.as_ref()?.full_name.clone()
}

/// Stat order in the payload is not guaranteed; match on the stat name.
fn stat_by_name(f: &EspnFeaturedAthlete, name: &str) -> Option<String> {
    f.statistics
        .as_ref()?
        .iter()
        .find(|s| s.name.as_deref() == Some(name))?
        .display_value
        .clone()
}

fn decide_win_or_loss(
    home_runs: Option<&str>,
    away_runs: Option<&str>,
    team_is_home: bool,
) -> Option<String> {
    let home: f64 = home_runs?.parse().ok()?;
    let away: f64 = away_runs?.parse().ok()?;
    let (own, theirs) = if team_is_home { (home, away) } else { (away, home) };
    Some(if own > theirs { "win" } else { "loss" }.to_owned())
}

/// The stopwatch stops exactly once, on the in-progress → final transition.
/// Later final cycles reuse what was computed then.
fn game_clock(
    prior: Option<&GameState>,
    phase: GamePhase,
    start: Option<&str>,
    now: DateTime<Utc>,
) -> (Option<i64>, Option<String>) {
    if phase != GamePhase::Final {
        return (None, None);
    }
    match prior {
        Some(p) if p.phase() == GamePhase::InProgress => {
            let length = start.and_then(parse_event_date).map(|s| (now - s).num_seconds());
            (length, Some(now.to_rfc3339()))
        }
        Some(p) if p.phase() == GamePhase::Final => (p.game_length, p.game_end_time.clone()),
        _ => (None, None),
    }
}

fn role_athlete(role: &EspnSituationRole) -> Option<String> {
    role.athlete.as_ref()?.full_name.clone()
}

fn first_note(comp: Option<&EspnCompetition>) -> Option<String> {
    comp?.notes.as_ref()?.first()?.headline.clone()
}

fn broadcast_names(comp: Option<&EspnCompetition>) -> Option<String> {
    let names = comp?.broadcasts.as_ref()?.first()?.names.as_ref()?;
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

fn humanize_delta(delta: Duration) -> String {
    let secs = delta.num_seconds();
    let (abs, future) = if secs >= 0 { (secs, true) } else { (-secs, false) };
    let body = if abs < 60 {
        "less than a minute".to_owned()
    } else if abs < 5400 {
        let minutes = (abs + 30) / 60;
        format!("{minutes} minute{}", if minutes == 1 { "" } else { "s" })
    } else if abs < 129_600 {
        let hours = (abs + 1800) / 3600;
        format!("{hours} hour{}", if hours == 1 { "" } else { "s" })
    } else {
        let days = (abs + 43_200) / 86_400;
        format!("{days} day{}", if days == 1 { "" } else { "s" })
    };
    if future { format!("in {body}") } else { format!("{body} ago") }
}
