//! End-to-end extraction over a realistic scoreboard document: raw JSON in,
//! flat attribute map out.

use chrono::{TimeZone, Utc};
use mlb_api::espn::ScoreboardResponse;
use mlb_api::{FIELD_COUNT, GamePhase, GameState, extract};

const FINAL_GAME: &str = r#"{
  "events": [
    {
      "id": "401697123",
      "date": "2026-05-28T23:10Z",
      "name": "New York Mets at Washington Nationals",
      "shortName": "NYM @ WSH",
      "status": {"type": {"name": "STATUS_FINAL", "shortDetail": "Final"}},
      "weather": {"displayValue": "Partly cloudy", "temperature": 71},
      "competitions": [
        {
          "attendance": 31504,
          "type": {"abbreviation": "STD"},
          "venue": {
            "fullName": "Nationals Park",
            "address": {"city": "Washington", "state": "DC"},
            "capacity": 41339,
            "indoor": false
          },
          "notes": [],
          "status": {
            "period": 9,
            "type": {"name": "STATUS_FINAL", "shortDetail": "Final"},
            "featuredAthletes": [
              {
                "name": "winningPitcher",
                "athlete": {"fullName": "Kodai Senga"},
                "statistics": [
                  {"name": "wins", "displayValue": "7"},
                  {"name": "losses", "displayValue": "2"},
                  {"name": "ERA", "displayValue": "2.91"}
                ]
              },
              {
                "name": "losingPitcher",
                "athlete": {"fullName": "Jake Irvin"},
                "statistics": [
                  {"name": "ERA", "displayValue": "4.25"},
                  {"name": "wins", "displayValue": "3"},
                  {"name": "losses", "displayValue": "5"}
                ]
              },
              {
                "name": "savingPitcher",
                "athlete": {"fullName": "Edwin Diaz"},
                "statistics": [{"name": "saves", "displayValue": "14"}]
              }
            ]
          },
          "broadcasts": [{"names": ["SNY"]}],
          "odds": [
            {"details": "NYM -145", "overUnder": 9.0},
            {
              "homeTeamOdds": {"winPercentage": 38.1},
              "awayTeamOdds": {"winPercentage": 61.9}
            }
          ],
          "headlines": [{"shortLinkText": "Mets ride Senga gem past Nats"}],
          "competitors": [
            {
              "homeAway": "home",
              "score": "2",
              "hits": 6,
              "errors": 1,
              "linescores": [
                {"value": 0.0}, {"value": 0.0}, {"value": 1.0},
                {"value": 0.0}, {"value": 0.0}, {"value": 0.0},
                {"value": 0.0}, {"value": 1.0}, {"value": 0.0}
              ],
              "records": [{"summary": "24-30"}],
              "team": {
                "id": "20",
                "abbreviation": "WSH",
                "location": "Washington",
                "name": "Nationals",
                "color": "AB0003",
                "alternateColor": "14225A",
                "logo": "https://a.espncdn.com/i/teamlogos/mlb/500/wsh.png"
              }
            },
            {
              "homeAway": "away",
              "score": "5",
              "hits": 11,
              "errors": 0,
              "linescores": [
                {"value": 2.0}, {"value": 0.0}, {"value": 0.0},
                {"value": 1.0}, {"value": 0.0}, {"value": 0.0},
                {"value": 2.0}, {"value": 0.0}, {"value": 0.0}
              ],
              "records": [{"summary": "31-24"}],
              "team": {
                "id": "21",
                "abbreviation": "NYM",
                "location": "New York",
                "name": "Mets",
                "color": "002D72",
                "alternateColor": "FF5910",
                "logo": "https://a.espncdn.com/i/teamlogos/mlb/500/nym.png"
              }
            }
          ]
        }
      ]
    }
  ]
}"#;

#[test]
fn full_final_game_flattens_into_a_complete_record() {
    let scoreboard: ScoreboardResponse =
        serde_json::from_str(FINAL_GAME).expect("document should deserialize");
    let now = Utc.with_ymd_and_hms(2026, 5, 29, 2, 30, 0).unwrap();
    let prior = GameState {
        state: Some("STATUS_IN_PROGRESS".to_owned()),
        ..GameState::default()
    };

    let gs = extract::from_scoreboard(&scoreboard, "NYM", Some(&prior), now)
        .expect("the Mets are on this board");

    assert_eq!(gs.phase(), GamePhase::Final);
    assert_eq!(gs.event_name.as_deref(), Some("New York Mets at Washington Nationals"));
    assert_eq!(gs.attendance, Some(31504));
    assert_eq!(gs.venue_name.as_deref(), Some("Nationals Park"));
    assert_eq!(gs.weather_temp, Some(71));
    assert_eq!(gs.tv_network.as_deref(), Some("SNY"));
    assert_eq!(gs.headlines.as_deref(), Some("Mets ride Senga gem past Nats"));

    // Team blocks keep the payload's home-first ordering.
    assert_eq!(gs.home_team_abbr.as_deref(), Some("WSH"));
    assert_eq!(gs.home_team_runs.as_deref(), Some("2"));
    assert_eq!(gs.home_team_ls_3, Some(1.0));
    assert_eq!(gs.home_team_record.as_deref(), Some("24-30"));
    assert_eq!(gs.away_team_abbr.as_deref(), Some("NYM"));
    assert_eq!(gs.away_team_runs.as_deref(), Some("5"));
    assert_eq!(gs.away_team_hits, Some(11));
    assert_eq!(gs.away_team_ls_7, Some(2.0));
    assert_eq!(gs.away_team_colors, vec!["#002D72", "#FF5910"]);

    // Pitchers of record, matched by role and stat name.
    assert_eq!(gs.winning_pitcher.as_deref(), Some("Kodai Senga"));
    assert_eq!(gs.winning_pitcher_era.as_deref(), Some("2.91"));
    assert_eq!(gs.losing_pitcher.as_deref(), Some("Jake Irvin"));
    assert_eq!(gs.losing_pitcher_losses.as_deref(), Some("5"));
    assert_eq!(gs.saving_pitcher.as_deref(), Some("Edwin Diaz"));
    assert_eq!(gs.saving_pitcher_saves.as_deref(), Some("14"));

    // Away team won 5-2 and the stopwatch stopped on this cycle.
    assert_eq!(gs.win_or_loss.as_deref(), Some("win"));
    assert_eq!(gs.game_length, Some(3 * 3600 + 20 * 60));
    assert!(gs.game_end_time.is_some());
    assert!(!gs.private_fast_refresh);

    // The published map is the full schema no matter the payload.
    let attrs = gs.attributes();
    assert_eq!(attrs.len(), FIELD_COUNT);
    assert_eq!(attrs["state"], "STATUS_FINAL");
    assert!(attrs["balls"].is_null()); // no live situation after the final out
}

#[test]
fn the_same_document_reads_as_a_loss_for_the_nationals() {
    let scoreboard: ScoreboardResponse = serde_json::from_str(FINAL_GAME).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 5, 29, 2, 30, 0).unwrap();
    let gs = extract::from_scoreboard(&scoreboard, "WSH", None, now).unwrap();
    assert_eq!(gs.win_or_loss.as_deref(), Some("loss"));
    assert_eq!(gs.team_id.as_deref(), Some("WSH"));
}
