use crate::GameState;
use crate::espn::{ScoreboardResponse, TeamResponse};
use crate::extract;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_MLB_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 11_6) AppleWebKit/605.1.15 \
     (KHTML, like Gecko) Version/15.0 Safari/605.1.15";
const ACCEPT: &str = "application/ld+json";

/// MLB scoreboard client backed by ESPN's public site API.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self::with_base_url(ESPN_MLB_SITE_V2)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different host — tests aim this at a local mock.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub async fn fetch_scoreboard(&self) -> ApiResult<ScoreboardResponse> {
        let url = format!("{}/scoreboard", self.base_url);
        self.get(&url).await
    }

    pub async fn fetch_team(&self, abbr: &str) -> ApiResult<TeamResponse> {
        let url = format!("{}/teams/{abbr}", self.base_url);
        self.get(&url).await
    }

    /// One full poll cycle: today's scoreboard first; when the team isn't on
    /// it, the per-team endpoint (plus the opponent's) supplies the next
    /// scheduled game; when even that is empty, the OFF state goes out.
    ///
    /// Any transport, server or parse failure along the way surfaces as a
    /// single error — the caller keeps its previous state in that case.
    pub async fn fetch_game_state(
        &self,
        team_id: &str,
        prior: Option<&GameState>,
        now: DateTime<Utc>,
    ) -> ApiResult<GameState> {
        let scoreboard = self.fetch_scoreboard().await?;
        if let Some(state) = extract::from_scoreboard(&scoreboard, team_id, prior, now) {
            return Ok(state);
        }

        let team = self.fetch_team(team_id).await?;
        let Some(detail) = team.team else {
            return Ok(GameState::offline(team_id, now));
        };
        let oppo = match extract::opponent_abbreviation(&detail, team_id) {
            Some(abbr) => self.fetch_team(&abbr).await?.team,
            None => None,
        };
        Ok(extract::from_team_lookup(&detail, oppo.as_ref(), team_id, now)
            .unwrap_or_else(|| GameState::offline(team_id, now)))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 28, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn scoreboard_events_deserialize() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events": [{"shortName": "NYM @ WSH"}, {"shortName": "ATL @ PHI"}]}"#)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let scoreboard = api.fetch_scoreboard().await.expect("fetch should succeed");
        assert_eq!(scoreboard.events.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn client_errors_degrade_to_an_empty_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teams/XXX")
            .with_status(404)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let team = api.fetch_team("XXX").await.expect("4xx should not error");
        assert!(team.team.is_none());
    }

    #[tokio::test]
    async fn server_errors_propagate() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .with_status(500)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let err = api.fetch_scoreboard().await.expect_err("5xx should error");
        assert!(matches!(err, ApiError::Api(..)));
    }

    #[tokio::test]
    async fn garbled_bodies_propagate_as_parse_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let err = api.fetch_scoreboard().await.expect_err("bad body should error");
        assert!(matches!(err, ApiError::Parsing(..)));
    }

    #[tokio::test]
    async fn empty_board_and_empty_team_end_in_the_off_state() {
        let mut server = mockito::Server::new_async().await;
        let _scoreboard = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events": []}"#)
            .create_async()
            .await;
        let _team = server
            .mock("GET", "/teams/NYM")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"team": {"abbreviation": "NYM"}}"#)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let state = api
            .fetch_game_state("NYM", None, noon())
            .await
            .expect("cycle should succeed");
        assert_eq!(state.state.as_deref(), Some("OFF"));
        assert_eq!(state.team_id.as_deref(), Some("NYM"));
    }

    #[tokio::test]
    async fn fallback_fetches_both_team_endpoints() {
        let next_event = r#"{
            "team": {
                "abbreviation": "NYM",
                "color": "002D72",
                "alternateColor": "FF5910",
                "nextEvent": [{
                    "date": "2026-05-30T17:40Z",
                    "shortName": "NYM @ ATL",
                    "competitions": [{
                        "status": {"type": {"name": "STATUS_SCHEDULED"}},
                        "competitors": [
                            {"homeAway": "home", "team": {"abbreviation": "ATL", "shortDisplayName": "Braves"}},
                            {"homeAway": "away", "team": {"abbreviation": "NYM", "shortDisplayName": "Mets"}}
                        ]
                    }]
                }]
            }
        }"#;
        let mut server = mockito::Server::new_async().await;
        let _scoreboard = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"events": [{"shortName": "LAD @ SF"}]}"#)
            .create_async()
            .await;
        let _own = server
            .mock("GET", "/teams/NYM")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(next_event)
            .create_async()
            .await;
        let oppo = server
            .mock("GET", "/teams/ATL")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"team": {"abbreviation": "ATL", "color": "CE1141", "alternateColor": "13274F"}}"#)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let state = api
            .fetch_game_state("NYM", None, noon())
            .await
            .expect("fallback cycle should succeed");

        oppo.assert_async().await;
        assert_eq!(state.state.as_deref(), Some("STATUS_SCHEDULED"));
        assert_eq!(state.event_short_name.as_deref(), Some("NYM @ ATL"));
        assert_eq!(state.home_team_colors, vec!["#CE1141", "#13274F"]);
        assert_eq!(state.away_team_colors, vec!["#002D72", "#FF5910"]);
    }

    #[tokio::test]
    async fn scoreboard_hit_skips_the_team_endpoints() {
        let mut server = mockito::Server::new_async().await;
        let _scoreboard = server
            .mock("GET", "/scoreboard")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"events": [{
                    "shortName": "NYM @ WSH",
                    "status": {"type": {"name": "STATUS_IN_PROGRESS"}}
                }]}"#,
            )
            .create_async()
            .await;
        let team = server
            .mock("GET", "/teams/NYM")
            .expect(0)
            .create_async()
            .await;

        let api = MlbApi::with_base_url(server.url());
        let state = api
            .fetch_game_state("NYM", None, noon())
            .await
            .expect("cycle should succeed");

        team.assert_async().await;
        assert_eq!(state.state.as_deref(), Some("STATUS_IN_PROGRESS"));
        assert!(state.private_fast_refresh);
    }
}
