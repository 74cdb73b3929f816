/// ESPN MLB site API wire types — serde shapes for deserializing responses.
/// These collapse into the flat `GameState` record via extract.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub date: Option<String>, // ISO 8601, sometimes without seconds
    /// Full team names, e.g. "New York Mets at Washington Nationals"
    pub name: Option<String>,
    /// Abbreviations, e.g. "NYM @ WSH"
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub status: Option<EspnEventStatus>,
    pub weather: Option<EspnWeather>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

impl EspnEvent {
    /// The scoreboard nests everything game-related under a single-element
    /// competitions array.
    pub fn competition(&self) -> Option<&EspnCompetition> {
        self.competitions.as_ref()?.first()
    }

    pub fn status_type(&self) -> Option<&EspnStatusType> {
        self.status.as_ref()?.status_type.as_ref()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEventStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "Top 3rd", "Final", "5/28 - 7:10 PM EDT"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnWeather {
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>, // "Mostly clear"
    pub temperature: Option<i64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub attendance: Option<u64>,
    #[serde(rename = "type")]
    pub comp_type: Option<EspnCompetitionType>,
    pub venue: Option<EspnVenue>,
    pub notes: Option<Vec<EspnNote>>,
    pub series: Option<EspnSeries>,
    /// Competition-level status carries the inning counter and, once final,
    /// the featured pitchers of record.
    pub status: Option<EspnCompetitionStatus>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    pub broadcasts: Option<Vec<EspnBroadcast>>,
    pub situation: Option<EspnSituation>,
    pub odds: Option<Vec<EspnOdds>>,
    pub headlines: Option<Vec<EspnHeadline>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitionType {
    pub abbreviation: Option<String>, // "STD", "RD16", "QTR"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnNote {
    pub headline: Option<String>, // "East 1st Round - Game 7"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSeries {
    pub summary: Option<String>, // "Series Tied 3-3"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitionStatus {
    pub period: Option<u32>, // inning number
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    #[serde(rename = "featuredAthletes")]
    pub featured_athletes: Option<Vec<EspnFeaturedAthlete>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
    pub capacity: Option<u64>,
    pub indoor: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAddress {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// One of the two teams in a competition. Home is index 0, away index 1.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>,
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
    pub hits: Option<i64>,
    pub errors: Option<i64>,
    pub linescores: Option<Vec<EspnLinescore>>,
    pub records: Option<Vec<EspnRecord>>,
    /// Probable (starting) pitchers, populated pre-game.
    pub probables: Option<Vec<EspnProbable>>,
}

impl EspnCompetitor {
    pub fn abbreviation(&self) -> Option<&str> {
        self.team.as_ref()?.abbreviation.as_deref()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    pub location: Option<String>, // "New York"
    pub name: Option<String>,     // "Mets"
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub color: Option<String>, // hex, no leading '#'
    #[serde(rename = "alternateColor")]
    pub alternate_color: Option<String>,
    pub logo: Option<String>,
    pub logos: Option<Vec<EspnLogo>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLogo {
    pub href: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLinescore {
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRecord {
    pub summary: Option<String>, // "98-58"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnProbable {
    pub athlete: Option<EspnAthlete>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthlete {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcast {
    /// Scoreboard shape: a list of network names.
    pub names: Option<Vec<String>>,
    /// Team-endpoint shape: a single media object.
    pub media: Option<EspnBroadcastMedia>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcastMedia {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
}

/// Live at-bat situation, present only while a game is in progress.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituation {
    #[serde(rename = "lastPlay")]
    pub last_play: Option<EspnLastPlay>,
    pub balls: Option<u32>,
    pub strikes: Option<u32>,
    pub outs: Option<u32>,
    #[serde(rename = "onFirst")]
    pub on_first: Option<bool>,
    #[serde(rename = "onSecond")]
    pub on_second: Option<bool>,
    #[serde(rename = "onThird")]
    pub on_third: Option<bool>,
    pub batter: Option<EspnSituationRole>,
    pub pitcher: Option<EspnSituationRole>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLastPlay {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnSituationRole {
    pub athlete: Option<EspnAthlete>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnOdds {
    pub details: Option<String>, // "NYM -120"
    #[serde(rename = "overUnder")]
    pub over_under: Option<f64>,
    #[serde(rename = "homeTeamOdds")]
    pub home_team_odds: Option<EspnTeamOdds>,
    #[serde(rename = "awayTeamOdds")]
    pub away_team_odds: Option<EspnTeamOdds>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamOdds {
    #[serde(rename = "winPercentage")]
    pub win_percentage: Option<f64>,
}

/// A pitcher of record, tagged with a role once a game is final.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnFeaturedAthlete {
    /// Role tag: "winningPitcher", "losingPitcher" or "savingPitcher".
    pub name: Option<String>,
    pub athlete: Option<EspnAthlete>,
    /// {name, displayValue} pairs in no guaranteed order.
    pub statistics: Option<Vec<EspnStat>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStat {
    pub name: Option<String>, // "wins", "losses", "ERA", "saves"
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnHeadline {
    #[serde(rename = "shortLinkText")]
    pub short_link_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Per-team lookup  (site v2 API) — fallback when the team is off the board
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamResponse {
    pub team: Option<EspnTeamDetail>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamDetail {
    pub abbreviation: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "alternateColor")]
    pub alternate_color: Option<String>,
    pub record: Option<EspnTeamRecord>,
    pub franchise: Option<EspnFranchise>,
    /// The team's next scheduled event, same shape as a scoreboard event.
    #[serde(rename = "nextEvent")]
    pub next_event: Option<Vec<EspnEvent>>,
}

impl EspnTeamDetail {
    pub fn record_summary(&self) -> Option<String> {
        self.record.as_ref()?.items.as_ref()?.first()?.summary.clone()
    }

    pub fn franchise_venue(&self) -> Option<&EspnVenue> {
        self.franchise.as_ref()?.venue.as_ref()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeamRecord {
    pub items: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnFranchise {
    pub venue: Option<EspnVenue>,
}
