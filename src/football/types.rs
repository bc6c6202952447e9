//! Typed wire structures for the API-Football v3 envelope.
//!
//! The provider wraps every result in `{ "response": [...], "errors": {} }`
//! and is generous with nulls, so nearly every leaf field is an `Option`
//! with a `default`. Ratings arrive as strings ("7.25"), numbers, or null
//! depending on the endpoint; `de_rating` folds all three into `Option<f64>`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level envelope for every provider endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub response: Vec<Value>,
    /// Empty array on success, object keyed by error kind on failure.
    #[serde(default)]
    pub errors: Value,
}

impl ApiEnvelope {
    /// Provider-reported errors, if the `errors` field is a non-empty object.
    pub fn error_map(&self) -> Option<&serde_json::Map<String, Value>> {
        self.errors.as_object().filter(|m| !m.is_empty())
    }
}

fn de_rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Num(f64),
        Text(String),
    }

    let raw: Option<RawRating> = Deserialize::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawRating::Num(n)) => Some(n),
        Some(RawRating::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

/// One element of a `/players` response: the player plus one statistics
/// block per competition they appeared in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player: PlayerInfo,
    #[serde(default)]
    pub statistics: Vec<CompetitionStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Statistics for one athlete in one competition of one season.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitionStats {
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub league: Option<LeagueRef>,
    #[serde(default)]
    pub games: GameStats,
    #[serde(default)]
    pub goals: GoalStats,
    #[serde(default)]
    pub cards: CardStats,
    #[serde(default)]
    pub tackles: TackleStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueRef {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub season: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    /// Provider spells this "appearences" on the wire.
    #[serde(rename = "appearences", default)]
    pub appearances: Option<u32>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "de_rating")]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalStats {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub saves: Option<u32>,
    #[serde(default)]
    pub conceded: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardStats {
    #[serde(default)]
    pub yellow: Option<u32>,
    #[serde(default)]
    pub red: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TackleStats {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub blocks: Option<u32>,
    #[serde(default)]
    pub interceptions: Option<u32>,
}

/// One element of `/players/injuries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryEntry {
    pub player: InjuredPlayer,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub fixture: Option<FixtureRef>,
    #[serde(default)]
    pub league: Option<LeagueRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuredPlayer {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub name: Option<String>,
    /// Injury classification ("Missing Fixture", "Questionable", ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// One element of `/transfers`: a player plus their move history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferEntry {
    #[serde(default)]
    pub transfers: Vec<TransferMove>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferMove {
    #[serde(default)]
    pub date: Option<String>,
    /// Fee, "Loan", "Free", or null.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub teams: Option<TransferTeams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferTeams {
    #[serde(rename = "in", default)]
    pub joined: Option<TeamRef>,
    #[serde(rename = "out", default)]
    pub left: Option<TeamRef>,
}
