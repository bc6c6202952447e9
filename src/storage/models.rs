//! Data models for the storage layer

use serde::{Deserialize, Serialize};

use crate::cli::types::{AthleteId, ExternalId, Position};
use crate::football::aggregate::{PillarScores, SeasonTotals};

/// A club row. Created implicitly during sync; unique by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub club_id: i64,
    pub name: String,
}

/// A roster record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub athlete_id: AthleteId,
    pub name: String,
    pub position: String,
    pub external_id: Option<ExternalId>,
    pub club_id: Option<i64>,
    pub nationality: Option<String>,
    pub age: Option<u8>,
    pub total_goals: u32,
    pub total_assists: u32,
    pub total_appearances: u32,
    pub total_yellow_cards: u32,
    pub total_red_cards: u32,
    pub total_tackles: u32,
    pub pillars: PillarScores,
    /// Unix seconds of the last provider sync, if any.
    pub synced_at: Option<u64>,
}

/// Fields needed to create a roster record from a market import or
/// manual entry. Club stays null until the first sync resolves one.
#[derive(Debug, Clone)]
pub struct NewAthlete {
    pub name: String,
    pub position: Position,
    pub external_id: Option<ExternalId>,
    pub nationality: Option<String>,
    pub age: Option<u8>,
}

/// Denormalized rollup written back by a sync, keyed by external id.
#[derive(Debug, Clone)]
pub struct SyncedProfile {
    pub external_id: ExternalId,
    pub name: String,
    /// Used only when the sync creates the row; an existing record keeps
    /// its position.
    pub position: Position,
    pub club_id: i64,
    pub nationality: Option<String>,
    pub age: Option<u8>,
    pub totals: SeasonTotals,
    pub pillars: PillarScores,
}

/// A saved scouting report. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutReport {
    pub report_id: i64,
    pub athlete_id: AthleteId,
    pub club_id: Option<i64>,
    /// Observation date, ISO `YYYY-MM-DD`.
    pub observed_on: String,
    pub notes: Option<String>,
    pub scores: PillarScores,
    pub created_at: u64,
}

/// Fields for inserting a new scouting report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub athlete_id: AthleteId,
    pub club_id: Option<i64>,
    pub observed_on: String,
    pub notes: Option<String>,
    pub scores: PillarScores,
}

/// One row of the roster ranking view: the athlete plus report-score
/// averages and season totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRow {
    pub athlete_id: AthleteId,
    pub name: String,
    pub position: String,
    pub club: Option<String>,
    pub external_id: Option<ExternalId>,
    pub total_goals: u32,
    pub total_assists: u32,
    pub total_appearances: u32,
    pub report_count: u32,
    pub averages: PillarScores,
}

impl RankingRow {
    /// Overall score used for ranking: mean of the four report-score
    /// averages. Athletes without reports rank at 0.
    pub fn overall(&self) -> f64 {
        (self.averages.technical
            + self.averages.tactical
            + self.averages.physical
            + self.averages.psychological)
            / 4.0
    }
}
