//! CRUD operations over the roster, club, and report tables.

use rusqlite::{params, Row};
use std::time::{SystemTime, UNIX_EPOCH};

use super::{models::*, schema::ScoutDatabase};
use crate::cli::types::{AthleteId, ExternalId};
use crate::error::Result;
use crate::football::aggregate::PillarScores;

const ATHLETE_COLUMNS: &str = "athlete_id, name, position, external_id, club_id,
    nationality, age, total_goals, total_assists, total_appearances,
    total_yellow_cards, total_red_cards, total_tackles,
    technical, tactical, physical, psychological, synced_at";

impl ScoutDatabase {
    /// Resolve a club id by name, creating the row if absent.
    ///
    /// The UNIQUE constraint on the name makes this idempotent: repeated
    /// (or interleaved) resolutions of the same name converge on one row.
    pub fn resolve_club(&mut self, name: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO clubs (name) VALUES (?)",
            params![name],
        )?;

        let club_id = self.conn.query_row(
            "SELECT club_id FROM clubs WHERE name = ?",
            params![name],
            |row| row.get(0),
        )?;
        Ok(club_id)
    }

    /// All clubs, ordered by name.
    pub fn list_clubs(&self) -> Result<Vec<Club>> {
        let mut stmt = self
            .conn
            .prepare("SELECT club_id, name FROM clubs ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok(Club {
                club_id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut clubs = Vec::new();
        for row in rows {
            clubs.push(row?);
        }
        Ok(clubs)
    }

    /// Insert a new roster record (market import or manual entry).
    pub fn insert_athlete(&mut self, athlete: &NewAthlete) -> Result<AthleteId> {
        self.conn.execute(
            "INSERT INTO athletes (name, position, external_id, nationality, age)
             VALUES (?, ?, ?, ?, ?)",
            params![
                athlete.name,
                athlete.position.code(),
                athlete.external_id.map(|id| id.as_u32()),
                athlete.nationality,
                athlete.age,
            ],
        )?;
        Ok(AthleteId::new(self.conn.last_insert_rowid()))
    }

    /// Upsert the denormalized sync rollup, keyed by external id.
    ///
    /// Roster identity (and any saved reports) survives the update: this
    /// is an ON CONFLICT UPDATE, not a row replacement.
    pub fn upsert_synced(&mut self, profile: &SyncedProfile) -> Result<()> {
        let now = now_secs();

        self.conn.execute(
            "INSERT INTO athletes (
                 name, position, external_id, club_id, nationality, age,
                 total_goals, total_assists, total_appearances,
                 total_yellow_cards, total_red_cards, total_tackles,
                 technical, tactical, physical, psychological, synced_at
             )
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(external_id) DO UPDATE SET
                 club_id = excluded.club_id,
                 nationality = COALESCE(excluded.nationality, nationality),
                 age = COALESCE(excluded.age, age),
                 total_goals = excluded.total_goals,
                 total_assists = excluded.total_assists,
                 total_appearances = excluded.total_appearances,
                 total_yellow_cards = excluded.total_yellow_cards,
                 total_red_cards = excluded.total_red_cards,
                 total_tackles = excluded.total_tackles,
                 technical = excluded.technical,
                 tactical = excluded.tactical,
                 physical = excluded.physical,
                 psychological = excluded.psychological,
                 synced_at = excluded.synced_at",
            params![
                profile.name,
                profile.position.code(),
                profile.external_id.as_u32(),
                profile.club_id,
                profile.nationality,
                profile.age,
                profile.totals.goals,
                profile.totals.assists,
                profile.totals.appearances,
                profile.totals.yellow_cards,
                profile.totals.red_cards,
                profile.totals.tackles,
                profile.pillars.technical,
                profile.pillars.tactical,
                profile.pillars.physical,
                profile.pillars.psychological,
                now,
            ],
        )?;
        Ok(())
    }

    /// Link a roster record to a provider id after the fact.
    pub fn set_external_id(&mut self, id: AthleteId, external_id: ExternalId) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE athletes SET external_id = ? WHERE athlete_id = ?",
            params![external_id.as_u32(), id.as_i64()],
        )?;

        if updated == 0 {
            return Err(crate::error::ScoutError::AthleteNotFound { id: id.as_i64() });
        }
        Ok(())
    }

    pub fn get_athlete(&self, id: AthleteId) -> Result<Option<Athlete>> {
        let query = format!("SELECT {ATHLETE_COLUMNS} FROM athletes WHERE athlete_id = ?");
        let mut stmt = self.conn.prepare(&query)?;

        let result = stmt.query_row(params![id.as_i64()], |row| self.row_to_athlete(row));
        match result {
            Ok(athlete) => Ok(Some(athlete)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_external_id(&self, external_id: ExternalId) -> Result<Option<Athlete>> {
        let query = format!("SELECT {ATHLETE_COLUMNS} FROM athletes WHERE external_id = ?");
        let mut stmt = self.conn.prepare(&query)?;

        let result = stmt.query_row(params![external_id.as_u32()], |row| {
            self.row_to_athlete(row)
        });
        match result {
            Ok(athlete) => Ok(Some(athlete)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All roster records, ordered by name.
    pub fn list_athletes(&self) -> Result<Vec<Athlete>> {
        let query = format!("SELECT {ATHLETE_COLUMNS} FROM athletes ORDER BY name");
        let mut stmt = self.conn.prepare(&query)?;

        let rows = stmt.query_map([], |row| self.row_to_athlete(row))?;

        let mut athletes = Vec::new();
        for row in rows {
            athletes.push(row?);
        }
        Ok(athletes)
    }

    /// Remove a roster record; its reports go with it (cascade).
    pub fn delete_athlete(&mut self, id: AthleteId) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM athletes WHERE athlete_id = ?",
            params![id.as_i64()],
        )?;
        Ok(deleted > 0)
    }

    /// Insert an immutable scouting report row.
    pub fn insert_report(&mut self, report: &NewReport) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO scout_reports (
                 athlete_id, club_id, observed_on, notes,
                 technical, tactical, physical, psychological, created_at
             )
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                report.athlete_id.as_i64(),
                report.club_id,
                report.observed_on,
                report.notes,
                report.scores.technical,
                report.scores.tactical,
                report.scores.physical,
                report.scores.psychological,
                now_secs(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Reports for one athlete, most recent observation first.
    pub fn reports_for(&self, id: AthleteId) -> Result<Vec<ScoutReport>> {
        let mut stmt = self.conn.prepare(
            "SELECT report_id, athlete_id, club_id, observed_on, notes,
                    technical, tactical, physical, psychological, created_at
             FROM scout_reports
             WHERE athlete_id = ?
             ORDER BY observed_on DESC, report_id DESC",
        )?;

        let rows = stmt.query_map(params![id.as_i64()], |row| {
            Ok(ScoutReport {
                report_id: row.get(0)?,
                athlete_id: AthleteId::new(row.get(1)?),
                club_id: row.get(2)?,
                observed_on: row.get(3)?,
                notes: row.get(4)?,
                scores: PillarScores {
                    technical: row.get(5)?,
                    tactical: row.get(6)?,
                    physical: row.get(7)?,
                    psychological: row.get(8)?,
                },
                created_at: row.get(9)?,
            })
        })?;

        let mut reports = Vec::new();
        for row in rows {
            reports.push(row?);
        }
        Ok(reports)
    }

    /// The ranking view, best overall score first.
    pub fn ranking(&self) -> Result<Vec<RankingRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT athlete_id, name, position, club, external_id,
                    total_goals, total_assists, total_appearances,
                    report_count, avg_technical, avg_tactical,
                    avg_physical, avg_psychological
             FROM v_roster_ranking
             ORDER BY (avg_technical + avg_tactical + avg_physical + avg_psychological) / 4.0 DESC,
                      name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(RankingRow {
                athlete_id: AthleteId::new(row.get(0)?),
                name: row.get(1)?,
                position: row.get(2)?,
                club: row.get(3)?,
                external_id: row.get::<_, Option<u32>>(4)?.map(ExternalId::new),
                total_goals: row.get(5)?,
                total_assists: row.get(6)?,
                total_appearances: row.get(7)?,
                report_count: row.get(8)?,
                averages: PillarScores {
                    technical: row.get(9)?,
                    tactical: row.get(10)?,
                    physical: row.get(11)?,
                    psychological: row.get(12)?,
                },
            })
        })?;

        let mut ranking = Vec::new();
        for row in rows {
            ranking.push(row?);
        }
        Ok(ranking)
    }

    fn row_to_athlete(&self, row: &Row) -> rusqlite::Result<Athlete> {
        Ok(Athlete {
            athlete_id: AthleteId::new(row.get(0)?),
            name: row.get(1)?,
            position: row.get(2)?,
            external_id: row.get::<_, Option<u32>>(3)?.map(ExternalId::new),
            club_id: row.get(4)?,
            nationality: row.get(5)?,
            age: row.get(6)?,
            total_goals: row.get(7)?,
            total_assists: row.get(8)?,
            total_appearances: row.get(9)?,
            total_yellow_cards: row.get(10)?,
            total_red_cards: row.get(11)?,
            total_tackles: row.get(12)?,
            pillars: PillarScores {
                technical: row.get(13)?,
                tactical: row.get(14)?,
                physical: row.get(15)?,
                psychological: row.get(16)?,
            },
            synced_at: row.get(17)?,
        })
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
