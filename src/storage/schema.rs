//! Database schema and connection management

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScoutError};

/// Environment variable overriding the default database location.
pub const DB_PATH_ENV_VAR: &str = "SCOUTIA_DB_PATH";

/// Database connection manager for roster, club, and report data.
pub struct ScoutDatabase {
    pub(crate) conn: Connection,
}

impl ScoutDatabase {
    /// Open the database at the default (or `SCOUTIA_DB_PATH`) location
    /// and ensure the schema exists.
    pub fn new() -> Result<Self> {
        let db_path = Self::database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Self::open_at(&db_path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Resolve the database file path: `SCOUTIA_DB_PATH` if set, otherwise
    /// `<cache dir>/scoutia/scoutia.db`.
    pub fn database_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        let cache_dir = dirs::cache_dir().ok_or_else(|| ScoutError::Cache {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("scoutia").join("scoutia.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // Report rows must disappear with their athlete.
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS clubs (
                club_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS athletes (
                athlete_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                external_id INTEGER UNIQUE,
                club_id INTEGER REFERENCES clubs(club_id),
                nationality TEXT,
                age INTEGER,
                total_goals INTEGER NOT NULL DEFAULT 0,
                total_assists INTEGER NOT NULL DEFAULT 0,
                total_appearances INTEGER NOT NULL DEFAULT 0,
                total_yellow_cards INTEGER NOT NULL DEFAULT 0,
                total_red_cards INTEGER NOT NULL DEFAULT 0,
                total_tackles INTEGER NOT NULL DEFAULT 0,
                technical REAL NOT NULL DEFAULT 0,
                tactical REAL NOT NULL DEFAULT 0,
                physical REAL NOT NULL DEFAULT 0,
                psychological REAL NOT NULL DEFAULT 0,
                synced_at INTEGER
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS scout_reports (
                report_id INTEGER PRIMARY KEY,
                athlete_id INTEGER NOT NULL
                    REFERENCES athletes(athlete_id) ON DELETE CASCADE,
                club_id INTEGER REFERENCES clubs(club_id),
                observed_on TEXT NOT NULL,
                notes TEXT,
                technical REAL NOT NULL,
                tactical REAL NOT NULL,
                physical REAL NOT NULL,
                psychological REAL NOT NULL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_reports_athlete
             ON scout_reports(athlete_id)",
            [],
        )?;

        // Pre-joined ranking data for the dashboard.
        self.conn.execute(
            "CREATE VIEW IF NOT EXISTS v_roster_ranking AS
             SELECT a.athlete_id,
                    a.name,
                    a.position,
                    c.name AS club,
                    a.external_id,
                    a.total_goals,
                    a.total_assists,
                    a.total_appearances,
                    COUNT(r.report_id) AS report_count,
                    COALESCE(AVG(r.technical), 0) AS avg_technical,
                    COALESCE(AVG(r.tactical), 0) AS avg_tactical,
                    COALESCE(AVG(r.physical), 0) AS avg_physical,
                    COALESCE(AVG(r.psychological), 0) AS avg_psychological
             FROM athletes a
             LEFT JOIN clubs c ON c.club_id = a.club_id
             LEFT JOIN scout_reports r ON r.athlete_id = a.athlete_id
             GROUP BY a.athlete_id",
            [],
        )?;

        Ok(())
    }
}
