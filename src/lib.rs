//! ScoutIA Pro CLI Library
//!
//! A Rust library and CLI for a football club's scouting department,
//! backed by the API-Football statistics provider, an LLM report
//! analyst, and a local SQLite store.
//!
//! ## Features
//!
//! - **Roster Ranking**: athletes ranked by scouting-report averages
//! - **Market Search**: provider search with diacritic-stripped queries
//!   and league fallback, plus one-command import
//! - **Stats Sync**: cache-aside provider fetches aggregated into season
//!   totals and the four performance-pillar scores
//! - **Report Analysis**: free-text scouting reports converted to
//!   structured ratings by an LLM, saved as immutable report rows
//! - **Athlete Profiles**: statistics, injuries, and transfer history in
//!   one view
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scoutia::{AthleteId, Season, commands::sync::{handle_sync, SyncParams}};
//!
//! # async fn example() -> scoutia::Result<()> {
//! // Sync one athlete's season statistics into the roster.
//! let params = SyncParams {
//!     athlete: Some(AthleteId::new(1)),
//!     all: false,
//!     season: Season::default(),
//!     refresh: false,
//!     verbose: false,
//! };
//!
//! handle_sync(params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export SCOUTIA_FOOTBALL_API_KEY=...   # API-Football key
//! export SCOUTIA_GROQ_API_KEY=...       # LLM analyst key
//! export SCOUTIA_CACHE_TTL_HOURS=24     # optional cache freshness window
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod football;
pub mod llm;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{AthleteId, ExternalId, LeagueId, Position, Season};
pub use error::{Result, ScoutError};
pub use football::{ApiFootballClient, CacheStatus, CacheStore};

pub const FOOTBALL_API_KEY_ENV_VAR: &str = "SCOUTIA_FOOTBALL_API_KEY";
pub const LLM_API_KEY_ENV_VAR: &str = "SCOUTIA_GROQ_API_KEY";
pub const CACHE_TTL_ENV_VAR: &str = "SCOUTIA_CACHE_TTL_HOURS";
