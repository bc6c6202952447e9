//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{AthleteId, ExternalId, LeagueId, Position, Season};

#[derive(Debug, Parser)]
#[clap(
    name = "scoutia",
    about = "ScoutIA Pro: roster ranking, market search, provider sync, and report analysis"
)]
pub struct ScoutIA {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the roster ranked by scouting-report averages.
    Roster {
        /// Output rows as JSON instead of a table.
        #[clap(long)]
        json: bool,

        /// Print progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Add a roster record by hand, without a provider search.
    Add {
        /// Athlete name.
        name: String,

        /// Playing position (GK, DF, MF, FW, UT).
        #[clap(long, short, default_value = "UT")]
        position: Position,

        /// Nationality label.
        #[clap(long)]
        nationality: Option<String>,

        /// Age in years.
        #[clap(long)]
        age: Option<u8>,
    },

    /// Search the stats provider for athletes by name.
    ///
    /// Unscoped searches fall back through the main leagues until one
    /// returns results.
    Search {
        /// Free-text name query (diacritics are stripped).
        query: String,

        /// Restrict the search to one provider league id.
        #[clap(long, short)]
        league: Option<LeagueId>,

        /// Output results as JSON.
        #[clap(long)]
        json: bool,

        /// Force refresh from the provider even if cached data exists.
        #[clap(long)]
        refresh: bool,

        /// Print progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Import a search result into the roster.
    Import {
        /// Free-text name query (diacritics are stripped).
        query: String,

        /// Restrict the search to one provider league id.
        #[clap(long, short)]
        league: Option<LeagueId>,

        /// Zero-based index into the search results.
        #[clap(long, default_value_t = 0)]
        pick: usize,

        /// Force refresh from the provider even if cached data exists.
        #[clap(long)]
        refresh: bool,

        /// Print progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Pull season statistics from the provider into the roster.
    Sync {
        /// Roster athlete id to sync.
        #[clap(long, short, conflicts_with = "all", required_unless_present = "all")]
        athlete: Option<AthleteId>,

        /// Sync every athlete with a linked provider id.
        #[clap(long)]
        all: bool,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Force refresh from the provider even if cached data exists.
        #[clap(long)]
        refresh: bool,

        /// Show per-athlete progress.
        #[clap(long)]
        verbose: bool,
    },

    /// Show one athlete's full profile.
    ///
    /// Pillar scores and totals from the roster, season statistics,
    /// injury and transfer history from the provider, saved reports.
    Athlete {
        /// Roster athlete id.
        id: AthleteId,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Output the profile as JSON.
        #[clap(long)]
        json: bool,

        /// Force refresh from the provider even if cached data exists.
        #[clap(long)]
        refresh: bool,

        /// Print progress information.
        #[clap(long)]
        verbose: bool,
    },

    /// Link a roster record to a provider player id.
    Link {
        /// Roster athlete id.
        id: AthleteId,

        /// Provider player id.
        external_id: ExternalId,
    },

    /// Remove a roster record and its reports.
    Remove {
        /// Roster athlete id.
        id: AthleteId,
    },

    /// Analyze a free-text scouting report with the LLM analyst.
    Analyze {
        /// Report text; omit to read from --file.
        text: Option<String>,

        /// Read the report text from a file.
        #[clap(long, short)]
        file: Option<PathBuf>,

        /// Save the derived scores as a report for this athlete.
        #[clap(long, short)]
        athlete: Option<AthleteId>,

        /// Also produce a psychological profile.
        #[clap(long)]
        psych: bool,

        /// Output the analysis as JSON.
        #[clap(long)]
        json: bool,
    },
}
