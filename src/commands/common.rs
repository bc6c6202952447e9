//! Shared command context for provider-backed commands.

use std::time::Duration;

use super::require_env_key;
use crate::football::{ApiFootballClient, CacheStore};
use crate::storage::ScoutDatabase;
use crate::{Result, CACHE_TTL_ENV_VAR, FOOTBALL_API_KEY_ENV_VAR};

/// Context containing the resources most provider-backed commands need:
/// the roster database and a configured provider client. Both are
/// constructed here, at the command boundary, and passed down.
pub struct CommandContext {
    pub db: ScoutDatabase,
    pub football: ApiFootballClient,
}

impl CommandContext {
    pub fn new(verbose: bool) -> Result<Self> {
        if verbose {
            println!("Connecting to database...");
        }
        let db = ScoutDatabase::new()?;

        let api_key = require_env_key(FOOTBALL_API_KEY_ENV_VAR)?;
        // The cache table shares the database file but gets its own
        // connection so write-backs never contend with roster writes.
        let cache = CacheStore::open(&ScoutDatabase::database_path()?)?;
        let mut football = ApiFootballClient::new(&api_key, cache)?;

        if let Some(hours) = configured_ttl_hours() {
            football = football.with_ttl(Duration::from_secs(hours * 60 * 60));
        }

        Ok(Self { db, football })
    }
}

fn configured_ttl_hours() -> Option<u64> {
    let raw = std::env::var(CACHE_TTL_ENV_VAR).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(hours) if hours > 0 => Some(hours),
        _ => {
            tracing::warn!(value = %raw, "ignoring unparsable {}", CACHE_TTL_ENV_VAR);
            None
        }
    }
}
