//! Market search and roster import.

use serde_json::json;

use super::common::CommandContext;
use crate::cli::types::{LeagueId, Position};
use crate::error::ScoutError;
use crate::football::types::PlayerEntry;
use crate::storage::NewAthlete;
use crate::{ExternalId, Result};

/// Configuration for the market search command.
#[derive(Debug)]
pub struct SearchParams {
    pub query: String,
    pub league: Option<LeagueId>,
    pub as_json: bool,
    pub refresh: bool,
    pub verbose: bool,
}

/// Search the provider and print the results.
pub async fn handle_search(params: SearchParams) -> Result<()> {
    let ctx = CommandContext::new(params.verbose)?;

    let results = ctx
        .football
        .search_players(&params.query, params.league, params.refresh)
        .await?;

    if params.as_json {
        let rows: Vec<_> = results.iter().map(entry_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No athletes found for \"{}\".", params.query);
        return Ok(());
    }

    println!("Found {} athlete(s) for \"{}\":", results.len(), params.query);
    for (index, entry) in results.iter().enumerate() {
        let first = entry.statistics.first();
        let team = first
            .and_then(|s| s.team.as_ref())
            .and_then(|t| t.name.as_deref())
            .unwrap_or("-");
        let position = first
            .and_then(|s| s.games.position.as_deref())
            .unwrap_or("-");

        println!(
            "{:<4} {:<26} {:<12} {:<22} age {:<3} {}",
            index,
            entry.player.name,
            position,
            team,
            entry
                .player
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| "?".to_string()),
            entry.player.nationality.as_deref().unwrap_or("-"),
        );
    }
    println!("\nImport one with `scoutia import \"{}\" --pick <index>`.", params.query);

    Ok(())
}

/// Configuration for the import command.
#[derive(Debug)]
pub struct ImportParams {
    pub query: String,
    pub league: Option<LeagueId>,
    pub pick: usize,
    pub refresh: bool,
    pub verbose: bool,
}

/// Import one search result into the roster.
///
/// Re-importing an athlete that is already monitored is reported, not an
/// error. The provider's position label maps through the static table,
/// falling back to the generic position when unmapped.
pub async fn handle_import(params: ImportParams) -> Result<()> {
    let mut ctx = CommandContext::new(params.verbose)?;

    let results = ctx
        .football
        .search_players(&params.query, params.league, params.refresh)
        .await?;

    if results.is_empty() {
        println!("No athletes found for \"{}\"; nothing to import.", params.query);
        return Ok(());
    }

    let entry = results
        .get(params.pick)
        .ok_or(ScoutError::InvalidSelection {
            index: params.pick,
            available: results.len(),
        })?;

    let external_id = ExternalId::new(entry.player.id);
    if let Some(existing) = ctx.db.find_by_external_id(external_id)? {
        println!(
            "⚠ {} is already being monitored (athlete #{}).",
            existing.name, existing.athlete_id
        );
        return Ok(());
    }

    let athlete = new_athlete_from_entry(entry);
    let athlete_id = ctx.db.insert_athlete(&athlete)?;

    println!(
        "✓ {} imported into the roster as athlete #{} ({}).",
        athlete.name,
        athlete_id,
        athlete.position.code()
    );
    println!("Run `scoutia sync -a {athlete_id}` to pull season statistics.");

    Ok(())
}

/// Map one provider search entry onto a new roster record.
pub fn new_athlete_from_entry(entry: &PlayerEntry) -> NewAthlete {
    let position = entry
        .statistics
        .first()
        .and_then(|s| s.games.position.as_deref())
        .map(Position::from_provider_label)
        .unwrap_or(Position::Utility);

    NewAthlete {
        name: entry.player.name.clone(),
        position,
        external_id: Some(ExternalId::new(entry.player.id)),
        nationality: entry.player.nationality.clone(),
        age: entry.player.age,
    }
}

fn entry_json(entry: &PlayerEntry) -> serde_json::Value {
    let first = entry.statistics.first();
    json!({
        "external_id": entry.player.id,
        "name": &entry.player.name,
        "age": entry.player.age,
        "nationality": &entry.player.nationality,
        "team": first.and_then(|s| s.team.as_ref()).and_then(|t| t.name.clone()),
        "position": first.and_then(|s| s.games.position.clone()),
    })
}
