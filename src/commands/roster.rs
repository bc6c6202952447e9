//! Ranked roster dashboard and manual roster entry.

use serde_json::json;

use crate::cli::types::Position;
use crate::storage::{NewAthlete, RankingRow, ScoutDatabase};
use crate::Result;

/// Print the roster ranked by the mean of the four report-score averages.
pub fn handle_roster(as_json: bool, verbose: bool) -> Result<()> {
    if verbose {
        println!("Connecting to database...");
    }
    let db = ScoutDatabase::new()?;
    let ranking = db.ranking()?;

    if as_json {
        let rows: Vec<_> = ranking.iter().map(ranking_row_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ranking.is_empty() {
        println!("The roster is empty. Import athletes with `scoutia import`.");
        return Ok(());
    }

    println!(
        "{:<4} {:<24} {:<4} {:<20} {:>7} {:>5} {:>5} {:>5} {:>7}",
        "#", "Name", "Pos", "Club", "Score", "G", "A", "Apps", "Reports"
    );
    for (rank, row) in ranking.iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<4} {:<20} {:>7.1} {:>5} {:>5} {:>5} {:>7}",
            rank + 1,
            row.name,
            row.position,
            row.club.as_deref().unwrap_or("-"),
            row.overall(),
            row.total_goals,
            row.total_assists,
            row.total_appearances,
            row.report_count,
        );
    }

    Ok(())
}

/// Add a roster record by hand, without a provider search.
///
/// The record has no linked provider id until `scoutia link` sets one.
pub fn handle_add(
    name: String,
    position: Position,
    nationality: Option<String>,
    age: Option<u8>,
) -> Result<()> {
    let mut db = ScoutDatabase::new()?;

    let athlete_id = db.insert_athlete(&NewAthlete {
        name: name.clone(),
        position,
        external_id: None,
        nationality,
        age,
    })?;

    println!("✓ {name} added to the roster as athlete #{athlete_id}.");
    println!("Link a provider id with `scoutia link {athlete_id} <external-id>` to enable sync.");
    Ok(())
}

fn ranking_row_json(row: &RankingRow) -> serde_json::Value {
    json!({
        "athlete_id": row.athlete_id,
        "name": &row.name,
        "position": &row.position,
        "club": &row.club,
        "external_id": row.external_id,
        "overall": row.overall(),
        "averages": row.averages,
        "total_goals": row.total_goals,
        "total_assists": row.total_assists,
        "total_appearances": row.total_appearances,
        "report_count": row.report_count,
    })
}
