//! Single-athlete profile: pillars, provider statistics, injuries,
//! transfers, and saved reports.

use serde_json::json;

use super::common::CommandContext;
use crate::cli::types::{AthleteId, ExternalId, Season};
use crate::error::ScoutError;
use crate::football::types::{InjuryEntry, PlayerEntry, TransferMove};
use crate::football::ApiFootballClient;
use crate::storage::ScoutDatabase;
use crate::Result;

/// Configuration for the athlete profile command.
#[derive(Debug)]
pub struct AthleteParams {
    pub id: AthleteId,
    pub season: Season,
    pub as_json: bool,
    pub refresh: bool,
    pub verbose: bool,
}

/// Provider-side sections of the profile. Each section degrades to empty
/// on failure so a flaky endpoint cannot blank the whole profile.
struct ApiBundle {
    stats: Option<PlayerEntry>,
    injuries: Vec<InjuryEntry>,
    transfers: Vec<TransferMove>,
}

pub async fn handle_athlete(params: AthleteParams) -> Result<()> {
    let ctx = CommandContext::new(params.verbose)?;

    let athlete = ctx
        .db
        .get_athlete(params.id)?
        .ok_or(ScoutError::AthleteNotFound {
            id: params.id.as_i64(),
        })?;

    let bundle = match athlete.external_id {
        Some(external_id) => {
            fetch_bundle(&ctx.football, external_id, params.season, params.refresh).await
        }
        None => ApiBundle {
            stats: None,
            injuries: Vec::new(),
            transfers: Vec::new(),
        },
    };

    let reports = ctx.db.reports_for(params.id)?;

    if params.as_json {
        let value = json!({
            "athlete": athlete,
            "season": params.season,
            "statistics": bundle.stats,
            "injuries": bundle.injuries,
            "transfers": bundle.transfers,
            "reports": reports,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", athlete.name, athlete.position);
    if let Some(nationality) = &athlete.nationality {
        println!("Nationality: {nationality}");
    }
    if let Some(age) = athlete.age {
        println!("Age: {age}");
    }
    println!(
        "Pillars: technical {:.1} | tactical {:.1} | physical {:.1} | psychological {:.1}",
        athlete.pillars.technical,
        athlete.pillars.tactical,
        athlete.pillars.physical,
        athlete.pillars.psychological,
    );
    println!(
        "Season totals: {} goals, {} assists, {} appearances, {}/{} cards, {} tackles",
        athlete.total_goals,
        athlete.total_assists,
        athlete.total_appearances,
        athlete.total_yellow_cards,
        athlete.total_red_cards,
        athlete.total_tackles,
    );

    if athlete.external_id.is_none() {
        println!("\nNo linked provider id; run `scoutia link {} <external-id>`.", params.id);
    }

    if let Some(stats) = &bundle.stats {
        println!("\nSeason {} by competition:", params.season.as_u16());
        for comp in &stats.statistics {
            let league = comp
                .league
                .as_ref()
                .and_then(|l| l.name.as_deref())
                .unwrap_or("Unknown competition");
            println!(
                "  {:<28} {:>2} apps {:>2} goals {:>2} assists rating {}",
                league,
                comp.games.appearances.unwrap_or(0),
                comp.goals.total.unwrap_or(0),
                comp.goals.assists.unwrap_or(0),
                comp.games
                    .rating
                    .map(|r| format!("{r:.2}"))
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
    }

    if !bundle.injuries.is_empty() {
        println!("\nInjury history:");
        for injury in &bundle.injuries {
            println!(
                "  {:<12} {:<24} {}",
                injury
                    .fixture
                    .as_ref()
                    .and_then(|f| f.date.as_deref())
                    .map(|d| &d[..d.len().min(10)])
                    .unwrap_or("-"),
                injury.player.reason.as_deref().unwrap_or("Unspecified"),
                injury.player.kind.as_deref().unwrap_or(""),
            );
        }
    }

    if !bundle.transfers.is_empty() {
        println!("\nTransfer history:");
        for transfer in &bundle.transfers {
            let (from, to) = transfer
                .teams
                .as_ref()
                .map(|t| {
                    (
                        t.left.as_ref().and_then(|c| c.name.as_deref()).unwrap_or("-"),
                        t.joined.as_ref().and_then(|c| c.name.as_deref()).unwrap_or("-"),
                    )
                })
                .unwrap_or(("-", "-"));
            println!(
                "  {:<12} {} -> {} ({})",
                transfer.date.as_deref().unwrap_or("-"),
                from,
                to,
                transfer.kind.as_deref().unwrap_or("undisclosed"),
            );
        }
    }

    if !reports.is_empty() {
        println!("\nScouting reports ({}):", reports.len());
        for report in &reports {
            println!(
                "  {}  T {:.1} / Ta {:.1} / Ph {:.1} / Ps {:.1}  {}",
                report.observed_on,
                report.scores.technical,
                report.scores.tactical,
                report.scores.physical,
                report.scores.psychological,
                report.notes.as_deref().unwrap_or(""),
            );
        }
    }

    Ok(())
}

/// Fetch the three provider sections, downgrading each failure to an
/// empty section with a warning.
async fn fetch_bundle(
    client: &ApiFootballClient,
    external_id: ExternalId,
    season: Season,
    refresh: bool,
) -> ApiBundle {
    let stats = match client.player_statistics(external_id, season, refresh).await {
        Ok((stats, _)) => stats,
        Err(err) => {
            tracing::warn!(%external_id, error = %err, "statistics fetch failed");
            println!("⚠ Could not fetch season statistics: {err}");
            None
        }
    };

    let injuries = match client.injuries(external_id, refresh).await {
        Ok(injuries) => injuries,
        Err(err) => {
            tracing::warn!(%external_id, error = %err, "injury fetch failed");
            Vec::new()
        }
    };

    let transfers = match client.transfers(external_id, refresh).await {
        Ok(transfers) => transfers,
        Err(err) => {
            tracing::warn!(%external_id, error = %err, "transfer fetch failed");
            Vec::new()
        }
    };

    ApiBundle {
        stats,
        injuries,
        transfers,
    }
}

/// Link a roster record to a provider player id.
pub fn handle_link(id: AthleteId, external_id: ExternalId) -> Result<()> {
    let mut db = ScoutDatabase::new()?;
    db.set_external_id(id, external_id)?;
    println!("✓ Athlete #{id} linked to provider id {external_id}.");
    Ok(())
}

/// Remove a roster record; its reports are deleted with it.
pub fn handle_remove(id: AthleteId) -> Result<()> {
    let mut db = ScoutDatabase::new()?;
    if db.delete_athlete(id)? {
        println!("✓ Athlete #{id} removed, along with their reports.");
    } else {
        println!("⚠ No athlete #{id} in the roster.");
    }
    Ok(())
}
