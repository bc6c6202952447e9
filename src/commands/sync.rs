//! Provider sync: season statistics into the roster table.
//!
//! One athlete or the whole roster. The fetch/aggregate half runs
//! concurrently per athlete during a sync-all; database writes are
//! applied on the main task as results land. A failing athlete is
//! reported and skipped, never aborting the batch.

use tokio::task::JoinSet;

use super::common::CommandContext;
use crate::cli::types::{AthleteId, ExternalId, Position, Season};
use crate::error::ScoutError;
use crate::football::aggregate::{aggregate_season, pillar_scores, PillarScores, SeasonTotals};
use crate::football::{ApiFootballClient, CacheStatus};
use crate::storage::{Athlete, SyncedProfile};
use crate::Result;

/// Configuration for the sync command.
#[derive(Debug)]
pub struct SyncParams {
    pub athlete: Option<AthleteId>,
    pub all: bool,
    pub season: Season,
    pub refresh: bool,
    pub verbose: bool,
}

/// Provider-side result of one athlete's sync, before any database write.
struct FetchedProfile {
    external_id: ExternalId,
    name: String,
    position: Position,
    club_name: Option<String>,
    nationality: Option<String>,
    age: Option<u8>,
    totals: SeasonTotals,
    pillars: PillarScores,
    cache_status: CacheStatus,
}

fn cache_status_label(status: CacheStatus) -> &'static str {
    match status {
        CacheStatus::Hit => "from cache",
        CacheStatus::Miss => "cache miss",
        CacheStatus::Refreshed => "refreshed",
    }
}

pub async fn handle_sync(params: SyncParams) -> Result<()> {
    let mut ctx = CommandContext::new(params.verbose)?;

    if params.all {
        sync_all(&mut ctx, params.season, params.refresh, params.verbose).await
    } else if let Some(id) = params.athlete {
        sync_one(&mut ctx, id, params.season, params.refresh, params.verbose).await
    } else {
        println!("Nothing to sync: pass --athlete <id> or --all.");
        Ok(())
    }
}

async fn sync_one(
    ctx: &mut CommandContext,
    id: AthleteId,
    season: Season,
    refresh: bool,
    verbose: bool,
) -> Result<()> {
    let athlete = ctx
        .db
        .get_athlete(id)?
        .ok_or(ScoutError::AthleteNotFound { id: id.as_i64() })?;

    let external_id = athlete
        .external_id
        .ok_or_else(|| ScoutError::NoExternalId {
            name: athlete.name.clone(),
        })?;

    if verbose {
        println!(
            "Fetching season {} statistics for {}...",
            season.as_u16(),
            athlete.name
        );
    }

    let fetched = fetch_profile(&ctx.football, external_id, &athlete.name, season, refresh).await?;
    let totals = fetched.totals;
    let status = fetched.cache_status;
    apply_profile(ctx, fetched)?;

    println!(
        "✓ {} synced ({}): {} goals, {} assists in {} appearances (rating {:.2})",
        athlete.name,
        cache_status_label(status),
        totals.goals,
        totals.assists,
        totals.appearances,
        totals.rating
    );
    Ok(())
}

async fn sync_all(
    ctx: &mut CommandContext,
    season: Season,
    refresh: bool,
    verbose: bool,
) -> Result<()> {
    let athletes = ctx.db.list_athletes()?;
    let targets: Vec<Athlete> = athletes
        .into_iter()
        .filter(|a| a.external_id.is_some())
        .collect();

    if targets.is_empty() {
        println!("No athletes with a linked provider id to sync.");
        return Ok(());
    }

    println!(
        "Syncing {} athlete(s) for season {}...",
        targets.len(),
        season.as_u16()
    );

    let mut tasks = JoinSet::new();
    for athlete in targets.iter() {
        let Some(external_id) = athlete.external_id else {
            continue;
        };
        let client = ctx.football.clone();
        let name = athlete.name.clone();

        tasks.spawn(async move {
            let result = fetch_profile(&client, external_id, &name, season, refresh).await;
            (name, result)
        });
    }

    let total = targets.len();
    let mut synced = 0usize;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(fetched))) => {
                let status = fetched.cache_status;
                match apply_profile(ctx, fetched) {
                    Ok(()) => {
                        if verbose {
                            println!("✓ {name} synced ({})", cache_status_label(status));
                        }
                        synced += 1;
                    }
                    Err(err) => {
                        tracing::warn!(athlete = %name, error = %err, "sync write failed");
                        println!("⚠ {name}: {err}");
                    }
                }
            }
            Ok((name, Err(err))) => {
                tracing::warn!(athlete = %name, error = %err, "sync fetch failed");
                println!("⚠ {name}: {err}");
            }
            Err(join_err) => {
                tracing::warn!(error = %join_err, "sync task panicked");
            }
        }
    }

    println!("✓ Sync complete: {synced} of {total} athlete(s) updated.");
    Ok(())
}

/// Fetch and reduce one athlete's season from the provider. No database
/// access; safe to run concurrently.
async fn fetch_profile(
    client: &ApiFootballClient,
    external_id: ExternalId,
    fallback_name: &str,
    season: Season,
    refresh: bool,
) -> Result<FetchedProfile> {
    let (entry, cache_status) = client
        .player_statistics(external_id, season, refresh)
        .await?;
    let entry = entry.ok_or_else(|| ScoutError::NoData {
        endpoint: format!("/players?id={external_id}"),
    })?;

    let totals = aggregate_season(&entry.statistics);
    let pillars = pillar_scores(totals.rating);

    let club_name = entry
        .statistics
        .iter()
        .find_map(|s| s.team.as_ref().and_then(|t| t.name.clone()));

    let position = entry
        .statistics
        .first()
        .and_then(|s| s.games.position.as_deref())
        .map(Position::from_provider_label)
        .unwrap_or(Position::Utility);

    let name = if entry.player.name.is_empty() {
        fallback_name.to_string()
    } else {
        entry.player.name
    };

    Ok(FetchedProfile {
        external_id,
        name,
        position,
        club_name,
        nationality: entry.player.nationality,
        age: entry.player.age,
        totals,
        pillars,
        cache_status,
    })
}

/// Resolve the club and upsert the rollup. An unresolvable club is fatal
/// for this athlete only.
fn apply_profile(ctx: &mut CommandContext, fetched: FetchedProfile) -> Result<()> {
    let club_name = fetched.club_name.ok_or_else(|| ScoutError::MissingClub {
        athlete: fetched.name.clone(),
    })?;
    let club_id = ctx.db.resolve_club(&club_name)?;

    ctx.db.upsert_synced(&SyncedProfile {
        external_id: fetched.external_id,
        name: fetched.name,
        position: fetched.position,
        club_id,
        nationality: fetched.nationality,
        age: fetched.age,
        totals: fetched.totals,
        pillars: fetched.pillars,
    })
}
