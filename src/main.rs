//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use scoutia::{
    cli::{Commands, ScoutIA},
    commands::{
        athlete::{handle_athlete, handle_link, handle_remove, AthleteParams},
        market::{handle_import, handle_search, ImportParams, SearchParams},
        report::{handle_analyze, AnalyzeParams},
        roster::{handle_add, handle_roster},
        sync::{handle_sync, SyncParams},
    },
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scoutia=warn")),
        )
        .init();

    let app = ScoutIA::parse();

    match app.command {
        Commands::Roster { json, verbose } => handle_roster(json, verbose)?,

        Commands::Add {
            name,
            position,
            nationality,
            age,
        } => handle_add(name, position, nationality, age)?,

        Commands::Search {
            query,
            league,
            json,
            refresh,
            verbose,
        } => {
            handle_search(SearchParams {
                query,
                league,
                as_json: json,
                refresh,
                verbose,
            })
            .await?
        }

        Commands::Import {
            query,
            league,
            pick,
            refresh,
            verbose,
        } => {
            handle_import(ImportParams {
                query,
                league,
                pick,
                refresh,
                verbose,
            })
            .await?
        }

        Commands::Sync {
            athlete,
            all,
            season,
            refresh,
            verbose,
        } => {
            handle_sync(SyncParams {
                athlete,
                all,
                season,
                refresh,
                verbose,
            })
            .await?
        }

        Commands::Athlete {
            id,
            season,
            json,
            refresh,
            verbose,
        } => {
            handle_athlete(AthleteParams {
                id,
                season,
                as_json: json,
                refresh,
                verbose,
            })
            .await?
        }

        Commands::Link { id, external_id } => handle_link(id, external_id)?,

        Commands::Remove { id } => handle_remove(id)?,

        Commands::Analyze {
            text,
            file,
            athlete,
            psych,
            json,
        } => {
            handle_analyze(AnalyzeParams {
                text,
                file,
                athlete,
                psych,
                as_json: json,
            })
            .await?
        }
    }

    Ok(())
}
