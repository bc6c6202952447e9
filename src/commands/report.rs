//! Scouting report analysis: free text in, pillar scores out.

use std::path::PathBuf;

use serde_json::json;

use super::require_env_key;
use crate::cli::types::AthleteId;
use crate::error::ScoutError;
use crate::football::aggregate::PillarScores;
use crate::llm::{ReportAnalysis, ScoutAnalyst};
use crate::storage::{NewReport, ScoutDatabase};
use crate::{Result, LLM_API_KEY_ENV_VAR};

/// Configuration for the analyze command.
#[derive(Debug)]
pub struct AnalyzeParams {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub athlete: Option<AthleteId>,
    pub psych: bool,
    pub as_json: bool,
}

pub async fn handle_analyze(params: AnalyzeParams) -> Result<()> {
    let report_text = match (params.text, params.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    if report_text.trim().is_empty() {
        println!("Nothing to analyze: pass the report text or --file <path>.");
        return Ok(());
    }

    let analyst = ScoutAnalyst::new(&require_env_key(LLM_API_KEY_ENV_VAR)?)?;

    println!("Analyzing report...");
    let analysis = analyst.analyze_report(&report_text).await?;

    let psych = if params.psych {
        Some(analyst.profile_psychology(&report_text).await?)
    } else {
        None
    };

    if params.as_json {
        let value = json!({
            "analysis": &analysis,
            "psychology": &psych,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_analysis(&analysis);
        if let Some(profile) = &psych {
            println!("\nPsychological profile:");
            println!(
                "  leadership {:>3} | adaptability {:>3} | resilience {:>3} | tactical IQ {:>3} | stability {:>3}",
                profile.leadership,
                profile.adaptability,
                profile.resilience,
                profile.tactical_intelligence,
                profile.emotional_stability,
            );
            println!("  Temperament: {}", profile.temperament);
            if !profile.strengths.is_empty() {
                println!("  Strengths: {}", profile.strengths.join("; "));
            }
            if !profile.weaknesses.is_empty() {
                println!("  Weaknesses: {}", profile.weaknesses.join("; "));
            }
            println!("  {}", profile.summary);
        }
    }

    if let Some(athlete_id) = params.athlete {
        save_report(athlete_id, &analysis)?;
    }

    Ok(())
}

fn print_analysis(analysis: &ReportAnalysis) {
    if let Some(athlete) = &analysis.athlete {
        println!("Athlete: {athlete}");
    }
    if let Some(position) = &analysis.position {
        println!("Position: {position}");
    }
    println!(
        "Scores: technical {:.1} | tactical {:.1} | physical {:.1} | psychological {:.1}",
        analysis.scores.technical,
        analysis.scores.tactical,
        analysis.scores.physical,
        analysis.scores.psychological,
    );
    println!("{}", analysis.summary);
}

/// Persist the derived scores as an immutable report row dated today.
fn save_report(athlete_id: AthleteId, analysis: &ReportAnalysis) -> Result<()> {
    let mut db = ScoutDatabase::new()?;

    let athlete = db
        .get_athlete(athlete_id)?
        .ok_or(ScoutError::AthleteNotFound {
            id: athlete_id.as_i64(),
        })?;

    let report_id = db.insert_report(&NewReport {
        athlete_id,
        club_id: athlete.club_id,
        observed_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
        notes: Some(analysis.summary.clone()),
        scores: PillarScores {
            technical: analysis.scores.technical,
            tactical: analysis.scores.tactical,
            physical: analysis.scores.physical,
            psychological: analysis.scores.psychological,
        },
    })?;

    println!("✓ Report #{report_id} saved for {}.", athlete.name);
    Ok(())
}
