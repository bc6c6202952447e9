//! LLM-backed scouting report analysis.
//!
//! Single-turn chat completions against an OpenAI-compatible endpoint
//! (Groq by default). The system prompts demand bare JSON; the model
//! still wraps it in markdown fences often enough that we strip them
//! before parsing. Anything that fails to parse into the typed output is
//! a [`ScoutError::LlmFormat`], never a silently-propagated default.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ScoutError};

/// OpenAI-compatible base path for the Groq API.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const TECHNICAL_SYSTEM_PROMPT: &str = "You are an elite football technical \
coordinator. Analyze the scouting report and return ONLY a valid JSON object: \
{ \"athlete\": \"string\", \"position\": \"string\", \
\"scores\": { \"technical\": 0.0, \"tactical\": 0.0, \"physical\": 0.0, \"psychological\": 0.0 }, \
\"summary\": \"max 80 words\" } \
Scores range from 0 to 10. NEVER use markdown. Return only the JSON object.";

const PSYCHOLOGY_SYSTEM_PROMPT: &str = "You are a sports psychology specialist \
with 20 years of experience. Analyze the scout's text and return ONLY a valid \
JSON object with: leadership (0-100), adaptability (0-100), resilience (0-100), \
tactical_intelligence (0-100), emotional_stability (0-100), \
temperament (up to 6 words), strengths (array), weaknesses (array), \
personality_tags (array), summary (max 120 words). \
NEVER use markdown. Return only the JSON object.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Four pillar scores derived from a free-text report, each in [0, 10].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportScores {
    pub technical: f64,
    pub tactical: f64,
    pub physical: f64,
    pub psychological: f64,
}

impl ReportScores {
    /// Clamp every score into [0, 10]; the model occasionally drifts.
    pub fn clamped(self) -> Self {
        Self {
            technical: self.technical.clamp(0.0, 10.0),
            tactical: self.tactical.clamp(0.0, 10.0),
            physical: self.physical.clamp(0.0, 10.0),
            psychological: self.psychological.clamp(0.0, 10.0),
        }
    }
}

/// Structured output of the technical analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysis {
    #[serde(default)]
    pub athlete: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    pub scores: ReportScores,
    pub summary: String,
}

/// Structured output of the psychological profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychProfile {
    pub leadership: u8,
    pub adaptability: u8,
    pub resilience: u8,
    pub tactical_intelligence: u8,
    pub emotional_stability: u8,
    pub temperament: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub personality_tags: Vec<String>,
    pub summary: String,
}

/// Client for the analysis endpoint. Constructed per command; the API key
/// lives in the default headers.
pub struct ScoutAnalyst {
    http: Client,
    base_url: String,
    model: String,
}

impl ScoutAnalyst {
    pub fn new(api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: GROQ_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the analyst at a different endpoint (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Convert a free-text scouting report into four pillar scores plus a
    /// short summary.
    pub async fn analyze_report(&self, report_text: &str) -> Result<ReportAnalysis> {
        let user = format!("Report for analysis: {report_text}");
        let raw = self.complete(TECHNICAL_SYSTEM_PROMPT, &user, 512).await?;
        let mut analysis: ReportAnalysis = parse_model_json(&raw)?;
        analysis.scores = analysis.scores.clamped();
        Ok(analysis)
    }

    /// Produce a psychological profile from the same report text.
    pub async fn profile_psychology(&self, report_text: &str) -> Result<PsychProfile> {
        let user = format!("Text for analysis: {report_text}");
        let raw = self.complete(PSYCHOLOGY_SYSTEM_PROMPT, &user, 1024).await?;
        parse_model_json(&raw)
    }

    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.4,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response: ChatResponse = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ScoutError::LlmFormat {
                detail: "completion had no choices".to_string(),
            })
    }
}

/// Strip markdown fences and parse the model's output into `T`.
fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(&cleaned).map_err(|err| ScoutError::LlmFormat {
        detail: format!("{err}; output started with: {}", head(&cleaned, 80)),
    })
}

fn strip_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn head(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_variants() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_report_analysis() {
        let raw = r#"```json
        {
          "athlete": "K. Mbappé",
          "position": "Attacker",
          "scores": { "technical": 9.2, "tactical": 8.1, "physical": 9.5, "psychological": 7.8 },
          "summary": "Explosive forward with elite acceleration."
        }
        ```"#;

        let analysis: ReportAnalysis = parse_model_json(raw).unwrap();
        assert_eq!(analysis.athlete.as_deref(), Some("K. Mbappé"));
        assert_eq!(analysis.scores.technical, 9.2);
    }

    #[test]
    fn test_parse_rejects_prose() {
        let err = parse_model_json::<ReportAnalysis>("Sure! Here is the analysis you asked for.")
            .unwrap_err();
        match err {
            ScoutError::LlmFormat { detail } => {
                assert!(detail.contains("Sure!"));
            }
            other => panic!("expected LlmFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_scores_clamped() {
        let scores = ReportScores {
            technical: 11.0,
            tactical: -1.0,
            physical: 5.0,
            psychological: 10.0,
        }
        .clamped();
        assert_eq!(scores.technical, 10.0);
        assert_eq!(scores.tactical, 0.0);
        assert_eq!(scores.physical, 5.0);
        assert_eq!(scores.psychological, 10.0);
    }

    #[test]
    fn test_parse_psych_profile() {
        let raw = r#"{
            "leadership": 82, "adaptability": 74, "resilience": 90,
            "tactical_intelligence": 77, "emotional_stability": 68,
            "temperament": "driven, occasionally volatile",
            "strengths": ["composure under pressure"],
            "weaknesses": ["frustration when isolated"],
            "personality_tags": ["competitor"],
            "summary": "High-drive profile."
        }"#;

        let profile: PsychProfile = parse_model_json(raw).unwrap();
        assert_eq!(profile.resilience, 90);
        assert_eq!(profile.strengths.len(), 1);
    }
}
