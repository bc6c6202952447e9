//! Error types for the ScoutIA Pro CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoutError>;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("API key not provided and {env_var} environment variable not set")]
    MissingApiKey { env_var: String },

    #[error("provider returned no usable data for {endpoint}")]
    NoData { endpoint: String },

    #[error("athlete #{id} not found in the roster")]
    AthleteNotFound { id: i64 },

    #[error("athlete \"{name}\" has no linked provider id")]
    NoExternalId { name: String },

    #[error("could not resolve a club for \"{athlete}\"; sync requires a club reference")]
    MissingClub { athlete: String },

    #[error("analyst model returned unusable output: {detail}")]
    LlmFormat { detail: String },

    #[error("selection {index} is out of range; the search returned {available} result(s)")]
    InvalidSelection { index: usize, available: usize },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("cache error: {message}")]
    Cache { message: String },
}
