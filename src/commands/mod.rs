//! Command handlers for the ScoutIA Pro CLI.

pub mod athlete;
pub mod common;
pub mod market;
pub mod report;
pub mod roster;
pub mod sync;

use crate::error::{Result, ScoutError};

/// Read a required API key from the environment.
pub fn require_env_key(env_var: &str) -> Result<String> {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ScoutError::MissingApiKey {
            env_var: env_var.to_string(),
        })
}
