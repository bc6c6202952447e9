//! Integration tests for command-level helpers

use scoutia::{commands::require_env_key, ScoutError};

#[test]
fn test_require_env_key_present() {
    std::env::set_var("SCOUTIA_TEST_KEY_PRESENT", "abc123");

    let result = require_env_key("SCOUTIA_TEST_KEY_PRESENT");
    assert_eq!(result.unwrap(), "abc123");

    std::env::remove_var("SCOUTIA_TEST_KEY_PRESENT");
}

#[test]
fn test_require_env_key_missing() {
    std::env::remove_var("SCOUTIA_TEST_KEY_MISSING");

    let result = require_env_key("SCOUTIA_TEST_KEY_MISSING");
    match result.unwrap_err() {
        ScoutError::MissingApiKey { env_var } => {
            assert_eq!(env_var, "SCOUTIA_TEST_KEY_MISSING");
        }
        other => panic!("Expected MissingApiKey error, got {other:?}"),
    }
}

#[test]
fn test_require_env_key_blank_is_missing() {
    std::env::set_var("SCOUTIA_TEST_KEY_BLANK", "   ");

    let result = require_env_key("SCOUTIA_TEST_KEY_BLANK");
    assert!(matches!(
        result.unwrap_err(),
        ScoutError::MissingApiKey { .. }
    ));

    std::env::remove_var("SCOUTIA_TEST_KEY_BLANK");
}
