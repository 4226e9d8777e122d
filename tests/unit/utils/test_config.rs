use portal_client::utils::config::{get_env_or_default, get_env_or_none};
use std::env;

#[test]
fn test_get_env_or_default_with_existing_var() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_STRING", "test_value");
        let result: String = get_env_or_default("PORTAL_TEST_VAR_STRING", "default".to_string());
        assert_eq!(result, "test_value");
        env::remove_var("PORTAL_TEST_VAR_STRING");
    }
}

#[test]
fn test_get_env_or_default_with_missing_var() {
    unsafe {
        env::remove_var("PORTAL_TEST_MISSING_VAR");
        let result: u64 = get_env_or_default("PORTAL_TEST_MISSING_VAR", 30_000);
        assert_eq!(result, 30_000);
    }
}

#[test]
fn test_get_env_or_default_trims_whitespace() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_PADDED", "  250 ");
        let result: u64 = get_env_or_default("PORTAL_TEST_VAR_PADDED", 0);
        assert_eq!(result, 250);
        env::remove_var("PORTAL_TEST_VAR_PADDED");
    }
}

#[test]
fn test_get_env_or_default_with_invalid_parse() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_INVALID", "not_a_number");
        let result: i64 = get_env_or_default("PORTAL_TEST_VAR_INVALID", 7);
        assert_eq!(result, 7);
        env::remove_var("PORTAL_TEST_VAR_INVALID");
    }
}

#[test]
fn test_get_env_or_default_with_bool() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_BOOL", "false");
        let result: bool = get_env_or_default("PORTAL_TEST_VAR_BOOL", true);
        assert!(!result);
        env::remove_var("PORTAL_TEST_VAR_BOOL");
    }
}

#[test]
fn test_get_env_or_none_with_existing_var() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_OPTION", "/tmp/tokens.json");
        let result: Option<String> = get_env_or_none("PORTAL_TEST_VAR_OPTION");
        assert_eq!(result.as_deref(), Some("/tmp/tokens.json"));
        env::remove_var("PORTAL_TEST_VAR_OPTION");
    }
}

#[test]
fn test_get_env_or_none_with_empty_var() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_EMPTY", "   ");
        let result: Option<String> = get_env_or_none("PORTAL_TEST_VAR_EMPTY");
        assert_eq!(result, None);
        env::remove_var("PORTAL_TEST_VAR_EMPTY");
    }
}

#[test]
fn test_get_env_or_none_with_invalid_parse() {
    unsafe {
        env::set_var("PORTAL_TEST_VAR_BAD_INT", "abc");
        let result: Option<i32> = get_env_or_none("PORTAL_TEST_VAR_BAD_INT");
        assert_eq!(result, None);
        env::remove_var("PORTAL_TEST_VAR_BAD_INT");
    }
}
