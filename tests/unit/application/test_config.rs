use portal_client::application::config::{Config, normalize_base_url};
use portal_client::session::expiry::ExpiryPolicy;
use std::time::Duration;

#[test]
fn test_config_request_defaults() {
    let mut config = Config::with_base_url("http://localhost:8000/api/");
    config.rest_api.timeout_ms = 1_500;
    config.rest_api.with_credentials = false;

    let defaults = config.request_defaults();
    assert_eq!(defaults.effective_timeout(), Duration::from_millis(1_500));
    assert!(!defaults.includes_credentials());
    assert_eq!(defaults.header("content-type"), Some("application/json"));
    assert_eq!(config.rest_api.base_url, "http://localhost:8000/api");
}

#[test]
fn test_config_token_store_file_backed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let mut config = Config::with_base_url("http://localhost:8000");
    config.auth.token_store_path = Some(path.to_string_lossy().into_owned());
    config.auth.token_ttl_days = 3;
    config.auth.expiry_from_claims = false;

    let store = config.token_store().unwrap();
    assert_eq!(store.policy(), ExpiryPolicy::Fixed(chrono::Duration::days(3)));
    store.set_access_token("abc").unwrap();
    assert!(path.exists());
}

#[test]
fn test_config_serialization() {
    let config = Config::with_base_url("http://localhost:8000");
    let json = serde_json::to_string(&config).unwrap();
    let deserialized: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.rest_api.base_url, "http://localhost:8000");
    assert_eq!(deserialized.download.dir, config.download.dir);
}

#[test]
fn test_normalize_base_url_idempotent() {
    let once = normalize_base_url("https://portal.test/api///");
    assert_eq!(normalize_base_url(&once), once);
}
