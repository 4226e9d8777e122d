use chrono::Duration;
use portal_client::session::store::{AuthTokenStore, FileBackend, TokenBackend};

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = AuthTokenStore::file(&path).unwrap();
    store.set_access_token("abc").unwrap();
    store.set_refresh_token("def").unwrap();
    assert!(path.exists());

    let reopened = AuthTokenStore::file(&path).unwrap();
    assert_eq!(reopened.get_access_token().as_deref(), Some("abc"));
    assert_eq!(reopened.get_refresh_token().as_deref(), Some("def"));
}

#[test]
fn test_file_store_purge_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");

    let store = AuthTokenStore::file(&path).unwrap();
    store.set_access_token("abc").unwrap();
    store.set_session_artifact("session", "s-1").unwrap();
    store.purge_auth().unwrap();
    store.purge_auth().unwrap();

    let reopened = FileBackend::open(&path).unwrap();
    assert!(reopened.entries().is_empty());
}

#[test]
fn test_file_store_expired_token_reads_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = AuthTokenStore::file(dir.path().join("tokens.json")).unwrap();
    store
        .set_access_token_with_ttl("abc", Duration::seconds(-1))
        .unwrap();
    assert_eq!(store.get_access_token(), None);
    assert!(store.token_pair().is_none());
}

#[test]
fn test_file_backend_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, b"not json").unwrap();
    assert!(FileBackend::open(&path).is_err());
}

#[test]
fn test_file_backend_empty_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    std::fs::write(&path, b"").unwrap();
    let backend = FileBackend::open(&path).unwrap();
    assert!(backend.entries().is_empty());
    assert_eq!(backend.path(), path.as_path());
}
