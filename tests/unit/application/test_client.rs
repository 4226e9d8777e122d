use portal_client::prelude::*;

fn client() -> Client {
    let config = Config::with_base_url("http://localhost:8000/api");
    Client::with_token_store(config, AuthTokenStore::in_memory()).unwrap()
}

#[test]
fn test_client_services_share_token_store() {
    let client = client();
    assert!(!client.auth().is_authenticated());

    client.dispatcher().set_auth_token("abc").unwrap();
    assert!(client.auth().is_authenticated());
    assert_eq!(client.tokens().get_access_token().as_deref(), Some("abc"));

    client.tokens().purge_auth().unwrap();
    assert!(!client.auth().is_authenticated());
}

#[test]
fn test_service_paths() {
    let client = client();
    assert_eq!(client.jobs().base().path(""), "/jobs");
    assert_eq!(client.jobs().base().path("42/apply"), "/jobs/42/apply");
    assert_eq!(client.companies().base().base_path(), "/companies");
    assert_eq!(client.events().base().path("/7"), "/events/7");
    assert_eq!(client.users().base().path("me"), "/users/me");
    assert_eq!(client.profiles().base().base_path(), "/profiles");
}

#[test]
fn test_dispatcher_url_for() {
    let client = client();
    assert_eq!(
        client.dispatcher().url_for("/jobs"),
        "http://localhost:8000/api/jobs"
    );
    assert_eq!(
        client.dispatcher().url_for("jobs"),
        "http://localhost:8000/api/jobs"
    );
}

#[test]
fn test_version() {
    assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    assert!(!VERSION.is_empty());
}

#[test]
fn test_refresh_without_refresh_token() {
    let client = client();
    client.tokens().set_access_token("abc").unwrap();
    let err = tokio_test::block_on(client.auth().refresh()).unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthenticated);
    assert!(client.auth().is_authenticated());
}
