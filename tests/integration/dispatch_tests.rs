use crate::common::{closed_port, create_test_client, silent_server};
use mockito::Matcher;
use portal_client::prelude::*;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_post_json_with_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/jobs")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": "Rust engineer"})))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":"42"}"#)
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    client.dispatcher().set_auth_token("abc").unwrap();

    let response = client
        .jobs()
        .create(&json!({"title": "Rust engineer"}))
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.status_text, "Created");
    assert_eq!(response.data, json!({"id": "42"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_purged_token_is_not_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/companies")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    client.dispatcher().set_auth_token("abc").unwrap();
    client.tokens().purge_auth().unwrap();

    let response = client.companies().list().await.unwrap();
    assert_eq!(response.data, json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_per_call_header_override_and_omission() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/events/7")
        .match_header("x-tenant", "t1")
        .match_header("authorization", Matcher::Missing)
        .with_status(204)
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    client.dispatcher().set_auth_token("abc").unwrap();
    client
        .dispatcher()
        .update_config(&RequestConfig::new().with_header("X-Tenant", "t1"));

    let overrides = RequestConfig::new().without_header("Authorization");
    let response = client
        .dispatcher()
        .execute(
            Method::PUT,
            "/events/7",
            Payload::Json(json!({"name": "Meetup"})),
            Some(overrides),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(response.data.into_value(), None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_per_call_authorization_wins_over_stored_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/me")
        .match_header("authorization", "Basic ZGV2OnB3")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    client.dispatcher().set_auth_token("abc").unwrap();

    client
        .dispatcher()
        .get::<serde_json::Value>(
            "/users/me",
            Some(RequestConfig::new().with_header("Authorization", "Basic ZGV2OnB3")),
        )
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_form_payload_is_url_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "password".into()),
            Matcher::UrlEncoded("username".into(), "dev".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("ok")
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    let response = client
        .dispatcher()
        .execute(
            Method::POST,
            "auth/token",
            Payload::form([("grant_type", "password"), ("username", "dev")]),
            None,
        )
        .await
        .unwrap();

    assert_eq!(response.data, ResponseBody::Text("ok".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_artifacts_sent_as_cookies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/me")
        .match_header("cookie", Matcher::Regex("session=s-1".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1}"#)
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    client.tokens().set_session_artifact("session", "s-1").unwrap();

    let response = client.users().me().await.unwrap();
    assert_eq!(response.data["id"], 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/jobs/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Not found."}"#)
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    let err = client.jobs().find("missing").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Http);
    assert_eq!(err.message, "HTTP 404: Not Found");
    assert_eq!(err.status, Some(404));
    assert_eq!(err.data, Some(json!({"detail": "Not found."})));
}

#[tokio::test]
async fn test_malformed_json_is_serialization_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/events")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let client = create_test_client(&server.url());
    let err = client.events().list().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Serialization);
}

#[tokio::test]
async fn test_timeout_settles_with_408() {
    let addr = silent_server().await;
    let client = create_test_client(&format!("http://{addr}"));

    let started = Instant::now();
    let err = client
        .dispatcher()
        .get::<Value>("/jobs", Some(RequestConfig::new().with_timeout_ms(50)))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Timeout);
    assert_eq!(err.message, "Request timeout");
    assert_eq!(err.status, Some(408));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_leaves_caller_token_untouched() {
    let addr = silent_server().await;
    let client = create_test_client(&format!("http://{addr}"));
    let token = CancellationToken::new();

    let err = client
        .dispatcher()
        .execute_with_cancel(
            Method::GET,
            "/jobs",
            Payload::Empty,
            Some(RequestConfig::new().with_timeout_ms(50)),
            token.clone(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Timeout);
    assert_eq!(err.status, Some(408));
    assert!(!token.is_cancelled());

    tokio::time::advance(Duration::from_secs(3600)).await;
    tokio::task::yield_now().await;
    assert!(!token.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_call_drops_its_timer() {
    let addr = silent_server().await;
    let client = create_test_client(&format!("http://{addr}"));
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .dispatcher()
        .execute_with_cancel(
            Method::GET,
            "/jobs",
            Payload::Empty,
            Some(RequestConfig::new().with_timeout_ms(50)),
            token,
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Cancelled);

    tokio::time::advance(Duration::from_secs(3600)).await;
    let healthy = tokio::time::timeout(
        Duration::from_millis(50),
        client.dispatcher().execute_with_cancel(
            Method::GET,
            "/jobs",
            Payload::Empty,
            Some(RequestConfig::new().with_timeout_ms(10)),
            CancellationToken::new(),
        ),
    )
    .await
    .unwrap();
    assert_eq!(healthy.unwrap_err().kind, ApiErrorKind::Timeout);
}

#[tokio::test]
async fn test_caller_cancellation() {
    let addr = silent_server().await;
    let client = create_test_client(&format!("http://{addr}"));
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        canceller.cancel();
    });

    let err = client
        .dispatcher()
        .execute_with_cancel(Method::GET, "/jobs", Payload::Empty, None, token)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Cancelled);
    assert_eq!(err.message, "Request cancelled");
}

#[tokio::test]
async fn test_cancellation_is_per_call() {
    let silent = silent_server().await;
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/jobs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let hanging = create_test_client(&format!("http://{silent}"));
    let healthy = create_test_client(&server.url());
    let token = CancellationToken::new();
    token.cancel();

    let (cancelled, ok) = tokio::join!(
        hanging.dispatcher().execute_with_cancel(
            Method::GET,
            "/jobs",
            Payload::Empty,
            None,
            token
        ),
        healthy.jobs().list(),
    );

    assert_eq!(cancelled.unwrap_err().kind, ApiErrorKind::Cancelled);
    assert_eq!(ok.unwrap().data, json!([]));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let addr = closed_port().await;
    let client = create_test_client(&format!("http://{addr}"));

    let err = client.jobs().list().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.message, "Network error");
    assert_eq!(err.status, Some(0));
}

#[tokio::test]
async fn test_base_url_change_applies_to_next_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/jobs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = create_test_client("http://localhost:1");
    client
        .dispatcher()
        .set_base_url(&format!("{}/v2/", server.url()))
        .unwrap();

    client.jobs().list().await.unwrap();
    mock.assert_async().await;
}
