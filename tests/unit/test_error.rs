use portal_client::error::{ApiError, ApiErrorKind};
use reqwest::StatusCode;
use serde_json::json;

#[test]
fn test_api_error_display_timeout() {
    let error = ApiError::timeout();
    assert_eq!(error.to_string(), "Request timeout");
    assert_eq!(error.status, Some(408));
    assert!(error.is_timeout());
}

#[test]
fn test_api_error_display_network() {
    let error = ApiError::network();
    assert_eq!(error.to_string(), "Network error");
    assert_eq!(error.kind, ApiErrorKind::Network);
    assert_eq!(error.status, Some(0));
}

#[test]
fn test_api_error_display_http() {
    let error = ApiError::http(StatusCode::NOT_FOUND, None);
    assert_eq!(error.to_string(), "HTTP 404: Not Found");
    assert!(error.has_status(StatusCode::NOT_FOUND));
    assert!(!error.is_timeout());
}

#[test]
fn test_api_error_http_keeps_body() {
    let error = ApiError::http(
        StatusCode::BAD_REQUEST,
        Some(json!({"email": ["already taken"]})),
    );
    assert_eq!(error.message, "HTTP 400: Bad Request");
    assert_eq!(error.data.unwrap()["email"][0], "already taken");
}

#[test]
fn test_api_error_display_cancelled() {
    let error = ApiError::cancelled();
    assert_eq!(error.to_string(), "Request cancelled");
    assert_eq!(error.status, None);
}

#[test]
fn test_api_error_display_unauthenticated() {
    let error = ApiError::unauthenticated("no refresh token stored");
    assert_eq!(error.kind, ApiErrorKind::Unauthenticated);
    assert_eq!(error.to_string(), "Not authenticated: no refresh token stored");
}

// Note: reqwest::Error cannot be easily constructed in tests
// This conversion is tested through integration tests

#[test]
fn test_api_error_from_serde() {
    let json = r#"{"invalid": json}"#;
    let serde_error = serde_json::from_str::<serde_json::Value>(json).unwrap_err();
    let api_error: ApiError = serde_error.into();
    assert_eq!(api_error.kind, ApiErrorKind::Serialization);
    assert!(api_error.message.starts_with("Serialization error: "));
}

#[test]
fn test_api_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let api_error: ApiError = io_error.into();
    assert_eq!(api_error.kind, ApiErrorKind::Io);
    assert!(api_error.message.contains("denied"));
}

#[test]
fn test_api_error_serializes_uniform_shape() {
    let value = serde_json::to_value(ApiError::timeout()).unwrap();
    assert_eq!(
        value,
        json!({"kind": "Timeout", "message": "Request timeout", "status": 408, "data": null})
    );
}
