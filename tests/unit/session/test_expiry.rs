use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, TimeZone, Utc};
use portal_client::session::expiry::{ExpiryPolicy, jwt_expiry};

fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"42","exp":{exp}}}"#));
    format!("{header}.{claims}.signature")
}

#[test]
fn test_default_policy_is_seven_days() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
    let expiry = ExpiryPolicy::default().expires_at("opaque", now);
    assert_eq!(expiry - now, Duration::days(7));
}

#[test]
fn test_fixed_policy_ignores_claims() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let token = jwt_with_exp(now.timestamp() + 60);
    let expiry = ExpiryPolicy::Fixed(Duration::hours(1)).expires_at(&token, now);
    assert_eq!(expiry, now + Duration::hours(1));
}

#[test]
fn test_claims_policy_reads_exp() {
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let exp = now.timestamp() + 900;
    let policy = ExpiryPolicy::FromClaims {
        fallback: Duration::days(7),
    };
    assert_eq!(policy.expires_at(&jwt_with_exp(exp), now).timestamp(), exp);
    assert_eq!(policy.expires_at("opaque-token", now), now + Duration::days(7));
}

#[test]
fn test_jwt_expiry_rejects_garbage() {
    assert_eq!(jwt_expiry(""), None);
    assert_eq!(jwt_expiry("a.b"), None);
    assert_eq!(jwt_expiry("a.!!!.c"), None);
    let no_exp = format!("h.{}.s", URL_SAFE_NO_PAD.encode(br#"{"sub":"1"}"#));
    assert_eq!(jwt_expiry(&no_exp), None);
}
