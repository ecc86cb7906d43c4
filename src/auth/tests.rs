//! Tests for the auth module

use super::*;

#[tokio::test]
async fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://graph.example.com/me");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert!(built.url().query().is_none());
    assert!(built.headers().get("Authorization").is_none());
}

#[tokio::test]
async fn test_access_token_query() {
    let auth = Authenticator::new(AuthConfig::access_token("EAAB-token"));
    let client = reqwest::Client::new();
    let req = client.get("https://graph.example.com/me/friends");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert_eq!(built.url().query(), Some("access_token=EAAB-token"));
}

#[tokio::test]
async fn test_access_token_header() {
    let auth = Authenticator::new(AuthConfig::bearer("EAAB-token"));
    let client = reqwest::Client::new();
    let req = client.get("https://graph.example.com/me/friends");

    let built = auth.apply(req).await.unwrap().build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer EAAB-token"
    );
    assert!(built.url().query().is_none());
}

#[tokio::test]
async fn test_empty_token_rejected() {
    let auth = Authenticator::new(AuthConfig::access_token(""));
    let client = reqwest::Client::new();
    let req = client.get("https://graph.example.com/me");

    let err = auth.apply(req).await.unwrap_err();
    assert!(matches!(err, crate::Error::Auth { .. }));
}

#[test]
fn test_debug_redacts_token() {
    let config = AuthConfig::access_token("super-secret");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_location_serde() {
    let location: Location = serde_json::from_str("\"header\"").unwrap();
    assert_eq!(location, Location::Header);
    assert_eq!(Location::default(), Location::Query);
}
