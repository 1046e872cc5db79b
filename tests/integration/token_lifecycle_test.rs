//! Integration tests for issuing, verifying and revoking tokens.

mod helpers;

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use authsvc_auth::guard::TokenStatus;
use authsvc_auth::jwt::{InvalidToken, JwtDecoder, TokenType};
use authsvc_auth::revocation::MIN_REVOCATION_TTL;
use authsvc_core::config::AppConfig;
use authsvc_core::types::TokenId;

#[tokio::test]
async fn test_issue_then_verify() {
    let app = helpers::TestApp::new().await;
    let subject = helpers::random_subject();

    for token_type in [TokenType::Access, TokenType::Refresh] {
        let issued = app.encoder.issue(subject, token_type, None).unwrap();
        let claims = app.guard.authorize(&issued.token, token_type).await.unwrap();
        assert_eq!(claims.sub, subject);
        assert_eq!(claims.token_type, token_type);
    }
}

#[tokio::test]
async fn test_default_lifetimes_follow_config() {
    let app = helpers::TestApp::new().await;
    let subject = helpers::random_subject();

    let access = app.encoder.issue(subject, TokenType::Access, None).unwrap();
    assert_eq!(access.claims.exp - access.claims.iat, 15 * 60);

    let refresh = app.encoder.issue(subject, TokenType::Refresh, None).unwrap();
    assert_eq!(refresh.claims.exp - refresh.claims.iat, 7 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_wrong_type_rejected() {
    let app = helpers::TestApp::new().await;
    let pair = app.encoder.issue_pair(helpers::random_subject()).unwrap();

    let status = app
        .guard
        .inspect(&pair.access_token, TokenType::Refresh)
        .await
        .unwrap();
    assert_eq!(
        status,
        TokenStatus::Invalid(InvalidToken::WrongType {
            expected: TokenType::Refresh,
            found: TokenType::Access,
        })
    );

    let err = app
        .guard
        .authorize(&pair.refresh_token, TokenType::Access)
        .await
        .unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = helpers::TestApp::new().await;
    let issued = app
        .encoder
        .issue(
            helpers::random_subject(),
            TokenType::Access,
            Some(Duration::hours(-1)),
        )
        .unwrap();

    let status = app.guard.inspect(&issued.token, TokenType::Access).await.unwrap();
    assert_eq!(status, TokenStatus::Invalid(InvalidToken::Expired));
}

#[tokio::test]
async fn test_short_lived_token_expires() {
    let app = helpers::TestApp::new().await;
    let issued = app
        .encoder
        .issue(
            helpers::random_subject(),
            TokenType::Access,
            Some(Duration::seconds(1)),
        )
        .unwrap();

    assert!(app.guard.authorize(&issued.token, TokenType::Access).await.is_ok());
    tokio::time::sleep(StdDuration::from_millis(2100)).await;
    assert_eq!(
        app.guard.inspect(&issued.token, TokenType::Access).await.unwrap(),
        TokenStatus::Invalid(InvalidToken::Expired)
    );
}

#[tokio::test]
async fn test_foreign_secret_rejected() {
    let app = helpers::TestApp::new().await;
    let mut other = AppConfig::default();
    other.auth.jwt_secret = "some-other-deployment".to_string();
    let foreign = helpers::TestApp::with_config(other).await;

    let issued = foreign
        .encoder
        .issue(helpers::random_subject(), TokenType::Access, None)
        .unwrap();
    let status = app.guard.inspect(&issued.token, TokenType::Access).await.unwrap();
    assert_eq!(status, TokenStatus::Invalid(InvalidToken::BadSignature));
}

#[tokio::test]
async fn test_swapped_payload_rejected() {
    let app = helpers::TestApp::new().await;
    let victim = app
        .encoder
        .issue(helpers::random_subject(), TokenType::Access, None)
        .unwrap();
    let attacker = app
        .encoder
        .issue(helpers::random_subject(), TokenType::Access, None)
        .unwrap();

    // victim's header and signature around the attacker's payload
    let victim_parts: Vec<&str> = victim.token.split('.').collect();
    let attacker_parts: Vec<&str> = attacker.token.split('.').collect();
    let forged = format!(
        "{}.{}.{}",
        victim_parts[0], attacker_parts[1], victim_parts[2]
    );

    let status = app.guard.inspect(&forged, TokenType::Access).await.unwrap();
    assert_eq!(status, TokenStatus::Invalid(InvalidToken::BadSignature));
}

#[tokio::test]
async fn test_token_without_expiry_rejected() {
    #[derive(Serialize)]
    struct NoExpiry {
        sub: String,
        jti: String,
        #[serde(rename = "type")]
        token_type: &'static str,
        iat: i64,
    }

    let app = helpers::TestApp::new().await;
    let claims = NoExpiry {
        sub: helpers::random_subject().to_string(),
        jti: TokenId::new().to_string(),
        token_type: "access",
        iat: Utc::now().timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(app.config.auth.jwt_secret.as_bytes()),
    )
    .unwrap();

    let decoder = JwtDecoder::new(&app.config.auth).unwrap();
    assert_eq!(
        decoder.verify(&token, TokenType::Access).unwrap_err(),
        InvalidToken::MissingExpiry
    );
}

#[tokio::test]
async fn test_garbage_rejected() {
    let app = helpers::TestApp::new().await;
    for token in ["", "abc", "a.b.c", "Bearer x.y.z"] {
        let status = app.guard.inspect(token, TokenType::Access).await.unwrap();
        assert_eq!(status.label(), "invalid", "token {token:?}");
    }
}

#[tokio::test]
async fn test_revoked_until_expiry() {
    let app = helpers::TestApp::new().await;
    let issued = app
        .encoder
        .issue(helpers::random_subject(), TokenType::Refresh, None)
        .unwrap();
    let revocations = app.guard.revocations();

    assert!(!revocations.is_revoked(&issued.claims).await.unwrap());
    assert!(revocations.record(&issued.claims).await.unwrap());
    assert!(revocations.is_revoked(&issued.claims).await.unwrap());

    let status = app.guard.inspect(&issued.token, TokenType::Refresh).await.unwrap();
    assert_eq!(status, TokenStatus::Revoked(issued.claims.clone()));

    // record lives as long as the token (7 days)
    let ttl = revocations.remaining(issued.claims.jti).await.unwrap().unwrap();
    assert!(ttl > StdDuration::from_secs(7 * 24 * 3600 - 60));
}

#[tokio::test]
async fn test_revocation_ttl_floor() {
    let app = helpers::TestApp::new().await;
    let issued = app
        .encoder
        .issue(
            helpers::random_subject(),
            TokenType::Access,
            Some(Duration::seconds(3)),
        )
        .unwrap();

    app.guard.revocations().record(&issued.claims).await.unwrap();

    let ttl = app
        .guard
        .revocations()
        .remaining(issued.claims.jti)
        .await
        .unwrap()
        .unwrap();
    assert!(ttl <= MIN_REVOCATION_TTL);
    assert!(ttl >= MIN_REVOCATION_TTL - StdDuration::from_secs(5));
}

#[tokio::test]
async fn test_revocation_does_not_leak_to_other_tokens() {
    let app = helpers::TestApp::new().await;
    let pair = app.encoder.issue_pair(helpers::random_subject()).unwrap();

    let access = app
        .guard
        .authorize(&pair.access_token, TokenType::Access)
        .await
        .unwrap();
    app.guard.revocations().record(&access).await.unwrap();

    assert!(
        app.guard
            .authorize(&pair.refresh_token, TokenType::Refresh)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_revocation_covers_expiry_leeway() {
    let mut config = AppConfig::load(Some("tests/fixtures/test_config.toml")).unwrap();
    config.auth.leeway_seconds = 120;
    let app = helpers::TestApp::with_config(config).await;

    // Expired 30s ago, still accepted thanks to the leeway.
    let issued = app
        .encoder
        .issue(
            helpers::random_subject(),
            TokenType::Access,
            Some(Duration::seconds(-30)),
        )
        .unwrap();
    let claims = app.guard.authorize(&issued.token, TokenType::Access).await.unwrap();
    app.guard.revocations().record(&claims).await.unwrap();

    let accepted_for = (claims.exp + 120 - Utc::now().timestamp()) as u64;
    let ttl = app
        .guard
        .revocations()
        .remaining(claims.jti)
        .await
        .unwrap()
        .unwrap();
    assert!(ttl >= StdDuration::from_secs(accepted_for.saturating_sub(2)));

    let status = app.guard.inspect(&issued.token, TokenType::Access).await.unwrap();
    assert_eq!(status.label(), "revoked");
}

#[tokio::test]
async fn test_revocations_beyond_cache_capacity_are_kept() {
    let app = helpers::TestApp::new().await;
    let subject = helpers::random_subject();
    let capacity = app.config.cache.memory.initial_capacity;

    let mut tokens = Vec::new();
    for _ in 0..capacity * 4 {
        let issued = app.encoder.issue(subject, TokenType::Access, None).unwrap();
        assert!(app.guard.revocations().record(&issued.claims).await.unwrap());
        tokens.push(issued);
    }

    for issued in &tokens {
        let status = app.guard.inspect(&issued.token, TokenType::Access).await.unwrap();
        assert_eq!(status.label(), "revoked");
    }
}
