//! Integration tests for the register/login/refresh/logout flow.

mod helpers;

use authsvc_auth::jwt::TokenType;
use authsvc_core::error::ErrorKind;
use authsvc_core::types::PageRequest;
use authsvc_database::repositories::UserRepository;
use authsvc_entity::login_history::ClientInfo;
use authsvc_entity::user::Credentials;

#[tokio::test]
async fn test_login_success() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("login@example.com", "password123").await;

    let result = app
        .sessions
        .login(
            Credentials::new("LOGIN@example.com", "password123"),
            helpers::test_client(),
        )
        .await
        .unwrap();

    assert_eq!(result.user.id, user.id);
    assert_eq!(result.tokens.token_type, "bearer");
    let claims = app
        .guard
        .authorize(&result.tokens.access_token, TokenType::Access)
        .await
        .unwrap();
    assert_eq!(claims.sub, user.id);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("wrongpw@example.com", "password123").await;

    let err = app
        .sessions
        .login(
            Credentials::new("wrongpw@example.com", "wrongpassword"),
            ClientInfo::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(err.message, "Invalid email or password");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("dup@example.com", "password123").await;

    let err = app
        .sessions
        .register(Credentials::new("Dup@Example.com", "password456"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = helpers::TestApp::new().await;
    let err = app
        .sessions
        .register(Credentials::new("not-an-email", "password123"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_login_records_history() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("history@example.com", "password123").await;

    let first = app.login("history@example.com", "password123").await;
    app.login("history@example.com", "password123").await;

    let ctx = app.context(&first.access_token).await;
    let page = app
        .accounts
        .login_history(&ctx, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(page.total_items, 2);
    assert_eq!(page.items[0].user_agent.as_deref(), Some("authsvc-tests/1.0"));
    assert_eq!(page.items[0].ip_address.as_deref(), Some("127.0.0.1"));
    assert!(page.items[0].login_at >= page.items[1].login_at);
}

#[tokio::test]
async fn test_failed_login_records_nothing() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("quiet@example.com", "password123").await;
    let tokens = app.login("quiet@example.com", "password123").await;

    let _ = app
        .sessions
        .login(
            Credentials::new("quiet@example.com", "bad-password"),
            ClientInfo::default(),
        )
        .await;

    let ctx = app.context(&tokens.access_token).await;
    let page = app
        .accounts
        .login_history(&ctx, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("rotate@example.com", "password123").await;
    let tokens = app.login("rotate@example.com", "password123").await;

    let rotated = app.sessions.refresh(&tokens.refresh_token).await.unwrap();
    assert!(
        app.guard
            .authorize(&rotated.access_token, TokenType::Access)
            .await
            .is_ok()
    );

    // the old refresh token is spent
    let err = app.sessions.refresh(&tokens.refresh_token).await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.message, "Token has been revoked");

    // the old access token stays valid until it expires
    assert!(app.sessions.current_user(&tokens.access_token).await.is_ok());
}

#[tokio::test]
async fn test_concurrent_refresh_single_winner() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("race@example.com", "password123").await;
    let tokens = app.login("race@example.com", "password123").await;

    let (a, b) = tokio::join!(
        app.sessions.refresh(&tokens.refresh_token),
        app.sessions.refresh(&tokens.refresh_token)
    );
    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("gone@example.com", "password123").await;
    let tokens = app.login("gone@example.com", "password123").await;

    app.users.delete(user.id).await.unwrap();

    let err = app.sessions.refresh(&tokens.refresh_token).await.unwrap_err();
    assert_eq!(err.message, "User no longer exists");
    let err = app.sessions.current_user(&tokens.access_token).await.unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_logout_revokes_tokens() {
    let app = helpers::TestApp::new().await;
    let user = app.create_test_user("logout@example.com", "password123").await;
    let tokens = app.login("logout@example.com", "password123").await;

    let me = app.sessions.current_user(&tokens.access_token).await.unwrap();
    assert_eq!(me.id, user.id);

    app.sessions
        .logout(&tokens.access_token, Some(&tokens.refresh_token))
        .await
        .unwrap();

    let err = app
        .sessions
        .current_user(&tokens.access_token)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Token has been revoked");
    assert!(app.sessions.refresh(&tokens.refresh_token).await.is_err());
}

#[tokio::test]
async fn test_logout_ignores_other_users_refresh_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("alice@example.com", "password123").await;
    app.create_test_user("bob@example.com", "password123").await;
    let alice = app.login("alice@example.com", "password123").await;
    let bob = app.login("bob@example.com", "password123").await;

    app.sessions
        .logout(&alice.access_token, Some(&bob.refresh_token))
        .await
        .unwrap();

    assert!(app.sessions.refresh(&bob.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("typed@example.com", "password123").await;
    let tokens = app.login("typed@example.com", "password123").await;

    let err = app
        .sessions
        .logout(&tokens.refresh_token, None)
        .await
        .unwrap_err();
    assert!(err.is_authentication());
}
