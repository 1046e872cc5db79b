//! Integration tests for account self-service.

mod helpers;

use authsvc_core::error::ErrorKind;
use authsvc_core::types::PageRequest;
use authsvc_entity::user::{Credentials, UpdateUser};

#[tokio::test]
async fn test_change_email_then_login() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("before@example.com", "password123").await;
    let tokens = app.login("before@example.com", "password123").await;
    let ctx = app.context(&tokens.access_token).await;

    let user = app
        .accounts
        .update_profile(
            &ctx,
            UpdateUser {
                email: Some("after@example.com".into()),
                password: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(user.email, "after@example.com");

    app.login("after@example.com", "password123").await;
    let err = app
        .sessions
        .login(
            Credentials::new("before@example.com", "password123"),
            helpers::test_client(),
        )
        .await
        .unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("pw@example.com", "password123").await;
    let tokens = app.login("pw@example.com", "password123").await;
    let ctx = app.context(&tokens.access_token).await;

    app.accounts
        .update_profile(
            &ctx,
            UpdateUser {
                email: None,
                password: Some("new-password-456".into()),
            },
        )
        .await
        .unwrap();

    app.login("pw@example.com", "new-password-456").await;
    assert!(
        app.sessions
            .login(
                Credentials::new("pw@example.com", "password123"),
                helpers::test_client(),
            )
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_update_rejects_taken_email() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("first@example.com", "password123").await;
    app.create_test_user("second@example.com", "password123").await;
    let tokens = app.login("second@example.com", "password123").await;
    let ctx = app.context(&tokens.access_token).await;

    let err = app
        .accounts
        .update_profile(
            &ctx,
            UpdateUser {
                email: Some("FIRST@example.com".into()),
                password: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_update_rejects_bad_email() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("valid@example.com", "password123").await;
    let tokens = app.login("valid@example.com", "password123").await;
    let ctx = app.context(&tokens.access_token).await;

    let err = app
        .accounts
        .update_profile(
            &ctx,
            UpdateUser {
                email: Some("nope".into()),
                password: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_login_history_paging() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("pager@example.com", "password123").await;
    let mut last = None;
    for _ in 0..5 {
        last = Some(app.login("pager@example.com", "password123").await);
    }
    let ctx = app.context(&last.unwrap().access_token).await;

    let first = app
        .accounts
        .login_history(&ctx, PageRequest::new(0, 2))
        .await
        .unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.total_items, 5);
    assert!(first.has_more());

    let tail = app
        .accounts
        .login_history(&ctx, PageRequest::new(4, 2))
        .await
        .unwrap();
    assert_eq!(tail.items.len(), 1);
    assert!(!tail.has_more());
}

#[tokio::test]
async fn test_delete_account() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("leaving@example.com", "password123").await;
    let tokens = app.login("leaving@example.com", "password123").await;
    let ctx = app.context(&tokens.access_token).await;

    app.accounts.delete_account(&ctx).await.unwrap();

    assert!(app.sessions.current_user(&tokens.access_token).await.is_err());
    let page = app
        .accounts
        .login_history(&ctx, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 0);

    // the email can be registered again
    app.create_test_user("leaving@example.com", "password123").await;
}
