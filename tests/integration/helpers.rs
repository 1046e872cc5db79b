//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use authsvc_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use authsvc_auth::password::PasswordValidator;
use authsvc_auth::{RevocationStore, SessionManager, TokenGuard};
use authsvc_cache::CacheManager;
use authsvc_core::config::AppConfig;
use authsvc_core::types::UserId;
use authsvc_database::repositories::{MemoryLoginHistoryRepository, MemoryUserRepository};
use authsvc_entity::login_history::ClientInfo;
use authsvc_entity::user::{Credentials, User};
use authsvc_service::{AccountService, RequestContext};

/// Test application context
pub struct TestApp {
    /// Application config
    pub config: AppConfig,
    /// Cache backing the revocation store
    pub cache: Arc<CacheManager>,
    /// Token signer
    pub encoder: JwtEncoder,
    /// Verifier plus revocation lookup
    pub guard: TokenGuard,
    /// Register/login/refresh/logout flows
    pub sessions: SessionManager,
    /// Profile and history operations
    pub accounts: AccountService,
    /// User store
    pub users: Arc<MemoryUserRepository>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let config = AppConfig::load(Some("tests/fixtures/test_config.toml"))
            .expect("Failed to load test config");
        Self::with_config(config).await
    }

    /// Create a test application from an explicit configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let users = Arc::new(MemoryUserRepository::new());
        let history = Arc::new(MemoryLoginHistoryRepository::new());

        let encoder = JwtEncoder::new(&config.auth).expect("encoder");
        let decoder = Arc::new(JwtDecoder::new(&config.auth).expect("decoder"));
        let guard = TokenGuard::new(decoder, RevocationStore::from_config(&config.auth, cache.clone()));

        let sessions =
            SessionManager::from_config(&config.auth, cache.clone(), users.clone(), history.clone())
                .expect("session manager");
        let accounts = AccountService::new(
            users.clone(),
            history,
            PasswordValidator::new(&config.auth),
        );

        Self {
            config,
            cache,
            encoder,
            guard,
            sessions,
            accounts,
            users,
        }
    }

    /// Register a user and return it
    pub async fn create_test_user(&self, email: &str, password: &str) -> User {
        self.sessions
            .register(Credentials::new(email, password))
            .await
            .expect("Failed to register test user")
    }

    /// Log in and return the issued pair
    pub async fn login(&self, email: &str, password: &str) -> TokenPair {
        self.sessions
            .login(Credentials::new(email, password), test_client())
            .await
            .expect("Login failed")
            .tokens
    }

    /// Build a request context from an access token
    pub async fn context(&self, access_token: &str) -> RequestContext {
        let claims = self
            .guard
            .authorize(access_token, authsvc_auth::TokenType::Access)
            .await
            .expect("access token should be valid");
        RequestContext::from_claims(&claims, test_client())
    }
}

/// Client details attached to test logins
pub fn test_client() -> ClientInfo {
    ClientInfo::new(
        Some("authsvc-tests/1.0".to_string()),
        Some("127.0.0.1".to_string()),
    )
}

/// A subject with no backing user
pub fn random_subject() -> UserId {
    UserId::new()
}
