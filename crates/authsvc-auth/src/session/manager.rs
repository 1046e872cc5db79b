//! Session lifecycle manager: register, login, refresh and logout flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use authsvc_cache::provider::CacheManager;
use authsvc_core::config::AuthConfig;
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_database::repositories::{LoginHistoryRepository, UserRepository};
use authsvc_entity::login_history::{ClientInfo, CreateLoginHistory};
use authsvc_entity::user::{CreateUser, Credentials, User};
use authsvc_entity::validate_payload;

use crate::guard::{TokenGuard, TokenStatus};
use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair, TokenType};
use crate::password::{PasswordHasher, PasswordValidator};
use crate::revocation::RevocationStore;

/// Message for every credential failure, so callers cannot tell which
/// emails are registered.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    encoder: Arc<JwtEncoder>,
    /// Verification plus revocation lookup.
    guard: TokenGuard,
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Login history repository.
    login_history: Arc<dyn LoginHistoryRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("encoder", &self.encoder)
            .field("guard", &self.guard)
            .finish()
    }
}

impl SessionManager {
    /// Creates a session manager with explicitly built components.
    pub fn new(
        encoder: Arc<JwtEncoder>,
        guard: TokenGuard,
        users: Arc<dyn UserRepository>,
        login_history: Arc<dyn LoginHistoryRepository>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            encoder,
            guard,
            users,
            login_history,
            hasher: PasswordHasher::new(),
            validator,
        }
    }

    /// Builds the token components from configuration and wires them up.
    pub fn from_config(
        config: &AuthConfig,
        cache: Arc<CacheManager>,
        users: Arc<dyn UserRepository>,
        login_history: Arc<dyn LoginHistoryRepository>,
    ) -> AppResult<Self> {
        let encoder = Arc::new(JwtEncoder::new(config)?);
        let decoder = Arc::new(JwtDecoder::new(config)?);
        let guard = TokenGuard::new(decoder, RevocationStore::from_config(config, cache));

        Ok(Self::new(
            encoder,
            guard,
            users,
            login_history,
            PasswordValidator::new(config),
        ))
    }

    /// The token guard used for every protected operation.
    pub fn guard(&self) -> &TokenGuard {
        &self.guard
    }

    /// The token encoder.
    pub fn encoder(&self) -> &JwtEncoder {
        &self.encoder
    }

    /// Registers a new account.
    ///
    /// The email must be well-formed and unused; the password must satisfy
    /// the configured policy.
    pub async fn register(&self, credentials: Credentials) -> AppResult<User> {
        validate_payload(&credentials)?;
        let email = credentials.normalized_email();
        self.validator
            .validate(&credentials.password, &[email.as_str()])?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&credentials.password)?;
        let user = self
            .users
            .create(CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Performs the login flow:
    ///
    /// 1. Find the user by email and verify the password
    /// 2. Record a login history entry with the client details
    /// 3. Issue an access + refresh token pair
    pub async fn login(
        &self,
        credentials: Credentials,
        client: ClientInfo,
    ) -> AppResult<LoginResult> {
        let email = credentials.normalized_email();

        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("Login attempt for unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(&credentials.password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        self.login_history
            .create(CreateLoginHistory {
                user_id: user.id,
                client,
            })
            .await?;

        let tokens = self.encoder.issue_pair(user.id)?;

        info!(user_id = %user.id, "Login successful");
        Ok(LoginResult { tokens, user })
    }

    /// Exchanges a refresh token for a new pair, revoking the presented one.
    ///
    /// A refresh token can be used once: replaying it, even concurrently,
    /// is rejected as revoked.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self.guard.authorize(refresh_token, TokenType::Refresh).await?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))?;

        if !self.guard.revocations().record(&claims).await? {
            warn!(user_id = %user.id, jti = %claims.jti, "Refresh token replayed");
            return Err(AppError::authentication("Token has been revoked"));
        }

        let tokens = self.encoder.issue_pair(user.id)?;
        info!(user_id = %user.id, "Tokens refreshed");
        Ok(tokens)
    }

    /// Revokes the access token and, when given and valid for the same user,
    /// the refresh token.
    pub async fn logout(&self, access_token: &str, refresh_token: Option<&str>) -> AppResult<()> {
        let access = self.guard.authorize(access_token, TokenType::Access).await?;
        self.guard.revocations().record(&access).await?;

        if let Some(token) = refresh_token {
            match self.guard.inspect(token, TokenType::Refresh).await? {
                TokenStatus::Valid(refresh) if refresh.sub == access.sub => {
                    self.guard.revocations().record(&refresh).await?;
                }
                TokenStatus::Valid(refresh) => {
                    warn!(
                        user_id = %access.sub,
                        other_user_id = %refresh.sub,
                        "Refresh token belongs to another user; not revoked"
                    );
                }
                status => {
                    debug!(status = status.label(), "Refresh token not revoked at logout");
                }
            }
        }

        info!(user_id = %access.sub, "Logged out");
        Ok(())
    }

    /// Resolves the user behind an access token.
    pub async fn current_user(&self, access_token: &str) -> AppResult<User> {
        let claims = self.guard.authorize(access_token, TokenType::Access).await?;
        self.users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("User no longer exists"))
    }
}
