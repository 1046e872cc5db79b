//! JWT token creation with configurable signing and TTL.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use authsvc_core::config::AuthConfig;
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_core::types::{TokenId, UserId};

use super::claims::{Claims, TokenType};
use super::hmac_algorithm;

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Header carrying the configured algorithm.
    header: Header,
    /// Access token lifetime.
    access_ttl: Duration,
    /// Refresh token lifetime.
    refresh_ttl: Duration,
}

impl fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("algorithm", &self.header.alg)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// Claims encoded in `token`.
    pub claims: Claims,
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let algorithm = hmac_algorithm(&config.jwt_algorithm)?;
        let access_ttl = i64::try_from(config.access_ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| AppError::configuration("auth.access_ttl_minutes is out of range"))?;
        let refresh_ttl = i64::try_from(config.refresh_ttl_days)
            .ok()
            .and_then(Duration::try_days)
            .ok_or_else(|| AppError::configuration("auth.refresh_ttl_days is out of range"))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            header: Header::new(algorithm),
            access_ttl,
            refresh_ttl,
        })
    }

    /// Lifetime used when no override is given.
    pub fn default_ttl(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        }
    }

    /// Signs a single token for `subject`.
    ///
    /// `ttl` overrides the type's default lifetime. A negative override
    /// yields an already-expired token.
    pub fn issue(
        &self,
        subject: UserId,
        token_type: TokenType,
        ttl: Option<Duration>,
    ) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl.unwrap_or_else(|| self.default_ttl(token_type)))
            .ok_or_else(|| AppError::validation("Token lifetime is out of range"))?;

        let claims = Claims {
            sub: subject,
            jti: TokenId::new(),
            token_type,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        let token = encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            AppError::internal(format!("Failed to encode {token_type} token: {e}"))
        })?;

        debug!(user_id = %subject, jti = %claims.jti, %token_type, exp = claims.exp, "Token issued");
        Ok(IssuedToken { token, claims })
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn issue_pair(&self, subject: UserId) -> AppResult<TokenPair> {
        let access = self.issue(subject, TokenType::Access, None)?;
        let refresh = self.issue(subject, TokenType::Refresh, None)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "bearer".to_string(),
            access_expires_at: access.claims.expires_at(),
            refresh_expires_at: refresh.claims.expires_at(),
        })
    }
}
