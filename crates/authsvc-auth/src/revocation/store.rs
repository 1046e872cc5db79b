//! Cache-backed revocation records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use authsvc_cache::keys;
use authsvc_cache::provider::CacheManager;
use authsvc_core::config::AuthConfig;
use authsvc_core::result::AppResult;
use authsvc_core::traits::cache::CacheProvider;
use authsvc_core::types::TokenId;

use crate::jwt::Claims;

use super::revocation_ttl;

/// Records and looks up revoked token ids in the cache.
///
/// Cache failures are returned to the caller; an unreachable store never
/// reads as "not revoked".
#[derive(Debug, Clone)]
pub struct RevocationStore {
    /// Backing cache.
    cache: Arc<CacheManager>,
    /// Expiry leeway of the verifier; records outlive `exp` by this much.
    leeway: Duration,
}

impl RevocationStore {
    /// Creates a store on top of the given cache.
    pub fn new(cache: Arc<CacheManager>, leeway: Duration) -> Self {
        Self { cache, leeway }
    }

    /// Creates a store whose records cover the leeway configured for
    /// token verification.
    pub fn from_config(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        Self::new(cache, Duration::from_secs(config.leeway_seconds))
    }

    /// Denylists the token described by `claims` until the verifier would
    /// stop accepting it (at least one minute).
    ///
    /// Returns `false` when the token was already revoked; the existing
    /// record is left untouched.
    pub async fn record(&self, claims: &Claims) -> AppResult<bool> {
        let key = keys::revoked_token(claims.jti.into_uuid());
        let ttl = revocation_ttl(claims, Utc::now(), self.leeway);

        let inserted = self
            .cache
            .set_nx(&key, claims.token_type.as_str(), ttl)
            .await?;

        if inserted {
            info!(
                jti = %claims.jti,
                user_id = %claims.sub,
                token_type = %claims.token_type,
                ttl_secs = ttl.as_secs(),
                "Token revoked"
            );
        } else {
            debug!(jti = %claims.jti, "Token already revoked");
        }
        Ok(inserted)
    }

    /// Whether the token described by `claims` has been revoked.
    pub async fn is_revoked(&self, claims: &Claims) -> AppResult<bool> {
        self.is_id_revoked(claims.jti).await
    }

    /// Whether a token id has been revoked.
    pub async fn is_id_revoked(&self, jti: TokenId) -> AppResult<bool> {
        self.cache
            .exists(&keys::revoked_token(jti.into_uuid()))
            .await
    }

    /// Remaining lifetime of the revocation record for `jti`, if any.
    pub async fn remaining(&self, jti: TokenId) -> AppResult<Option<Duration>> {
        self.cache.ttl(&keys::revoked_token(jti.into_uuid())).await
    }
}
