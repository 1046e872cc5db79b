//! Cache key builders for all authsvc cache entries.
//!
//! Keys are unprefixed here; the Redis provider prepends its configured
//! `key_prefix`.

use uuid::Uuid;

/// Denylist entry for a revoked token, keyed by its `jti`.
pub fn revoked_token(jti: Uuid) -> String {
    format!("blacklist:{jti}")
}
