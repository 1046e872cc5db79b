//! Denylist of revoked tokens.
//!
//! A revocation record lives exactly as long as the token could still be
//! accepted, verifier leeway included, with a floor so that near-expired
//! tokens cannot slip through while clocks disagree.

pub mod store;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::jwt::Claims;

pub use store::RevocationStore;

/// Shortest lifetime of a revocation record.
pub const MIN_REVOCATION_TTL: Duration = Duration::from_secs(60);

/// Lifetime of the revocation record for `claims` revoked at `now`:
/// the time until the verifier stops accepting the token (`exp + leeway`),
/// never less than [`MIN_REVOCATION_TTL`].
pub fn revocation_ttl(claims: &Claims, now: DateTime<Utc>, leeway: Duration) -> Duration {
    let leeway = i64::try_from(leeway.as_secs()).unwrap_or(i64::MAX);
    let accepted_until = claims.exp.saturating_add(leeway);
    let remaining = u64::try_from(accepted_until.saturating_sub(now.timestamp())).unwrap_or(0);
    Duration::from_secs(remaining).max(MIN_REVOCATION_TTL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::TokenType;
    use authsvc_core::types::{TokenId, UserId};

    fn claims_expiring_in(now: DateTime<Utc>, seconds: i64) -> Claims {
        Claims {
            sub: UserId::new(),
            jti: TokenId::new(),
            token_type: TokenType::Access,
            iat: now.timestamp() - 10,
            exp: now.timestamp() + seconds,
        }
    }

    #[test]
    fn test_ttl_follows_expiry() {
        let now = Utc::now();
        let claims = claims_expiring_in(now, 900);
        assert_eq!(
            revocation_ttl(&claims, now, Duration::ZERO),
            Duration::from_secs(900)
        );
    }

    #[test]
    fn test_ttl_floor() {
        let now = Utc::now();
        for exp_in in [5, 60, -30] {
            assert_eq!(
                revocation_ttl(&claims_expiring_in(now, exp_in), now, Duration::ZERO),
                MIN_REVOCATION_TTL
            );
        }
    }

    #[test]
    fn test_ttl_covers_leeway() {
        let now = Utc::now();
        let leeway = Duration::from_secs(120);

        // Expired 30s ago but still accepted for another 90s.
        let ttl = revocation_ttl(&claims_expiring_in(now, -30), now, leeway);
        assert_eq!(ttl, Duration::from_secs(90));

        let ttl = revocation_ttl(&claims_expiring_in(now, 900), now, leeway);
        assert_eq!(ttl, Duration::from_secs(1020));
    }
}
