//! Gate for protected operations: a token is usable only if it verifies
//! and has not been revoked.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;

use crate::jwt::{Claims, InvalidToken, JwtDecoder, TokenType};
use crate::revocation::RevocationStore;

/// Outcome of checking a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// Signature, expiry and type check out, and the token is not denylisted.
    Valid(Claims),
    /// The token failed verification.
    Invalid(InvalidToken),
    /// The token verifies but has been revoked.
    Revoked(Claims),
}

impl TokenStatus {
    /// `"valid"`, `"invalid"` or `"revoked"`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid(_) => "valid",
            Self::Invalid(_) => "invalid",
            Self::Revoked(_) => "revoked",
        }
    }

    /// Claims of a decodable token, revoked or not.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Valid(c) | Self::Revoked(c) => Some(c),
            Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(reason) => write!(f, "invalid ({reason})"),
            other => f.write_str(other.label()),
        }
    }
}

/// Combines the verifier and the revocation store.
#[derive(Debug, Clone)]
pub struct TokenGuard {
    decoder: Arc<JwtDecoder>,
    revocations: RevocationStore,
}

impl TokenGuard {
    /// Creates a guard.
    pub fn new(decoder: Arc<JwtDecoder>, revocations: RevocationStore) -> Self {
        Self {
            decoder,
            revocations,
        }
    }

    /// The revocation store consulted by this guard.
    pub fn revocations(&self) -> &RevocationStore {
        &self.revocations
    }

    /// Classifies a token. Only a failing revocation lookup is an error.
    pub async fn inspect(&self, token: &str, expected: TokenType) -> AppResult<TokenStatus> {
        let claims = match self.decoder.verify(token, expected) {
            Ok(claims) => claims,
            Err(reason) => return Ok(TokenStatus::Invalid(reason)),
        };

        if self.revocations.is_revoked(&claims).await? {
            debug!(jti = %claims.jti, "Revoked token presented");
            return Ok(TokenStatus::Revoked(claims));
        }

        Ok(TokenStatus::Valid(claims))
    }

    /// Returns the claims of a usable token, or an authentication error.
    pub async fn authorize(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        match self.inspect(token, expected).await? {
            TokenStatus::Valid(claims) => Ok(claims),
            TokenStatus::Invalid(reason) => Err(reason.into()),
            TokenStatus::Revoked(_) => Err(AppError::authentication("Token has been revoked")),
        }
    }
}
