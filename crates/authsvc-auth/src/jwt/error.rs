//! Reasons a presented token is rejected.

use thiserror::Error;

use authsvc_core::error::AppError;

use super::claims::TokenType;

/// Why a token failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidToken {
    /// `exp` is in the past (beyond the allowed leeway).
    #[error("Token has expired")]
    Expired,
    /// The signature does not match the payload under the configured secret.
    #[error("Invalid token signature")]
    BadSignature,
    /// The token was signed with an algorithm other than the configured one.
    #[error("Token signed with an unexpected algorithm")]
    UnexpectedAlgorithm,
    /// The token carries no `exp` claim.
    #[error("Token has no expiry")]
    MissingExpiry,
    /// The token is valid but of the other type.
    #[error("Invalid token type: expected {expected} token, got {found}")]
    WrongType {
        /// Type the caller asked for.
        expected: TokenType,
        /// Type carried by the token.
        found: TokenType,
    },
    /// Not decodable as a JWT with our claims.
    #[error("Malformed token: {0}")]
    Malformed(String),
}

impl InvalidToken {
    /// Short machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::BadSignature => "bad_signature",
            Self::UnexpectedAlgorithm => "unexpected_algorithm",
            Self::MissingExpiry => "missing_expiry",
            Self::WrongType { .. } => "wrong_type",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for InvalidToken {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::InvalidAlgorithm => Self::UnexpectedAlgorithm,
            ErrorKind::MissingRequiredClaim(claim) if claim == "exp" => Self::MissingExpiry,
            _ => Self::Malformed(e.to_string()),
        }
    }
}

impl From<InvalidToken> for AppError {
    fn from(e: InvalidToken) -> Self {
        AppError::authentication(e.to_string())
    }
}
