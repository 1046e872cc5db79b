//! JWT token validation: signature, expiry and type.
//!
//! Revocation is not checked here; see [`crate::guard::TokenGuard`].

use std::fmt;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

use authsvc_core::config::AuthConfig;
use authsvc_core::result::AppResult;
use authsvc_core::types::{TokenId, UserId};

use super::claims::{Claims, TokenType};
use super::error::InvalidToken;
use super::hmac_algorithm;

/// Claims as they arrive on the wire. `exp` is optional here so that a token
/// without one is reported as [`InvalidToken::MissingExpiry`] rather than as
/// a deserialization failure.
#[derive(Deserialize)]
struct WireClaims {
    sub: UserId,
    jti: TokenId,
    #[serde(rename = "type")]
    token_type: TokenType,
    iat: i64,
    #[serde(default)]
    exp: Option<i64>,
}

impl TryFrom<WireClaims> for Claims {
    type Error = InvalidToken;

    fn try_from(wire: WireClaims) -> Result<Self, Self::Error> {
        Ok(Self {
            sub: wire.sub,
            jti: wire.jti,
            token_type: wire.token_type,
            iat: wire.iat,
            exp: wire.exp.ok_or(InvalidToken::MissingExpiry)?,
        })
    }
}

/// Validates JWT tokens signed with the configured secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let mut validation = Validation::new(hmac_algorithm(&config.jwt_algorithm)?);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        })
    }

    /// Decodes a token and checks it is of the `expected` type.
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, InvalidToken> {
        let claims = self.decode(token)?;

        if claims.token_type != expected {
            return Err(InvalidToken::WrongType {
                expected,
                found: claims.token_type,
            });
        }

        Ok(claims)
    }

    /// Decodes a token of either type.
    pub fn decode(&self, token: &str) -> Result<Claims, InvalidToken> {
        decode::<WireClaims>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(InvalidToken::from)
            .and_then(|data| Claims::try_from(data.claims))
            .inspect_err(|reason| debug!(reason = reason.code(), "Token rejected"))
    }
}
