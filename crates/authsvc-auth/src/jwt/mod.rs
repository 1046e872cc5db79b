//! JWT token encoding, decoding, and claims management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod error;

use jsonwebtoken::Algorithm;

use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;

pub use claims::{Claims, TokenType};
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder, TokenPair};
pub use error::InvalidToken;

/// Resolve the configured signing algorithm. Only HMAC algorithms are
/// supported since tokens are signed with a shared secret.
pub fn hmac_algorithm(name: &str) -> AppResult<Algorithm> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::configuration(format!(
            "Unsupported JWT algorithm '{other}'. Supported: HS256, HS384, HS512"
        ))),
    }
}
