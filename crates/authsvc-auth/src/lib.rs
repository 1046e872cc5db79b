//! # authsvc-auth
//!
//! Token lifecycle and credential handling for authsvc.
//!
//! ## Modules
//!
//! - `jwt`: typed claims, token issuing and signature/expiry/type verification
//! - `revocation`: denylist of revoked token ids, expiring with the token
//! - `guard`: combines verification and revocation into one outcome
//! - `password`: Argon2id hashing and password policy
//! - `session`: register, login, refresh rotation, logout

pub mod guard;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod session;

pub use guard::{TokenGuard, TokenStatus};
pub use jwt::{Claims, InvalidToken, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use revocation::RevocationStore;
pub use session::{LoginResult, SessionManager};
