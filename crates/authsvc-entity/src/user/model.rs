//! User entity model.

use std::fmt;

use authsvc_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (the `sub` claim of issued tokens).
    pub id: UserId,
    /// Unique email address, stored lowercased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh user record from creation data.
    pub fn from_create(data: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Normalized email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Email and plaintext password, as submitted to register or login.
#[derive(Clone, Deserialize, Validate)]
pub struct Credentials {
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl Credentials {
    /// Create credentials from raw input.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email trimmed and lowercased for storage and lookup.
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Changes applied to a stored user in a single write.
#[derive(Clone, Default)]
pub struct UserChanges {
    /// New normalized email address.
    pub email: Option<String>,
    /// New password hash.
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// Whether there is nothing to write.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none()
    }
}

impl fmt::Debug for UserChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserChanges")
            .field("email", &self.email)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Partial update of the caller's own account.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    /// New email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

impl fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUser")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Trim and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
