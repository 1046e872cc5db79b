//! Password policy enforcement for new passwords.

use zxcvbn::{Score, zxcvbn};

use authsvc_core::config::AuthConfig;
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;

/// Validates passwords against the configured length and strength policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Maximum password length in characters.
    max_length: usize,
    /// Minimum zxcvbn score; 0 disables the check.
    min_strength: u8,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
            min_strength: config.password_min_strength.min(4),
        }
    }

    /// Validates a password.
    ///
    /// `user_inputs` (e.g. the email address) are penalized by the
    /// strength estimator.
    pub fn validate(&self, password: &str, user_inputs: &[&str]) -> AppResult<()> {
        let length = password.chars().count();

        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be at most {} characters long",
                self.max_length
            )));
        }

        if self.min_strength > 0 {
            let score = score_value(zxcvbn(password, user_inputs).score());
            if score < self.min_strength {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> AppResult<()> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

fn score_value(score: Score) -> u8 {
    match score {
        Score::Zero => 0,
        Score::One => 1,
        Score::Two => 2,
        Score::Three => 3,
        _ => 4,
    }
}
