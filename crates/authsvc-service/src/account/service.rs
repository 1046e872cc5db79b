//! User self-service operations: profile, login history, account removal.

use std::sync::Arc;

use tracing::info;

use authsvc_auth::password::{PasswordHasher, PasswordValidator};
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_core::types::{PageRequest, PageResponse};
use authsvc_database::repositories::{LoginHistoryRepository, UserRepository};
use authsvc_entity::login_history::LoginHistory;
use authsvc_entity::user::{UpdateUser, User, UserChanges, model::normalize_email};
use authsvc_entity::validate_payload;

use crate::context::RequestContext;

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Login history repository.
    login_history: Arc<dyn LoginHistoryRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password validator.
    validator: PasswordValidator,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        login_history: Arc<dyn LoginHistoryRepository>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            login_history,
            hasher: PasswordHasher::new(),
            validator,
        }
    }

    /// Gets the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's email and/or password.
    ///
    /// Both fields are validated before anything is written.
    pub async fn update_profile(&self, ctx: &RequestContext, req: UpdateUser) -> AppResult<User> {
        validate_payload(&req)?;
        let mut user = self.get_profile(ctx).await?;

        let new_email = req
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| *email != user.email);

        if let Some(email) = &new_email {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != user.id {
                    return Err(AppError::conflict("Email is already in use"));
                }
            }
        }

        let new_hash = match &req.password {
            Some(password) => {
                let email = new_email.as_deref().unwrap_or(&user.email);
                self.validator.validate(password, &[email])?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            email: new_email,
            password_hash: new_hash,
        };
        let email_changed = changes.email.is_some();
        let password_changed = changes.password_hash.is_some();
        if !changes.is_empty() {
            user = self.users.update(user.id, changes).await?;
        }

        info!(
            user_id = %ctx.user_id,
            email_changed,
            password_changed,
            "Profile updated"
        );

        Ok(user)
    }

    /// Lists the current user's logins, newest first.
    pub async fn login_history(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<LoginHistory>> {
        self.login_history.find_by_user(ctx.user_id, page).await
    }

    /// Deletes the current user together with their login history.
    pub async fn delete_account(&self, ctx: &RequestContext) -> AppResult<()> {
        let removed = self.login_history.delete_by_user(ctx.user_id).await?;
        if !self.users.delete(ctx.user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %ctx.user_id, history_removed = removed, "Account deleted");
        Ok(())
    }
}
