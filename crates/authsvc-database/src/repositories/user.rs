//! User repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_core::types::UserId;
use authsvc_entity::user::{CreateUser, User, UserChanges};

/// Storage operations for user records.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by normalized email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a conflict if the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Apply email and password changes together. Fails with a conflict if
    /// another user owns the new email; nothing is written on failure.
    async fn update(&self, id: UserId, changes: UserChanges) -> AppResult<User>;

    /// Delete a user. Returns `true` if a record was removed.
    async fn delete(&self, id: UserId) -> AppResult<bool>;

    /// Count stored users.
    async fn count(&self) -> AppResult<u64>;
}

#[derive(Debug, Default)]
struct UserTable {
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<String, UserId>,
}

/// Process-local user repository.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    table: Arc<RwLock<UserTable>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .id_by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let mut table = self.table.write().await;
        if table.id_by_email.contains_key(&data.email) {
            return Err(AppError::conflict("Email is already registered"));
        }

        let user = User::from_create(data);
        table.id_by_email.insert(user.email.clone(), user.id);
        table.by_id.insert(user.id, user.clone());

        debug!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> AppResult<User> {
        let mut table = self.table.write().await;
        if !table.by_id.contains_key(&id) {
            return Err(AppError::not_found("User not found"));
        }
        if let Some(email) = &changes.email {
            if let Some(owner) = table.id_by_email.get(email) {
                if *owner != id {
                    return Err(AppError::conflict("Email is already registered"));
                }
            }
        }

        let user = table
            .by_id
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let old_email = match changes.email {
            Some(email) => Some(std::mem::replace(&mut user.email, email)),
            None => None,
        };
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();
        let updated = user.clone();

        if let Some(old_email) = old_email {
            table.id_by_email.remove(&old_email);
            table.id_by_email.insert(updated.email.clone(), id);
        }
        debug!(user_id = %id, "User updated");
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut table = self.table.write().await;
        match table.by_id.remove(&id) {
            Some(user) => {
                table.id_by_email.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.read().await.by_id.len() as u64)
    }
}
