//! Login history repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use authsvc_core::result::AppResult;
use authsvc_core::types::{PageRequest, PageResponse, UserId};
use authsvc_entity::login_history::{CreateLoginHistory, LoginHistory};

/// Storage operations for login history entries.
#[async_trait]
pub trait LoginHistoryRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Record a login.
    async fn create(&self, data: CreateLoginHistory) -> AppResult<LoginHistory>;

    /// List a user's logins, newest first.
    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<LoginHistory>>;

    /// Remove every entry of a user. Returns the number removed.
    async fn delete_by_user(&self, user_id: UserId) -> AppResult<u64>;
}

/// Process-local login history repository. Entries are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoginHistoryRepository {
    entries: Arc<RwLock<Vec<LoginHistory>>>,
}

impl MemoryLoginHistoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LoginHistoryRepository for MemoryLoginHistoryRepository {
    async fn create(&self, data: CreateLoginHistory) -> AppResult<LoginHistory> {
        let entry = LoginHistory::from_create(data);
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<LoginHistory>> {
        let entries = self.entries.read().await;
        let mine: Vec<&LoginHistory> = entries
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id)
            .collect();

        let total = mine.len() as u64;
        let items = mine
            .into_iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect();

        Ok(PageResponse::new(items, page, total))
    }

    async fn delete_by_user(&self, user_id: UserId) -> AppResult<u64> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.user_id != user_id);
        Ok((before - entries.len()) as u64)
    }
}
