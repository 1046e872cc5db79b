//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;

use authsvc_core::config::cache::MemoryCacheConfig;
use authsvc_core::result::AppResult;
use authsvc_core::traits::cache::CacheProvider;

/// A cached value together with its own lifetime.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: &str, ttl: Duration) -> Self {
        Self {
            value: value.to_string(),
            ttl,
            expires_at: Instant::now() + ttl,
        }
    }

    fn remaining(&self) -> Option<Duration> {
        let left = self.expires_at.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }
}

/// Expires every entry after the TTL it was inserted with.
struct PerEntryExpiry;

impl Expiry<String, CacheEntry> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Suitable for single-node deployments and tests: revocations recorded
/// here are not shared between processes.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, CacheEntry>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    ///
    /// No capacity bound is set: moka would evict live entries to honour it,
    /// and a revocation record must outlive the token it denies.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .initial_capacity(config.initial_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    /// Fetch a live entry. moka evicts lazily, so the deadline is re-checked.
    async fn live_entry(&self, key: &str) -> Option<CacheEntry> {
        self.cache
            .get(key)
            .await
            .filter(|entry| entry.remaining().is_some())
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(key.to_string(), CacheEntry::new(value, ttl))
            .await;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // The entry API is atomic per key; expired entries count as vacant.
        let entry = self
            .cache
            .entry_by_ref(key)
            .or_insert_with(async { CacheEntry::new(value, ttl) })
            .await;
        Ok(entry.is_fresh())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.live_entry(key).await.is_some())
    }

    async fn ttl(&self, key: &str) -> AppResult<Option<Duration>> {
        Ok(self.live_entry(key).await.and_then(|entry| entry.remaining()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
