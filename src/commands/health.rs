//! Health check of the configured token stack.

use serde::Serialize;
use tabled::Tabled;

use authsvc_core::config::AppConfig;
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_core::traits::cache::CacheProvider;

use super::TokenStack;
use crate::output::{self, OutputFormat};

/// Health report row
#[derive(Debug, Serialize, Tabled)]
struct HealthReport {
    /// Signing algorithm
    algorithm: String,
    /// Active cache provider
    cache_provider: String,
    /// Whether the cache answered
    cache_healthy: bool,
}

/// Execute the health command
pub async fn execute(config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let stack = TokenStack::connect(config).await?;

    let cache_healthy = match stack.cache.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!(error = %e, "Cache health check failed");
            false
        }
    };

    let report = HealthReport {
        algorithm: config.auth.jwt_algorithm.clone(),
        cache_provider: stack.cache.kind().to_string(),
        cache_healthy,
    };
    output::print_item(&report, format);

    if cache_healthy {
        Ok(())
    } else {
        Err(AppError::cache("Cache is unreachable"))
    }
}
