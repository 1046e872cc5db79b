//! Offset pagination for list queries.

use serde::{Deserialize, Serialize};

/// Default number of items returned.
const DEFAULT_LIMIT: u64 = 100;
/// Upper bound on a single page.
const MAX_LIMIT: u64 = 1000;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request, clamping `limit` to `1..=1000`.
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Items skipped before this page.
    pub skip: u64,
    /// Requested page size.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            skip: page.skip,
            limit: page.limit,
            total_items,
        }
    }

    /// Whether more items exist beyond this page.
    pub fn has_more(&self) -> bool {
        self.skip + (self.items.len() as u64) < self.total_items
    }
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}
