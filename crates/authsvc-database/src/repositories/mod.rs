//! Repository traits and implementations.

pub mod login_history;
pub mod user;

pub use login_history::{LoginHistoryRepository, MemoryLoginHistoryRepository};
pub use user::{MemoryUserRepository, UserRepository};
