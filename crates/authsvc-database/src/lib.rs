//! # authsvc-database
//!
//! Repository traits for authsvc entities and in-process implementations
//! backed by `tokio::sync::RwLock`. Services hold repositories as
//! `Arc<dyn ...>` so another backend can be slotted in without touching them.

pub mod repositories;

pub use repositories::{
    LoginHistoryRepository, MemoryLoginHistoryRepository, MemoryUserRepository, UserRepository,
};
