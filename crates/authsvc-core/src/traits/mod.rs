//! Core traits defined in `authsvc-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
