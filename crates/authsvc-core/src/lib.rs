//! # authsvc-core
//!
//! Core crate for authsvc. Contains the cache and repository traits,
//! configuration schemas, typed identifiers, pagination types and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other authsvc crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
