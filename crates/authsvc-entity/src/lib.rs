//! # authsvc-entity
//!
//! Domain entity models for authsvc. Every struct in this crate is either
//! a stored record or the payload used to create or update one.

pub mod login_history;
pub mod user;
pub mod validation;

pub use validation::validate_payload;
