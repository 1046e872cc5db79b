//! # authsvc-service
//!
//! Account use cases on top of the auth crate. Services follow
//! constructor injection: all dependencies are provided at construction
//! time via `Arc` references.

pub mod account;
pub mod context;

pub use account::AccountService;
pub use context::RequestContext;
