//! Account session flows built on the token lifecycle.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
