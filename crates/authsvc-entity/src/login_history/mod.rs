//! Login history entities.

pub mod model;

pub use model::{ClientInfo, CreateLoginHistory, LoginHistory};
