//! Data models
//!
//! Typed entities for the records held by the backend store. Field names
//! follow the store's camelCase JSON.

pub mod dashboard_config;
pub mod order;
pub mod product;
pub mod promotion;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use dashboard_config::*;
pub use order::*;
pub use product::*;
pub use promotion::*;
pub use user::*;
