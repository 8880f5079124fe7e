//! Shared types for the Lounge ordering app
//!
//! Entities, error types, money helpers and utility functions used by both
//! the backend client and the application crate.

pub mod error;
pub mod models;
pub mod money;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
