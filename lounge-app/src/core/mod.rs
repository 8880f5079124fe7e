//! Core module - configuration and store error mapping

pub mod config;
pub mod error;

pub use config::Config;
pub use error::StoreResultExt;
