//! Lounge Client - record store access for the ordering app
//!
//! The backend is treated as an opaque record store: select, insert,
//! update, delete and upsert over a handful of tables. [`RecordStore`] is
//! the seam; [`RestStore`] talks to the managed backend over HTTP and
//! [`MemoryStore`] keeps everything in process.

pub mod config;
pub mod error;
pub mod memory;
pub mod query;
pub mod rest;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use memory::MemoryStore;
pub use query::{Filter, Query, SortDirection, Table};
pub use rest::RestStore;
pub use store::{Record, RecordStore};
