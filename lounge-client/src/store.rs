//! The record store seam

use crate::query::{Query, Table};
use crate::ClientResult;
use async_trait::async_trait;

/// Raw record as stored by the backend
pub type Record = serde_json::Value;

/// Schemaless record store keyed by an `id` field
///
/// Writes that succeed return nothing; callers keep their own copy of
/// what they wrote.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read records matching the query
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Record>>;

    /// Insert one record
    async fn insert(&self, table: Table, record: Record) -> ClientResult<()>;

    /// Merge the fields of `patch` into the record with the given id
    ///
    /// Fails with `NotFound` when no record has that id.
    async fn update(&self, table: Table, id: &str, patch: Record) -> ClientResult<()>;

    /// Delete the record with the given id
    async fn delete(&self, table: Table, id: &str) -> ClientResult<()>;

    /// Insert, or merge into the existing record with the same id
    async fn upsert(&self, table: Table, record: Record) -> ClientResult<()>;
}
