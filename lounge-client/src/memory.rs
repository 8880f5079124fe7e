//! In-process record store
//!
//! Used for offline runs and tests. Reads and writes can be made to fail
//! per table to exercise degraded paths.

use crate::query::{Query, SortDirection, Table};
use crate::store::{Record, RecordStore};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Column stamped on insert when the record has none
pub const CREATED_AT: &str = "created_at";

#[derive(Debug, Clone)]
struct Row {
    seq: u64,
    record: Record,
}

#[derive(Debug, Default)]
struct Inner {
    tables: HashMap<Table, Vec<Row>>,
    next_seq: u64,
    failing_reads: HashSet<Table>,
    failing_writes: HashSet<Table>,
}

impl Inner {
    fn push(&mut self, table: Table, mut record: Record) {
        if let Some(obj) = record.as_object_mut() {
            obj.entry(CREATED_AT)
                .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.tables.entry(table).or_default().push(Row { seq, record });
    }

    fn check_write(&self, table: Table) -> ClientResult<()> {
        if self.failing_writes.contains(&table) {
            return Err(ClientError::Unavailable(format!("writes to {} are failing", table)));
        }
        Ok(())
    }

    fn position(&self, table: Table, id: &str) -> Option<usize> {
        self.tables
            .get(&table)?
            .iter()
            .position(|row| record_id(&row.record) == Some(id))
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

/// Shallow merge of object fields
fn merge(target: &mut Record, patch: Record) {
    match (target.as_object_mut(), patch) {
        (Some(obj), Value::Object(fields)) => {
            for (key, value) in fields {
                obj.insert(key, value);
            }
        }
        (_, patch) => *target = patch,
    }
}

/// Order JSON values: numbers numerically, strings lexically, missing last
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// In-memory [`RecordStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records into a table, bypassing fault injection
    pub fn seed(&self, table: Table, records: impl IntoIterator<Item = Record>) {
        let mut inner = self.inner.write();
        for record in records {
            inner.push(table, record);
        }
    }

    /// Builder form of [`seed`](Self::seed)
    pub fn with_records(self, table: Table, records: impl IntoIterator<Item = Record>) -> Self {
        self.seed(table, records);
        self
    }

    /// Snapshot of a table in insertion order
    pub fn records(&self, table: Table) -> Vec<Record> {
        self.inner
            .read()
            .tables
            .get(&table)
            .map(|rows| rows.iter().map(|row| row.record.clone()).collect())
            .unwrap_or_default()
    }

    /// Look up one record by id
    pub fn get(&self, table: Table, id: &str) -> Option<Record> {
        let inner = self.inner.read();
        let index = inner.position(table, id)?;
        Some(inner.tables[&table][index].record.clone())
    }

    pub fn len(&self, table: Table) -> usize {
        self.inner.read().tables.get(&table).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, table: Table) -> bool {
        self.len(table) == 0
    }

    /// Make every read of `table` fail (or stop failing)
    pub fn fail_reads(&self, table: Table, failing: bool) {
        let mut inner = self.inner.write();
        if failing {
            inner.failing_reads.insert(table);
        } else {
            inner.failing_reads.remove(&table);
        }
    }

    /// Make every write to `table` fail (or stop failing)
    pub fn fail_writes(&self, table: Table, failing: bool) {
        let mut inner = self.inner.write();
        if failing {
            inner.failing_writes.insert(table);
        } else {
            inner.failing_writes.remove(&table);
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> ClientResult<Vec<Record>> {
        let inner = self.inner.read();
        if inner.failing_reads.contains(&table) {
            return Err(ClientError::Unavailable(format!("reads from {} are failing", table)));
        }

        let mut rows: Vec<&Row> = inner
            .tables
            .get(&table)
            .map(|rows| rows.iter().filter(|row| query.matches(&row.record)).collect())
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            rows.sort_by(|a, b| {
                let ord = compare_values(a.record.get(field), b.record.get(field))
                    .then(a.seq.cmp(&b.seq));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }

        let limit = query.limit.unwrap_or(usize::MAX);
        Ok(rows.into_iter().take(limit).map(|row| row.record.clone()).collect())
    }

    async fn insert(&self, table: Table, record: Record) -> ClientResult<()> {
        let mut inner = self.inner.write();
        inner.check_write(table)?;
        if let Some(id) = record_id(&record) {
            if inner.position(table, id).is_some() {
                return Err(ClientError::Api {
                    code: "23505".to_string(),
                    message: format!("duplicate id {} in {}", id, table),
                });
            }
        }
        inner.push(table, record);
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, patch: Record) -> ClientResult<()> {
        let mut inner = self.inner.write();
        inner.check_write(table)?;
        let index = inner
            .position(table, id)
            .ok_or_else(|| ClientError::NotFound(format!("{}/{}", table, id)))?;
        if let Some(rows) = inner.tables.get_mut(&table) {
            merge(&mut rows[index].record, patch);
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> ClientResult<()> {
        let mut inner = self.inner.write();
        inner.check_write(table)?;
        if let Some(rows) = inner.tables.get_mut(&table) {
            rows.retain(|row| record_id(&row.record) != Some(id));
        }
        Ok(())
    }

    async fn upsert(&self, table: Table, record: Record) -> ClientResult<()> {
        let mut inner = self.inner.write();
        inner.check_write(table)?;
        let existing = record_id(&record).and_then(|id| inner.position(table, id));
        match existing {
            Some(index) => {
                if let Some(rows) = inner.tables.get_mut(&table) {
                    merge(&mut rows[index].record, record);
                }
            }
            None => inner.push(table, record),
        }
        Ok(())
    }
}
