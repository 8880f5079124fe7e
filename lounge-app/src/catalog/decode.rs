//! Boundary decoding of raw store records
//!
//! Every record coming out of the store is decoded into its typed entity
//! and checked before it can reach the rules. Records that fail are
//! dropped with a warning.

use lounge_client::Record;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DashboardConfig, DashboardConfigRecord, Order, Product, Promotion, User};

/// Entity decoded from a raw store record
pub trait RemoteRecord: DeserializeOwned {
    const KIND: &'static str;

    /// Semantic checks beyond the shape serde enforces
    fn check(&self) -> Result<(), String>;
}

fn check_id(id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err("empty id".to_string());
    }
    Ok(())
}

fn check_amount(value: f64, field: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a non-negative amount, got {}", field, value));
    }
    Ok(())
}

impl RemoteRecord for Product {
    const KIND: &'static str = "product";

    fn check(&self) -> Result<(), String> {
        check_id(&self.id)?;
        if self.name.trim().is_empty() {
            return Err("empty name".to_string());
        }
        check_amount(self.price, "price")
    }
}

impl RemoteRecord for Promotion {
    const KIND: &'static str = "promotion";

    fn check(&self) -> Result<(), String> {
        check_id(&self.id)?;
        if let Some(pct) = self.discount_percentage {
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                return Err(format!("discount percentage out of range: {}", pct));
            }
        }
        if let Some(min) = self.min_amount {
            check_amount(min, "minAmount")?;
        }
        Ok(())
    }
}

impl RemoteRecord for User {
    const KIND: &'static str = "user";

    fn check(&self) -> Result<(), String> {
        check_id(&self.id)?;
        check_amount(self.total_spent, "totalSpent")
    }
}

impl RemoteRecord for Order {
    const KIND: &'static str = "order";

    fn check(&self) -> Result<(), String> {
        check_id(&self.id)?;
        check_amount(self.total, "total")?;
        check_amount(self.discount, "discount")?;
        for item in &self.items {
            check_amount(item.product.price, "item price")?;
        }
        Ok(())
    }
}

/// Decode and check one record
pub fn decode_record<T: RemoteRecord>(record: Record) -> AppResult<T> {
    let id = record
        .get("id")
        .and_then(|v| v.as_str())
        .unwrap_or("?")
        .to_string();
    let value: T = serde_json::from_value(record).map_err(|e| invalid(T::KIND, &id, e))?;
    value.check().map_err(|e| invalid(T::KIND, &id, e))?;
    Ok(value)
}

fn invalid(kind: &str, id: &str, reason: impl std::fmt::Display) -> AppError {
    AppError::with_message(
        ErrorCode::RemoteRecordInvalid,
        format!("invalid {} record {}: {}", kind, id, reason),
    )
    .with_detail("kind", kind)
    .with_detail("id", id)
}

/// Decode a batch, dropping records that fail
pub fn decode_records<T: RemoteRecord>(records: Vec<Record>) -> Vec<T> {
    let total = records.len();
    let decoded: Vec<T> = records
        .into_iter()
        .filter_map(|record| match decode_record(record) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(kind = T::KIND, error = %e, "Dropping invalid record");
                None
            }
        })
        .collect();

    if decoded.len() != total {
        tracing::warn!(
            kind = T::KIND,
            kept = decoded.len(),
            dropped = total - decoded.len(),
            "Some records failed validation"
        );
    }
    decoded
}

/// Dashboard config from the singleton rows, `None` when absent or malformed
pub fn decode_dashboard(records: Vec<Record>) -> Option<DashboardConfig> {
    let record = records.into_iter().next()?;
    match serde_json::from_value::<DashboardConfigRecord>(record) {
        Ok(row) => Some(row.config),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed dashboard config");
            None
        }
    }
}

/// Serialize an entity into a store record
pub fn to_record<T: Serialize>(value: &T) -> AppResult<Record> {
    serde_json::to_value(value)
        .map_err(|e| AppError::internal(format!("failed to encode record: {}", e)))
}
