//! Input validation helpers
//!
//! Centralized text length constants and validation functions. Everything
//! here runs before any remote call.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, promotion title, customer name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and order notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, category ids
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Passwords
pub const MAX_PASSWORD_LEN: usize = 128;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Image references; uploads are stored inline as data URLs
pub const MAX_IMAGE_LEN: usize = 2 * 1024 * 1024;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required_field(field));
    }
    check_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => check_len(v, field, max_len),
        None => Ok(()),
    }
}

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a currency amount: finite and not negative.
pub fn validate_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be a non-negative amount"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a percentage within 0-100.
pub fn validate_percentage(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::new(ErrorCode::PromotionInvalidDiscount).with_detail("field", field));
    }
    Ok(())
}
