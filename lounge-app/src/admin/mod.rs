//! Admin drafts and statistics
//!
//! Drafts are validated here before any write; the writes themselves are
//! session operations.

pub mod stats;

pub use stats::SalesStats;

use crate::utils::validation::{
    MAX_IMAGE_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_amount, validate_percentage,
    validate_required_text,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Category, ProductDraft, PromotionDraft};

/// Product draft checks: name and image required, sane price, known category
///
/// The category check is skipped when no categories are loaded.
pub fn validate_product_draft(draft: &ProductDraft, categories: &[Category]) -> AppResult<()> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&draft.image_url, "imageUrl", MAX_IMAGE_LEN)?;
    if draft.description.chars().count() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long").with_detail("field", "description"));
    }
    validate_amount(draft.price, "price")
        .map_err(|e| AppError::with_message(ErrorCode::ProductInvalidPrice, e.message))?;

    if !categories.is_empty() && !categories.iter().any(|c| c.id == draft.category_id) {
        return Err(AppError::new(ErrorCode::CategoryNotFound)
            .with_detail("categoryId", draft.category_id.clone()));
    }
    Ok(())
}

/// Promotion draft checks: title and image required, percentage 0-100,
/// non-negative minimum
pub fn validate_promotion_draft(draft: &PromotionDraft) -> AppResult<()> {
    validate_required_text(&draft.title, "title", MAX_NAME_LEN)?;
    validate_required_text(&draft.image_url, "imageUrl", MAX_IMAGE_LEN)?;
    if draft.description.chars().count() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long").with_detail("field", "description"));
    }
    if let Some(pct) = draft.discount_percentage {
        validate_percentage(pct, "discountPercentage")?;
    }
    if let Some(min) = draft.min_amount {
        validate_amount(min, "minAmount")?;
    }
    Ok(())
}
