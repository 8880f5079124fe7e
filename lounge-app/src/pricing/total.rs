//! Order Total Calculator

use super::select_discount;
use serde::Serialize;
use shared::models::{FulfillmentType, Promotion};
use shared::money::{to_decimal, to_f64};

/// `subtotal - discount + delivery fee`
///
/// Redeeming a reward never changes the amount: the complimentary item is
/// communicated through the order note and the hand-off message.
pub fn compute_total(
    subtotal: f64,
    discount: f64,
    fulfillment: FulfillmentType,
    _reward_redeemed: bool,
) -> f64 {
    to_f64(to_decimal(subtotal) - to_decimal(discount) + to_decimal(fulfillment.fee()))
}

/// Checkout summary for a cart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Totals for `subtotal` with the best applicable promotion
    pub fn compute(subtotal: f64, promotions: &[Promotion], fulfillment: FulfillmentType) -> Self {
        let discount = select_discount(subtotal, promotions);
        Self::with_discount(subtotal, discount, fulfillment)
    }

    /// Totals with a discount decided elsewhere, capped at the subtotal
    pub fn with_discount(subtotal: f64, discount: f64, fulfillment: FulfillmentType) -> Self {
        let discount = discount.clamp(0.0, subtotal.max(0.0));
        Self {
            subtotal,
            discount,
            delivery_fee: fulfillment.fee(),
            total: compute_total(subtotal, discount, fulfillment, false),
        }
    }
}
