//! Discount Selector
//!
//! Picks the single best promotion discount for a subtotal. Discounts
//! never stack.

use rust_decimal::prelude::*;
use shared::models::Promotion;
use shared::money::{to_decimal, to_f64};

/// Whether `promotion` applies to `subtotal`
///
/// Informational promotions (no percentage, or zero) never apply.
pub fn qualifies(promotion: &Promotion, subtotal: Decimal) -> bool {
    promotion.is_discount() && subtotal >= to_decimal(promotion.min_amount.unwrap_or(0.0))
}

/// Discount amount a promotion grants on `subtotal`, if it qualifies
fn discount_for(promotion: &Promotion, subtotal: Decimal) -> Option<Decimal> {
    if !qualifies(promotion, subtotal) {
        return None;
    }
    let pct = to_decimal(promotion.discount_percentage.unwrap_or(0.0));
    Some(subtotal * pct / Decimal::ONE_HUNDRED)
}

/// Best promotion for `subtotal` together with the amount it grants
pub fn best_promotion(subtotal: f64, promotions: &[Promotion]) -> Option<(&Promotion, f64)> {
    let subtotal = to_decimal(subtotal);
    if subtotal <= Decimal::ZERO {
        return None;
    }

    promotions
        .iter()
        .filter_map(|p| discount_for(p, subtotal).map(|d| (p, d)))
        .max_by(|a, b| a.1.cmp(&b.1))
        .map(|(p, d)| (p, to_f64(d)))
}

/// Largest discount any qualifying promotion grants, 0 when none does
pub fn select_discount(subtotal: f64, promotions: &[Promotion]) -> f64 {
    best_promotion(subtotal, promotions).map_or(0.0, |(_, amount)| amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_promo(id: &str, pct: Option<f64>, min: Option<f64>) -> Promotion {
        Promotion {
            id: id.to_string(),
            title: format!("Promo {}", id),
            description: String::new(),
            image_url: "https://img.test/p.jpg".to_string(),
            discount_percentage: pct,
            min_amount: min,
        }
    }

    #[test]
    fn test_picks_maximum_not_sum() {
        let promos = vec![
            make_promo("a", Some(10.0), Some(0.0)),
            make_promo("b", Some(20.0), Some(2500.0)),
        ];
        assert_eq!(select_discount(3000.0, &promos), 600.0);
    }

    #[test]
    fn test_minimum_amount_gate() {
        let promos = vec![
            make_promo("a", Some(10.0), None),
            make_promo("b", Some(20.0), Some(2500.0)),
        ];
        // Below the 2500 minimum only the 10% promotion applies
        assert_eq!(select_discount(2000.0, &promos), 200.0);
        // Exactly at the minimum qualifies
        assert_eq!(select_discount(2500.0, &promos), 500.0);
    }

    #[test]
    fn test_informational_promotions_ignored() {
        let promos = vec![
            make_promo("banner", None, None),
            make_promo("zero", Some(0.0), None),
        ];
        assert_eq!(select_discount(1000.0, &promos), 0.0);
        assert!(best_promotion(1000.0, &promos).is_none());
    }

    #[test]
    fn test_empty_cart_gets_nothing() {
        let promos = vec![make_promo("a", Some(50.0), None)];
        assert_eq!(select_discount(0.0, &promos), 0.0);
        assert_eq!(select_discount(500.0, &[]), 0.0);
    }

    #[test]
    fn test_best_promotion_identity_and_rounding() {
        let promos = vec![
            make_promo("small", Some(5.0), None),
            make_promo("big", Some(12.5), None),
        ];
        let (promo, amount) = best_promotion(335.0, &promos).unwrap();
        assert_eq!(promo.id, "big");
        // 335 * 12.5% = 41.875 -> 41.88
        assert_eq!(amount, 41.88);
    }
}
