//! Promotion Model

use super::serde_helpers::{lenient_option_f64, null_as_empty};
use serde::{Deserialize, Serialize};

/// Promotion entity
///
/// A promotion without a positive discount percentage is a display-only
/// banner and never takes part in discount selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub image_url: String,
    /// Discount in percent (0-100); written as `null` when absent so an
    /// update clears it
    #[serde(default, with = "lenient_option_f64")]
    pub discount_percentage: Option<f64>,
    /// Minimum qualifying subtotal
    #[serde(default, with = "lenient_option_f64")]
    pub min_amount: Option<f64>,
}

impl Promotion {
    /// Whether this promotion carries a discount (vs. a plain banner)
    pub fn is_discount(&self) -> bool {
        self.discount_percentage.is_some_and(|pct| pct > 0.0)
    }
}

/// Create / edit promotion payload coming from the admin form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub discount_percentage: Option<f64>,
    pub min_amount: Option<f64>,
}

impl PromotionDraft {
    /// Materialize the draft under the given identifier
    pub fn into_promotion(self, id: impl Into<String>) -> Promotion {
        Promotion {
            id: id.into(),
            title: self.title.trim().to_string(),
            description: self.description,
            image_url: self.image_url,
            discount_percentage: self.discount_percentage,
            min_amount: self.min_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_promotion_is_not_a_discount() {
        let json = r#"{"id": "promo-1", "title": "Happy Hour 2x1", "description": "...", "imageUrl": "img"}"#;
        let promo: Promotion = serde_json::from_str(json).unwrap();
        assert_eq!(promo.discount_percentage, None);
        assert!(!promo.is_discount());

        let zero = Promotion {
            discount_percentage: Some(0.0),
            ..promo
        };
        assert!(!zero.is_discount());
    }

    #[test]
    fn test_absent_discount_serialized_as_null() {
        let banner = PromotionDraft {
            title: "Banner".into(),
            ..PromotionDraft::default()
        }
        .into_promotion("promo-9");
        let value = serde_json::to_value(&banner).unwrap();
        assert!(value["discountPercentage"].is_null());
        assert!(value["minAmount"].is_null());
        assert!(value.as_object().unwrap().contains_key("discountPercentage"));
        assert!(value.as_object().unwrap().contains_key("minAmount"));
    }

    #[test]
    fn test_promotion_numbers_coerced() {
        let json = r#"{"id": "p", "title": "t", "discountPercentage": "20", "minAmount": 2500}"#;
        let promo: Promotion = serde_json::from_str(json).unwrap();
        assert_eq!(promo.discount_percentage, Some(20.0));
        assert_eq!(promo.min_amount, Some(2500.0));
        assert!(promo.is_discount());
    }
}
