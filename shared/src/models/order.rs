//! Order Model

use super::product::Product;
use super::serde_helpers::{flexible_datetime, lenient_f64, lenient_u32, null_as_empty};
use crate::money::{to_decimal, to_f64};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Flat fee charged on delivery orders
pub const DELIVERY_FEE: f64 = 100.0;

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Transfer,
}

/// Fulfillment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentType {
    /// Customer collects in person
    #[default]
    Pickup,
    /// Fee-bearing, address required
    Delivery,
}

impl FulfillmentType {
    /// Delivery fee for this fulfillment type
    pub fn fee(&self) -> f64 {
        match self {
            Self::Pickup => 0.0,
            Self::Delivery => DELIVERY_FEE,
        }
    }
}

/// Cart line: a product snapshot plus quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(with = "lenient_u32")]
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// price x quantity
    pub fn line_total(&self) -> Decimal {
        to_decimal(self.product.price) * Decimal::from(self.quantity)
    }
}

/// Delivery / pickup details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryDetails {
    #[serde(rename = "type")]
    pub fulfillment: FulfillmentType,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DeliveryDetails {
    pub fn pickup(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            fulfillment: FulfillmentType::Pickup,
            name: name.into(),
            phone: phone.into(),
            address: None,
            note: None,
        }
    }

    pub fn delivery(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            fulfillment: FulfillmentType::Delivery,
            name: name.into(),
            phone: phone.into(),
            address: Some(address.into()),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Trimmed note, `None` when blank
    pub fn trimmed_note(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Order entity
///
/// Items are copies taken at placement time; later catalog edits never
/// reach a stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Placement timestamp
    #[serde(with = "flexible_datetime")]
    pub date: DateTime<Utc>,
    pub items: Vec<CartItem>,
    /// Amount payable (subtotal - discount + delivery fee)
    #[serde(with = "lenient_f64")]
    pub total: f64,
    /// Promotion discount applied
    #[serde(default, with = "lenient_f64")]
    pub discount: f64,
    pub payment_method: PaymentMethod,
    pub delivery_details: DeliveryDetails,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub customer_name: String,
}

impl Order {
    /// Sum of item line totals
    pub fn subtotal(&self) -> f64 {
        to_f64(self.items.iter().map(CartItem::line_total).sum())
    }

    pub fn delivery_fee(&self) -> f64 {
        self.delivery_details.fulfillment.fee()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
