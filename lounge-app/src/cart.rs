//! Cart accumulator
//!
//! One entry per product id, kept in insertion order. Quantities are
//! always at least 1; setting a quantity to zero or below removes the
//! entry.

use rust_decimal::Decimal;
use shared::models::{CartItem, Product};
use shared::money::to_f64;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit; a new entry starts at quantity 1
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(product.clone(), 1)),
        }
    }

    /// Remove an entry; returns whether it was present
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);
        self.items.len() != before
    }

    /// Set the quantity of an existing entry
    ///
    /// `quantity <= 0` removes the entry. Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole cart, merging duplicate product ids
    pub fn replace(&mut self, items: impl IntoIterator<Item = CartItem>) {
        self.items.clear();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match self.items.iter_mut().find(|i| i.product.id == item.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity)
                }
                None => self.items.push(item),
            }
        }
    }

    /// Sum of price x quantity
    pub fn subtotal(&self) -> f64 {
        to_f64(self.items.iter().map(CartItem::line_total).sum::<Decimal>())
    }

    /// Total units across entries
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
