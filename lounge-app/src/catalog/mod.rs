//! Catalog cache
//!
//! Products, categories and promotions held for the session. Products and
//! promotions are replaced wholesale on fetch and patched by id after admin
//! writes; categories are the fixed built-in set.

pub mod decode;
pub mod defaults;

pub use decode::{RemoteRecord, decode_dashboard, decode_record, decode_records, to_record};
pub use defaults::{default_categories, default_products, default_promotions};

use shared::models::{Category, Product, Promotion};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub promotions: Vec<Promotion>,
}

impl Catalog {
    /// Built-in fallback catalog
    pub fn defaults() -> Self {
        Self {
            categories: default_categories(),
            products: default_products(),
            promotions: default_promotions(),
        }
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_promotion(&self, id: &str) -> Option<&Promotion> {
        self.promotions.iter().find(|p| p.id == id)
    }

    pub fn has_category(&self, id: &str) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    /// Products of one category, in catalog order
    pub fn products_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category_id == category_id)
    }

    /// Promotions that carry a discount
    pub fn discount_promotions(&self) -> impl Iterator<Item = &Promotion> {
        self.promotions.iter().filter(|p| p.is_discount())
    }

    // ========== Cache patches (after successful writes) ==========

    /// Insert or replace by id; new products are appended
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    pub fn remove_product(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }

    /// Insert or replace by id; new promotions are appended
    pub fn upsert_promotion(&mut self, promotion: Promotion) {
        match self.promotions.iter_mut().find(|p| p.id == promotion.id) {
            Some(existing) => *existing = promotion,
            None => self.promotions.push(promotion),
        }
    }

    pub fn remove_promotion(&mut self, id: &str) -> bool {
        let before = self.promotions.len();
        self.promotions.retain(|p| p.id != id);
        self.promotions.len() != before
    }
}
