//! Product Model

use super::serde_helpers::{lenient_f64, null_as_empty};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub description: String,
    /// Unit price in whole currency units (may carry cents)
    #[serde(default, with = "lenient_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub image_url: String,
    /// Category reference (String ID)
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub category_id: String,
    #[serde(default)]
    pub is_combo: bool,
    #[serde(default)]
    pub is_eligible_for_reward: bool,
}

/// Create / edit product payload coming from the admin form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category_id: String,
    pub is_combo: bool,
    pub is_eligible_for_reward: bool,
}

impl ProductDraft {
    /// Materialize the draft under the given identifier
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category_id: self.category_id,
            is_combo: self.is_combo,
            is_eligible_for_reward: self.is_eligible_for_reward,
        }
    }
}

impl From<&Product> for ProductDraft {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            image_url: p.image_url.clone(),
            category_id: p.category_id.clone(),
            is_combo: p.is_combo,
            is_eligible_for_reward: p.is_eligible_for_reward,
        }
    }
}

/// Category entity (static reference set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
