//! User Model

use super::serde_helpers::{lenient_f64, lenient_u32, null_as_empty};
use serde::{Deserialize, Serialize};

/// Session role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary registered customer
    Customer,
    /// Administrator (bootstrap account or flagged user)
    Admin,
}

/// User entity
///
/// `total_spent` is the single source of truth for loyalty points; only
/// the redeemable reward counter is stored next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty::deserialize")]
    pub phone: String,
    /// Lifetime cumulative spend
    #[serde(default, with = "lenient_f64")]
    pub total_spent: f64,
    /// Rewards currently available for redemption
    #[serde(default, with = "lenient_u32")]
    pub rewards_available: u32,
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    pub fn role(&self) -> Role {
        if self.is_admin {
            Role::Admin
        } else {
            Role::Customer
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: String,
    pub phone: String,
}

/// Partial update written after an order is placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyUpdate {
    pub total_spent: f64,
    pub rewards_available: u32,
}

impl User {
    /// Copy of this user with a loyalty update applied
    pub fn with_loyalty(&self, update: LoyaltyUpdate) -> Self {
        Self {
            total_spent: update.total_spent,
            rewards_available: update.rewards_available,
            ..self.clone()
        }
    }
}
