//! Loyalty Ledger
//!
//! - points: `floor((total_spent mod 2500) / 10)`, shown as progress
//!   towards the next reward
//! - rewards: one per completed 2500 of lifetime spend

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::{LoyaltyUpdate, User};
use shared::money::{to_decimal, to_f64};

/// Spend that completes one reward cycle
pub const CYCLE_AMOUNT: u32 = 2500;

/// Spend per point
pub const POINT_VALUE: u32 = 10;

/// Points in a full cycle
pub const POINTS_THRESHOLD: u32 = CYCLE_AMOUNT / POINT_VALUE;

fn spent(total_spent: f64) -> Decimal {
    to_decimal(total_spent).max(Decimal::ZERO)
}

/// Spend inside the current cycle
pub fn cycle_spent(total_spent: f64) -> f64 {
    to_f64(spent(total_spent) % Decimal::from(CYCLE_AMOUNT))
}

/// Points inside the current cycle, in `0..POINTS_THRESHOLD`
pub fn current_points(total_spent: f64) -> u32 {
    let points = (spent(total_spent) % Decimal::from(CYCLE_AMOUNT)) / Decimal::from(POINT_VALUE);
    points.floor().to_u32().unwrap_or(0)
}

/// Progress towards the next reward, 0-100
pub fn progress_percentage(total_spent: f64) -> f64 {
    let pct = Decimal::from(current_points(total_spent)) * Decimal::ONE_HUNDRED
        / Decimal::from(POINTS_THRESHOLD);
    to_f64(pct)
}

pub fn points_to_next_reward(total_spent: f64) -> u32 {
    POINTS_THRESHOLD - current_points(total_spent)
}

/// Number of full cycles in a lifetime spend
pub fn completed_cycles(total_spent: f64) -> u32 {
    (spent(total_spent) / Decimal::from(CYCLE_AMOUNT))
        .floor()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Rewards unlocked by moving from `old_total` to `new_total`
///
/// Zero when the spend did not grow.
pub fn rewards_earned(old_total: f64, new_total: f64) -> u32 {
    completed_cycles(new_total).saturating_sub(completed_cycles(old_total))
}

/// Loyalty fields after `user` pays `order_total`
///
/// Redeeming consumes one available reward, never going below zero.
pub fn accrue(user: &User, order_total: f64, reward_redeemed: bool) -> LoyaltyUpdate {
    let new_total = to_f64(spent(user.total_spent) + to_decimal(order_total).max(Decimal::ZERO));
    let earned = rewards_earned(user.total_spent, new_total);

    let mut rewards = user.rewards_available.saturating_add(earned);
    if reward_redeemed {
        rewards = rewards.saturating_sub(1);
    }

    LoyaltyUpdate {
        total_spent: new_total,
        rewards_available: rewards,
    }
}

/// Loyalty view for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyStatus {
    pub total_spent: f64,
    pub cycle_spent: f64,
    pub current_points: u32,
    pub points_threshold: u32,
    pub progress_percentage: f64,
    pub points_to_next_reward: u32,
    pub rewards_available: u32,
}

impl LoyaltyStatus {
    pub fn for_user(user: &User) -> Self {
        let total = user.total_spent;
        Self {
            total_spent: total,
            cycle_spent: cycle_spent(total),
            current_points: current_points(total),
            points_threshold: POINTS_THRESHOLD,
            progress_percentage: progress_percentage(total),
            points_to_next_reward: points_to_next_reward(total),
            rewards_available: user.rewards_available,
        }
    }

    /// Whether a reward can be redeemed on the next order
    pub fn can_redeem(&self) -> bool {
        self.rewards_available > 0
    }
}
