//! Sales statistics for the admin dashboard

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{Order, User};
use shared::money::{to_decimal, to_f64};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: f64,
    pub order_count: usize,
    /// Average order total, 0 without orders
    pub average_ticket: f64,
    pub user_count: usize,
}

impl SalesStats {
    pub fn compute(orders: &[Order], users: &[User]) -> Self {
        let total: Decimal = orders.iter().map(|o| to_decimal(o.total)).sum();
        let average = if orders.is_empty() {
            Decimal::ZERO
        } else {
            total / Decimal::from(orders.len())
        };

        Self {
            total_sales: to_f64(total),
            order_count: orders.len(),
            average_ticket: to_f64(average),
            user_count: users.len(),
        }
    }
}
