//! Checkout, reorder, history and loyalty for the session user

use super::AppSession;
use crate::checkout::Handoff;
use crate::loyalty::LoyaltyStatus;
use crate::orders::{CheckoutRequest, OrderRecorder, PlacedOrder};
use crate::pricing::{OrderTotals, select_discount};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DeliveryDetails, FulfillmentType, Order, PaymentMethod, Role};

impl AppSession {
    /// Promotion discount for the live cart
    pub fn current_discount(&self) -> f64 {
        select_discount(self.cart.subtotal(), &self.catalog.promotions)
    }

    /// Totals preview for the live cart
    pub fn checkout_totals(&self, fulfillment: FulfillmentType) -> OrderTotals {
        OrderTotals::compute(self.cart.subtotal(), &self.catalog.promotions, fulfillment)
    }

    /// Place an order for the live cart
    ///
    /// The discount is recomputed here from the cart as it is now. On a
    /// failed order write nothing local changes. Once the order is stored
    /// it is cached and the cart is cleared, even if the loyalty update
    /// then fails.
    pub async fn place_order(
        &mut self,
        payment_method: PaymentMethod,
        delivery: DeliveryDetails,
        reward_redeemed: bool,
    ) -> AppResult<PlacedOrder> {
        let request = CheckoutRequest {
            payment_method,
            delivery,
            discount: self.current_discount(),
            reward_redeemed,
        };
        let placed = OrderRecorder::new(self.store.as_ref())
            .place(&self.cart, self.user.as_ref(), request)
            .await?;

        self.orders.insert(0, placed.order.clone());
        if placed.loyalty_synced {
            if let Some(cached) = self.users.iter_mut().find(|u| u.id == placed.user.id) {
                *cached = placed.user.clone();
            }
            self.user = Some(placed.user.clone());
        }
        self.cart.clear();

        Ok(placed)
    }

    /// Chat hand-off for a placed order
    pub fn handoff(&self, placed: &PlacedOrder) -> Handoff {
        Handoff::for_order(
            &self.config.venue_name,
            &self.config.whatsapp_number,
            placed,
        )
    }

    /// Replace the cart with the items of a past order
    ///
    /// Customers can only reorder their own orders; admins any order.
    pub fn reorder(&mut self, order_id: &str) -> AppResult<()> {
        let user = self.require_user()?;
        let is_admin = user.role() == Role::Admin;
        let items = self
            .orders
            .iter()
            .filter(|o| is_admin || o.customer_name == user.full_name)
            .find(|o| o.id == order_id)
            .map(|o| o.items.clone())
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", order_id))?;

        self.cart.replace(items);
        tracing::info!(order_id, items = self.cart.item_count(), "Cart refilled from order");
        Ok(())
    }

    /// The session user's orders, newest first
    pub fn order_history(&self) -> AppResult<Vec<&Order>> {
        let user = self.require_user()?;
        Ok(self
            .orders
            .iter()
            .filter(|o| o.customer_name == user.full_name)
            .collect())
    }

    pub fn loyalty_status(&self) -> AppResult<LoyaltyStatus> {
        self.require_user().map(LoyaltyStatus::for_user)
    }
}
