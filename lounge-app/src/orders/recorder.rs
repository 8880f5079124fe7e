//! Order Recorder

use crate::cart::Cart;
use crate::catalog::to_record;
use crate::core::StoreResultExt;
use crate::loyalty;
use crate::pricing::OrderTotals;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
};
use chrono::Utc;
use lounge_client::{RecordStore, Table};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DeliveryDetails, FulfillmentType, Order, PaymentMethod, User};
use shared::util::prefixed_id;

/// Appended to the stored note when a reward is redeemed
pub const REWARD_NOTE: &str = "[CANJE DE PREMIO: PRODUCTO SORPRESA]";

/// What the customer confirmed at checkout
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    pub delivery: DeliveryDetails,
    /// Promotion discount for the live subtotal
    pub discount: f64,
    pub reward_redeemed: bool,
}

/// Outcome of a placed order
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The stored snapshot, note already annotated
    pub order: Order,
    /// The customer's own note, before annotation
    pub customer_note: Option<String>,
    pub reward_redeemed: bool,
    pub rewards_earned: u32,
    /// The customer after accrual, or unchanged when the update failed
    pub user: User,
    /// Whether the loyalty update reached the store
    pub loyalty_synced: bool,
}

/// Customer note with the reward marker appended when redeemed
pub fn annotate_note(note: Option<&str>, reward_redeemed: bool) -> Option<String> {
    let note = note.map(str::trim).filter(|n| !n.is_empty());
    match (note, reward_redeemed) {
        (Some(n), true) => Some(format!("{} | {}", n, REWARD_NOTE)),
        (None, true) => Some(REWARD_NOTE.to_string()),
        (Some(n), false) => Some(n.to_string()),
        (None, false) => None,
    }
}

pub struct OrderRecorder<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> OrderRecorder<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Checks that run before anything is written
    pub fn validate<'u>(
        cart: &Cart,
        user: Option<&'u User>,
        request: &CheckoutRequest,
    ) -> AppResult<&'u User> {
        let user = user.ok_or_else(AppError::not_authenticated)?;

        if cart.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let delivery = &request.delivery;
        if delivery.fulfillment == FulfillmentType::Delivery
            && delivery.address.as_deref().is_none_or(|a| a.trim().is_empty())
        {
            return Err(AppError::new(ErrorCode::DeliveryAddressRequired)
                .with_detail("field", "address"));
        }
        validate_optional_text(&Some(delivery.name.clone()), "name", MAX_NAME_LEN)?;
        validate_optional_text(&Some(delivery.phone.clone()), "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&delivery.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&delivery.note, "note", MAX_NOTE_LEN)?;

        if request.reward_redeemed && !loyalty::LoyaltyStatus::for_user(user).can_redeem() {
            return Err(AppError::validation("No rewards available to redeem")
                .with_detail("field", "rewardRedeemed"));
        }
        Ok(user)
    }

    /// Place an order for the live cart
    ///
    /// The order is written first. If that fails nothing else happens. If
    /// the later loyalty update fails the order stands and the result says
    /// so through `loyalty_synced`.
    pub async fn place(
        &self,
        cart: &Cart,
        user: Option<&User>,
        request: CheckoutRequest,
    ) -> AppResult<PlacedOrder> {
        let user = Self::validate(cart, user, &request)?;

        let fulfillment = request.delivery.fulfillment;
        let totals = OrderTotals::with_discount(cart.subtotal(), request.discount, fulfillment);

        let customer_note = request.delivery.trimmed_note().map(str::to_string);
        let delivery = DeliveryDetails {
            address: match fulfillment {
                FulfillmentType::Delivery => {
                    request.delivery.address.as_deref().map(|a| a.trim().to_string())
                }
                FulfillmentType::Pickup => None,
            },
            note: annotate_note(customer_note.as_deref(), request.reward_redeemed),
            ..request.delivery
        };

        let order = Order {
            id: prefixed_id("order"),
            date: Utc::now(),
            items: cart.items().to_vec(),
            total: totals.total,
            discount: totals.discount,
            payment_method: request.payment_method,
            delivery_details: delivery,
            customer_name: user.full_name.clone(),
        };

        self.store
            .insert(Table::Orders, to_record(&order)?)
            .await
            .on_write("insert order")
            .inspect_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Failed to store order");
            })?;

        tracing::info!(
            order_id = %order.id,
            user_id = %user.id,
            total = order.total,
            discount = order.discount,
            reward_redeemed = request.reward_redeemed,
            "Order placed"
        );

        let update = loyalty::accrue(user, order.total, request.reward_redeemed);
        let rewards_earned = loyalty::rewards_earned(user.total_spent, update.total_spent);

        let synced = match to_record(&update) {
            Ok(patch) => self
                .store
                .update(Table::Users, &user.id, patch)
                .await
                .on_write("update loyalty"),
            Err(e) => Err(e),
        };

        let (user, loyalty_synced) = match synced {
            Ok(()) => {
                tracing::info!(
                    user_id = %user.id,
                    total_spent = update.total_spent,
                    rewards_available = update.rewards_available,
                    rewards_earned,
                    "Loyalty updated"
                );
                (user.with_loyalty(update), true)
            }
            Err(e) => {
                tracing::error!(
                    order_id = %order.id,
                    user_id = %user.id,
                    error = %e,
                    "Order stored but loyalty update failed"
                );
                (user.clone(), false)
            }
        };

        Ok(PlacedOrder {
            order,
            customer_note,
            reward_redeemed: request.reward_redeemed,
            rewards_earned: if loyalty_synced { rewards_earned } else { 0 },
            user,
            loyalty_synced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lounge_client::MemoryStore;
    use serde_json::json;
    use shared::models::Product;

    fn make_product(id: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: String::new(),
            price,
            image_url: String::new(),
            category_id: "cat-1".to_string(),
            is_combo: false,
            is_eligible_for_reward: true,
        }
    }

    fn make_user(total_spent: f64, rewards_available: u32) -> User {
        User {
            id: "user-1".to_string(),
            full_name: "Alex Doe".to_string(),
            phone: "123".to_string(),
            total_spent,
            rewards_available,
            is_admin: false,
        }
    }

    fn store_with(user: &User) -> MemoryStore {
        MemoryStore::new().with_records(Table::Users, [serde_json::to_value(user).unwrap()])
    }

    fn cart_of(price: f64, quantity: i64) -> Cart {
        let mut cart = Cart::new();
        let p = make_product("prod-1", price);
        cart.add(&p);
        cart.update_quantity("prod-1", quantity);
        cart
    }

    fn pickup(discount: f64, reward: bool) -> CheckoutRequest {
        CheckoutRequest {
            payment_method: PaymentMethod::Cash,
            delivery: DeliveryDetails::pickup("Alex Doe", "123"),
            discount,
            reward_redeemed: reward,
        }
    }

    #[test]
    fn test_annotate_note() {
        assert_eq!(annotate_note(None, false), None);
        assert_eq!(annotate_note(Some("  "), false), None);
        assert_eq!(annotate_note(Some(" sin cebolla "), false).as_deref(), Some("sin cebolla"));
        assert_eq!(annotate_note(None, true).as_deref(), Some(REWARD_NOTE));
        assert_eq!(
            annotate_note(Some("sin cebolla"), true).unwrap(),
            "sin cebolla | [CANJE DE PREMIO: PRODUCTO SORPRESA]"
        );
    }

    #[tokio::test]
    async fn test_requires_user() {
        let store = MemoryStore::new();
        let err = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 1), None, pickup(0.0, false))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert!(store.is_empty(Table::Orders));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);
        let err = OrderRecorder::new(&store)
            .place(&Cart::new(), Some(&user), pickup(0.0, false))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[tokio::test]
    async fn test_delivery_needs_address() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);
        let mut request = pickup(0.0, false);
        request.delivery.fulfillment = FulfillmentType::Delivery;
        request.delivery.address = Some("   ".into());

        let err = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 1), Some(&user), request)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DeliveryAddressRequired);
    }

    #[tokio::test]
    async fn test_redeem_requires_available_reward() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);
        let err = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 1), Some(&user), pickup(0.0, true))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_place_accrues_loyalty() {
        let user = make_user(2400.0, 0);
        let store = store_with(&user);

        let placed = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 2), Some(&user), pickup(0.0, false))
            .await
            .unwrap();

        assert_eq!(placed.order.total, 200.0);
        assert_eq!(placed.order.customer_name, "Alex Doe");
        assert!(placed.loyalty_synced);
        assert_eq!(placed.rewards_earned, 1);
        assert_eq!(placed.user.total_spent, 2600.0);
        assert_eq!(placed.user.rewards_available, 1);

        let stored_user = store.get(Table::Users, "user-1").unwrap();
        assert_eq!(stored_user["totalSpent"], 2600.0);
        assert_eq!(stored_user["rewardsAvailable"], 1);
        assert_eq!(store.len(Table::Orders), 1);
    }

    #[tokio::test]
    async fn test_reward_annotates_note_but_keeps_total() {
        let user = make_user(100.0, 1);
        let store = store_with(&user);
        let mut request = pickup(0.0, true);
        request.delivery = request.delivery.with_note("extra salsa");

        let placed = OrderRecorder::new(&store)
            .place(&cart_of(500.0, 1), Some(&user), request)
            .await
            .unwrap();

        assert_eq!(placed.order.total, 500.0);
        assert_eq!(placed.customer_note.as_deref(), Some("extra salsa"));
        assert_eq!(
            placed.order.delivery_details.note.as_deref(),
            Some("extra salsa | [CANJE DE PREMIO: PRODUCTO SORPRESA]")
        );
        assert_eq!(placed.user.rewards_available, 0);
    }

    #[tokio::test]
    async fn test_delivery_total_and_pickup_drops_address() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);

        let request = CheckoutRequest {
            payment_method: PaymentMethod::Transfer,
            delivery: DeliveryDetails::delivery("Alex", "123", " Calle Principal #123 "),
            discount: 20.0,
            reward_redeemed: false,
        };
        let placed = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 2), Some(&user), request)
            .await
            .unwrap();
        assert_eq!(placed.order.total, 280.0);
        assert_eq!(
            placed.order.delivery_details.address.as_deref(),
            Some("Calle Principal #123")
        );

        let mut request = pickup(0.0, false);
        request.delivery.address = Some("ignored".into());
        let placed = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 1), Some(&placed.user), request)
            .await
            .unwrap();
        assert!(placed.order.delivery_details.address.is_none());
    }

    #[tokio::test]
    async fn test_order_write_failure_changes_nothing() {
        let user = make_user(2400.0, 0);
        let store = store_with(&user);
        store.fail_writes(Table::Orders, true);

        let err = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 2), Some(&user), pickup(0.0, false))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteWriteFailed);
        assert!(err.is_retryable());
        assert_eq!(store.get(Table::Users, "user-1").unwrap()["totalSpent"], 2400.0);
    }

    #[tokio::test]
    async fn test_user_update_failure_keeps_order() {
        let user = make_user(2400.0, 0);
        let store = store_with(&user);
        store.fail_writes(Table::Users, true);

        let placed = OrderRecorder::new(&store)
            .place(&cart_of(100.0, 2), Some(&user), pickup(0.0, false))
            .await
            .unwrap();
        assert!(!placed.loyalty_synced);
        assert_eq!(placed.rewards_earned, 0);
        assert_eq!(placed.user, user);
        assert_eq!(store.len(Table::Orders), 1);
    }

    #[tokio::test]
    async fn test_snapshot_isolated_from_catalog_edits() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);
        let mut product = make_product("prod-1", 100.0);
        let mut cart = Cart::new();
        cart.add(&product);

        let placed = OrderRecorder::new(&store)
            .place(&cart, Some(&user), pickup(0.0, false))
            .await
            .unwrap();

        product.price = 999.0;
        product.name = "Renamed".into();
        assert_eq!(placed.order.items[0].product.price, 100.0);

        let stored = store.get(Table::Orders, &placed.order.id).unwrap();
        assert_eq!(stored["items"][0]["price"], 100.0);
        assert_eq!(stored["items"][0]["name"], json!("Product prod-1"));
    }

    #[tokio::test]
    async fn test_two_calls_make_two_orders() {
        let user = make_user(0.0, 0);
        let store = store_with(&user);
        let cart = cart_of(100.0, 1);
        let recorder = OrderRecorder::new(&store);

        let first = recorder.place(&cart, Some(&user), pickup(0.0, false)).await.unwrap();
        let second = recorder
            .place(&cart, Some(&first.user), pickup(0.0, false))
            .await
            .unwrap();
        assert_ne!(first.order.id, second.order.id);
        assert_eq!(second.user.total_spent, 200.0);
        assert_eq!(store.len(Table::Orders), 2);
    }
}
