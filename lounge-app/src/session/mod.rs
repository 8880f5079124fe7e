//! Application session
//!
//! [`AppSession`] owns all session state: the signed-in user, the cart and
//! the cached catalog, orders, users and dashboard config. Views read
//! through accessors; every change goes through one of the operations
//! below, so there is a single writer.
//!
//! # Module layout
//!
//! ```text
//! session/
//! ├── mod.rs        # state, accessors, auth, cart
//! ├── bootstrap.rs  # startup fetch, fallback, refresh
//! ├── checkout.rs   # totals, placing orders, reorder, history, loyalty
//! └── admin.rs      # admin-only writes and statistics
//! ```

mod admin;
mod bootstrap;
mod checkout;

use crate::auth;
use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::core::Config;
use lounge_client::RecordStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DashboardConfig, NewUser, Order, Product, Role, User};
use std::sync::Arc;

pub struct AppSession {
    store: Arc<dyn RecordStore>,
    config: Config,
    user: Option<User>,
    cart: Cart,
    catalog: Catalog,
    orders: Vec<Order>,
    users: Vec<User>,
    dashboard: DashboardConfig,
    degraded: bool,
}

impl AppSession {
    /// Empty session with the built-in catalog; nothing fetched yet
    pub fn new(store: Arc<dyn RecordStore>, config: Config) -> Self {
        Self {
            store,
            config,
            user: None,
            cart: Cart::new(),
            catalog: Catalog::defaults(),
            orders: Vec::new(),
            users: Vec::new(),
            dashboard: DashboardConfig::default(),
            degraded: false,
        }
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role() == Role::Admin)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn products(&self) -> &[Product] {
        &self.catalog.products
    }

    pub fn dashboard(&self) -> &DashboardConfig {
        &self.dashboard
    }

    /// Whether the last fetch fell back to built-in data
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn require_user(&self) -> AppResult<&User> {
        self.user.as_ref().ok_or_else(AppError::not_authenticated)
    }

    fn require_admin(&self) -> AppResult<&User> {
        let user = self.require_user()?;
        if user.role() != Role::Admin {
            tracing::warn!(user_id = %user.id, "Admin operation refused");
            return Err(AppError::admin_required());
        }
        Ok(user)
    }

    // ========== Authentication ==========

    pub async fn login(&mut self, full_name: &str, password: &str) -> AppResult<&User> {
        let user = auth::authenticate(
            self.store.as_ref(),
            self.config.admin.as_ref(),
            full_name,
            password,
        )
        .await?;
        Ok(&*self.user.insert(user))
    }

    /// Create an account and sign it in
    pub async fn register(&mut self, new_user: NewUser, password: &str) -> AppResult<&User> {
        let user = auth::register(self.store.as_ref(), new_user, password).await?;
        self.users.push(user.clone());
        Ok(&*self.user.insert(user))
    }

    /// Sign out and drop the cart
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        self.cart.clear();
    }

    // ========== Cart ==========

    /// Add one unit of a catalog product
    pub fn add_to_cart(&mut self, product_id: &str) -> AppResult<()> {
        let product = self.catalog.find_product(product_id).ok_or_else(|| {
            AppError::new(ErrorCode::ProductNotFound).with_detail("id", product_id)
        })?;
        self.cart.add(product);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    /// Set a quantity; zero or below removes the entry
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}
