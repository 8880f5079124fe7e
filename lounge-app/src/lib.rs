//! Lounge ordering app
//!
//! # Overview
//!
//! The rule layer and session controller of a small venue ordering app:
//!
//! - **Pricing** (`pricing`): promotion discount selection and order totals
//! - **Loyalty** (`loyalty`): spend cycles, points and rewards
//! - **Orders** (`orders`): recording an order and the loyalty update
//! - **Checkout** (`checkout`): chat hand-off message and link
//! - **Session** (`session`): single owner of user, cart and caches
//!
//! # Module layout
//!
//! ```text
//! lounge-app/src/
//! ├── core/       # configuration, store error mapping
//! ├── auth/       # login, registration, bootstrap admin
//! ├── catalog/    # catalog cache, built-in data, record decoding
//! ├── cart.rs     # cart entries
//! ├── pricing/    # discount selector, totals
//! ├── loyalty/    # loyalty ledger
//! ├── orders/     # order recorder
//! ├── checkout/   # hand-off message
//! ├── admin/      # draft validation, sales stats
//! ├── dashboard.rs# raffle date
//! ├── session/    # application session
//! └── utils/      # logging, validation
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod dashboard;
pub mod loyalty;
pub mod orders;
pub mod pricing;
pub mod session;
pub mod utils;

// Re-export common types
pub use auth::AdminCredential;
pub use cart::Cart;
pub use catalog::Catalog;
pub use checkout::Handoff;
pub use core::Config;
pub use loyalty::LoyaltyStatus;
pub use orders::PlacedOrder;
pub use pricing::OrderTotals;
pub use session::AppSession;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and start logging according to the environment
pub fn setup_environment() -> Config {
    // Missing .env is fine
    let _ = dotenv::dotenv();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}

pub fn print_banner() {
    println!(
        r#"
    __
   / /   ____  __  ______  ____ ____
  / /   / __ \/ / / / __ \/ __ `/ _ \
 / /___/ /_/ / /_/ / / / / /_/ /  __/
/_____/\____/\__,_/_/ /_/\__, /\___/
                        /____/
    "#
    );
}
