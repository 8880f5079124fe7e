//! Orders
//!
//! Checkout turns the live cart into an immutable order snapshot, stores
//! it, then accrues the customer's loyalty fields.
//!
//! ```text
//! Cart + User ─→ OrderRecorder ─→ insert order ─→ update user loyalty
//!                                     │                 │
//!                               (fail: nothing)   (fail: order kept,
//!                                                  loyalty_synced=false)
//! ```

pub mod recorder;

pub use recorder::{CheckoutRequest, OrderRecorder, PlacedOrder, REWARD_NOTE, annotate_note};
