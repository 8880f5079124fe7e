//! Pricing rules
//!
//! Pure functions over the cart subtotal and the promotion list. Amounts
//! are computed in `Decimal` and returned as `f64` rounded to cents.

mod discount;
mod total;

pub use discount::*;
pub use total::*;
