//! Loyalty program
//!
//! Points and rewards are two projections of one counter, the user's
//! lifetime spend. Nothing here is stored; everything is derived.

mod ledger;

pub use ledger::*;
