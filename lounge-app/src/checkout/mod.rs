//! Checkout hand-off
//!
//! After an order is stored, staff receive it as a pre-filled chat message.

pub mod message;

pub use message::{Handoff, build_message, whatsapp_link};
