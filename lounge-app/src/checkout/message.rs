//! Order hand-off message
//!
//! Staff read this text as-is, so field order, labels and whole-unit
//! `$` amounts stay fixed.

use crate::orders::PlacedOrder;
use shared::models::{FulfillmentType, Order, PaymentMethod};
use shared::money::{format_whole, to_f64};

const NOT_SPECIFIED: &str = "No especificado";

fn or_unspecified(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { NOT_SPECIFIED } else { trimmed }
}

/// Plain-text order message
///
/// `customer_note` is the customer's own note, before any reward marker.
pub fn build_message(
    venue: &str,
    order: &Order,
    customer_note: Option<&str>,
    reward_redeemed: bool,
) -> String {
    let details = &order.delivery_details;
    let is_delivery = details.fulfillment == FulfillmentType::Delivery;
    let mut msg = String::new();

    msg.push_str(&format!("*NUEVO PEDIDO - {}*\n\n", venue));
    msg.push_str(&format!("👤 *Cliente:* {}\n", or_unspecified(&details.name)));
    msg.push_str(&format!("📞 *Teléfono:* {}\n", or_unspecified(&details.phone)));
    msg.push_str(&format!(
        "📍 *Tipo:* {}\n",
        if is_delivery {
            "🚀 Envío a Domicilio (Delivery)"
        } else {
            "🛍️ Recogida en el Local"
        }
    ));
    if is_delivery
        && let Some(address) = details.address.as_deref().map(str::trim).filter(|a| !a.is_empty())
    {
        msg.push_str(&format!("🏠 *Dirección:* {}\n", address));
    }

    msg.push_str("\n📦 *Detalle del Pedido:*\n");
    for item in &order.items {
        msg.push_str(&format!(
            "- {}x {} ({})\n",
            item.quantity,
            item.product.name,
            format_whole(to_f64(item.line_total()))
        ));
    }

    if reward_redeemed {
        msg.push_str("\n🎁 *RECOMPENSA:* ¡Producto Sorpresa Gratis! (Canjeado)\n");
    }

    msg.push_str("\n--- Resumen ---\n");
    msg.push_str(&format!("Subtotal: {}\n", format_whole(order.subtotal())));
    if order.discount > 0.0 {
        msg.push_str(&format!("🔖 Promo Descuento: -{}\n", format_whole(order.discount)));
    }
    if is_delivery {
        msg.push_str(&format!("Envío: {}\n", format_whole(order.delivery_fee())));
    }

    msg.push_str(&format!(
        "\n💳 *Pago:* {}\n",
        match order.payment_method {
            PaymentMethod::Transfer => "Transferencia",
            PaymentMethod::Cash => "Efectivo",
        }
    ));

    let note = customer_note.map(str::trim).unwrap_or("");
    if !note.is_empty() || reward_redeemed {
        let gift = match (reward_redeemed, note.is_empty()) {
            (true, true) => "Incluir regalo por puntos",
            (true, false) => " | Incluir regalo por puntos",
            (false, _) => "",
        };
        msg.push_str(&format!("\n📝 *Notas:* {}{}\n", note, gift));
    }

    msg.push_str(&format!("\n💰 *TOTAL FINAL: {}*\n\n", format_whole(order.total)));
    msg.push_str("_Enviado desde la App Oficial_");
    msg
}

/// Chat deep link with the message pre-filled
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(message))
}

/// Message and link for a placed order
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub message: String,
    pub link: String,
}

impl Handoff {
    pub fn for_order(venue: &str, number: &str, placed: &PlacedOrder) -> Self {
        let message = build_message(
            venue,
            &placed.order,
            placed.customer_note.as_deref(),
            placed.reward_redeemed,
        );
        let link = whatsapp_link(number, &message);
        Self { message, link }
    }
}
