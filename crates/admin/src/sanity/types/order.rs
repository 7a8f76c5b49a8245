//! Order documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use loomwood_core::{OrderId, OrderStatus, PaymentStatus, ProductId};

use crate::components::list_store::Keyed;

use super::common::{ImageRef, PostalAddress};

/// `_type` discriminator for order documents.
pub const DOC_TYPE: &str = "order";

/// A customer order placed through the storefront checkout.
///
/// Line items denormalize the product name and image at purchase time;
/// the product reference is not re-verified against the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDoc {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<PostalAddress>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Keyed for OrderDoc {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl OrderDoc {
    /// Customer's full name for display.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One product + quantity entry within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
    pub quantity: i64,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
}

/// Patch payload for an order: only the status may change, and the only
/// exposed transition is pending → completed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderPatch {
    pub status: OrderStatus,
}
