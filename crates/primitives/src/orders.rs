//! Order history and checkout types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::MinorUnits;

/// Lifecycle of a placed order, as reported by the server.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// A priced item snapshot frozen into an order at checkout.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrderItem {
    pub item_name: String,
    pub qty: u32,
    pub unit_price_minor: MinorUnits,
    pub line_total_minor: MinorUnits,
}

/// A placed order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    pub total_minor: MinorUnits,
    #[serde(default)]
    pub paid_minor: Option<MinorUnits>,
    pub pickup_time: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Result envelope of the checkout call: `{ ok, code?, message, data? }`.
///
/// Known failure codes are `ORDER_LIMIT_REACHED` (daily quota) and
/// `INSUFFICIENT_WALLET_FUNDS`; unknown codes pass through untouched.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CheckoutOutcome {
    pub ok: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Order>,
}
