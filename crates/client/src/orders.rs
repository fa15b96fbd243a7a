//! Order history and checkout service.

use chrono::{DateTime, Utc};
use eyre::Result;
use serde::Serialize;

use mensa_primitives::{CheckoutOutcome, Order};

use crate::connection::ConnectionInfo;

const ORDERS_PATH: &str = "api/orders/orders/";
const CHECKOUT_PATH: &str = "api/orders/checkout/";

#[derive(Debug, Serialize)]
struct CheckoutBody {
    pickup_time: String,
}

/// Placed-order reads and the checkout call.
#[derive(Clone, Debug)]
pub struct OrdersService {
    connection: ConnectionInfo,
}

impl OrdersService {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    /// The user's orders, newest first.
    pub async fn list(&self) -> Result<Vec<Order>> {
        self.connection.get(ORDERS_PATH).await
    }

    /// Snapshot the cart into a paid order for the given pickup time.
    ///
    /// Quota and wallet failures (`ORDER_LIMIT_REACHED`,
    /// `INSUFFICIENT_WALLET_FUNDS`) come back as an `ApiError` whose
    /// message is the server's own wording.
    pub async fn checkout(&self, pickup_time: DateTime<Utc>) -> Result<CheckoutOutcome> {
        self.connection
            .post(
                CHECKOUT_PATH,
                CheckoutBody {
                    pickup_time: pickup_time.to_rfc3339(),
                },
            )
            .await
    }
}
