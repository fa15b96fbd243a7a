//! Remote cart gateway.
//!
//! Five operations against the backend cart resource, each resolving to the
//! server's fresh cart snapshot. The server is authoritative for
//! quantities, base prices and the base total; nothing here consults local
//! customization state.

use async_trait::async_trait;
use eyre::{bail, Result};
use serde::Serialize;

use mensa_primitives::{CartLine, CartSnapshot, ItemId, LineId};

use crate::connection::ConnectionInfo;
use crate::errors::ApiError;

const CART_PATH: &str = "api/orders/cart/";
const CART_ITEMS_PATH: &str = "api/orders/cart/items/";

/// The five cart operations. Mutations resolve to the fresh server
/// snapshot or fail; there is no automatic retry and no in-flight
/// cancellation.
#[async_trait]
pub trait CartGateway: Send + Sync {
    async fn fetch_cart(&self) -> Result<CartSnapshot>;

    async fn add_line(&self, item_id: ItemId, qty: u32) -> Result<CartSnapshot>;

    async fn update_quantity(&self, line_id: LineId, qty: u32) -> Result<CartSnapshot>;

    async fn remove_line(&self, line_id: LineId) -> Result<CartSnapshot>;

    async fn clear_cart(&self) -> Result<CartSnapshot>;
}

#[async_trait]
impl<T: CartGateway + ?Sized> CartGateway for std::sync::Arc<T> {
    async fn fetch_cart(&self) -> Result<CartSnapshot> {
        (**self).fetch_cart().await
    }

    async fn add_line(&self, item_id: ItemId, qty: u32) -> Result<CartSnapshot> {
        (**self).add_line(item_id, qty).await
    }

    async fn update_quantity(&self, line_id: LineId, qty: u32) -> Result<CartSnapshot> {
        (**self).update_quantity(line_id, qty).await
    }

    async fn remove_line(&self, line_id: LineId) -> Result<CartSnapshot> {
        (**self).remove_line(line_id).await
    }

    async fn clear_cart(&self) -> Result<CartSnapshot> {
        (**self).clear_cart().await
    }
}

#[derive(Debug, Serialize)]
struct AddLineBody {
    item_id: ItemId,
    qty: u32,
}

#[derive(Debug, Serialize)]
struct UpdateQtyBody {
    qty: u32,
}

/// JSON-over-HTTP implementation against the configured backend.
#[derive(Clone, Debug)]
pub struct HttpCartGateway {
    connection: ConnectionInfo,
}

impl HttpCartGateway {
    #[must_use]
    pub fn new(connection: ConnectionInfo) -> Self {
        Self { connection }
    }

    fn require_token(&self) -> Result<()> {
        if self.connection.token().is_none() {
            bail!(ApiError::unauthenticated());
        }
        Ok(())
    }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
    async fn fetch_cart(&self) -> Result<CartSnapshot> {
        // An anonymous session reads as an empty cart, not an error.
        if self.connection.token().is_none() {
            return Ok(CartSnapshot::empty());
        }
        self.connection.get(CART_PATH).await
    }

    async fn add_line(&self, item_id: ItemId, qty: u32) -> Result<CartSnapshot> {
        self.require_token()?;

        // The item endpoint answers with the created/merged row; the fresh
        // snapshot comes from a follow-up read.
        let _row: CartLine = self
            .connection
            .post(CART_ITEMS_PATH, AddLineBody { item_id, qty })
            .await?;

        self.connection.get(CART_PATH).await
    }

    async fn update_quantity(&self, line_id: LineId, qty: u32) -> Result<CartSnapshot> {
        self.require_token()?;

        let _row: CartLine = self
            .connection
            .patch(&format!("{CART_ITEMS_PATH}{line_id}/"), UpdateQtyBody { qty })
            .await?;

        self.connection.get(CART_PATH).await
    }

    async fn remove_line(&self, line_id: LineId) -> Result<CartSnapshot> {
        self.require_token()?;
        self.connection
            .delete(&format!("{CART_ITEMS_PATH}{line_id}/"))
            .await
    }

    async fn clear_cart(&self) -> Result<CartSnapshot> {
        self.require_token()?;
        self.connection.delete(CART_PATH).await
    }
}
