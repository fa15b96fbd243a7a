//! Server-owned cart wire types.
//!
//! The cart resource returns `{ items: [{ id, qty, item: { id, name,
//! price_minor, image_url? } }], total_minor }`. The server is the single
//! source of truth for quantities, base prices and the base total; these
//! types are transient per-render caches of that snapshot and must tolerate
//! unknown fields.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::ItemId;
use crate::money::MinorUnits;

/// Server-assigned identifier of one cart line. Stable for the life of the
/// line and the join key to local customization.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

#[derive(Debug, Error)]
#[error("invalid line id: {0}")]
pub struct InvalidLineId(#[from] ParseIntError);

impl FromStr for LineId {
    type Err = InvalidLineId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The item payload nested inside a cart line.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CartLineItem {
    pub id: ItemId,
    pub name: String,
    pub price_minor: MinorUnits,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One row of the server cart: an item/quantity pairing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CartLine {
    pub id: LineId,
    pub qty: u32,
    pub item: CartLineItem,
    #[serde(default)]
    pub line_total_minor: Option<MinorUnits>,
}

impl CartLine {
    #[must_use]
    pub fn item_id(&self) -> ItemId {
        self.item.id
    }

    #[must_use]
    pub fn base_price_minor(&self) -> MinorUnits {
        self.item.price_minor
    }
}

/// A full server cart snapshot.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_minor: MinorUnits,
}

impl CartSnapshot {
    /// The empty cart of an anonymous session.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.items.iter().find(|line| line.id == id)
    }

    /// The most recent line carrying the given item, if any. The backend
    /// folds repeated adds of the same item into one row, so this is how a
    /// freshly added line is located in the returned snapshot.
    #[must_use]
    pub fn line_for_item(&self, item_id: ItemId) -> Option<&CartLine> {
        self.items.iter().rev().find(|line| line.item.id == item_id)
    }

    /// Sum of quantities across all lines, the count badge projection.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.qty).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_shape_with_unknown_fields() {
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{
                "id": 12,
                "items": [
                    { "id": 7, "qty": 2, "line_total_minor": 2400,
                      "item": { "id": 3, "name": "Shawarma", "price_minor": 1200 } }
                ],
                "total_minor": 2400,
                "updated_at": "2025-10-25T12:30:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.line(LineId(7)).unwrap().qty, 2);
        assert_eq!(snapshot.item_count(), 2);
        assert_eq!(snapshot.total_minor, 2400);
    }

    #[test]
    fn line_for_item_prefers_latest_row() {
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{
                "items": [
                    { "id": 1, "qty": 1, "item": { "id": 3, "name": "A", "price_minor": 100 } },
                    { "id": 2, "qty": 1, "item": { "id": 3, "name": "A", "price_minor": 100 } }
                ],
                "total_minor": 200
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.line_for_item(ItemId(3)).unwrap().id, LineId(2));
    }

    #[test]
    fn empty_snapshot_defaults() {
        let snapshot: CartSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_minor, 0);
    }
}
