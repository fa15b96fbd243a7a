//! Catalog types: categories, menu items, sizes and add-ons.
//!
//! These mirror the shapes served by the catalog resource. Items may carry
//! optional `sizes` and `addons` catalogs which drive the customization
//! flow; older backends omit them and the fields default to empty.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::MinorUnits;

/// Server-assigned identifier of a menu item.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// Server-assigned identifier of an add-on.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AddonId(pub u64);

#[derive(Debug, Error)]
#[error("invalid id: {0}")]
pub struct InvalidId(#[from] ParseIntError);

impl FromStr for ItemId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl FromStr for AddonId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for AddonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A size option for a menu item, e.g. "Large" at +30%.
///
/// The surcharge is expressed in basis points over the base price so the
/// derived unit price stays integer math.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SizeOption {
    pub name: String,
    #[serde(default)]
    pub modifier_bps: u64,
}

impl SizeOption {
    #[must_use]
    pub fn regular() -> Self {
        Self {
            name: "Regular".to_owned(),
            modifier_bps: 0,
        }
    }
}

/// A priced add-on, e.g. "Extra cheese" at 200 minor units.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct Addon {
    pub id: AddonId,
    pub name: String,
    pub price_minor: MinorUnits,
}

/// A single orderable menu item.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price_minor: MinorUnits,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl MenuItem {
    #[must_use]
    pub fn size(&self, name: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.name == name)
    }

    #[must_use]
    pub fn addon(&self, id: AddonId) -> Option<&Addon> {
        self.addons.iter().find(|a| a.id == id)
    }
}

/// A menu category with its items, in the server's display order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

const fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_tolerates_minimal_payload() {
        let item: MenuItem = serde_json::from_str(
            r#"{ "id": 3, "name": "Falafel Wrap", "price_minor": 1200, "rating": 4.5 }"#,
        )
        .unwrap();

        assert_eq!(item.id, ItemId(3));
        assert!(item.is_active);
        assert!(item.sizes.is_empty());
        assert!(item.addons.is_empty());
    }

    #[test]
    fn size_and_addon_lookup() {
        let item: MenuItem = serde_json::from_str(
            r#"{
                "id": 1, "name": "Latte", "price_minor": 1000,
                "sizes": [{ "name": "Large", "modifier_bps": 3000 }],
                "addons": [{ "id": 9, "name": "Extra shot", "price_minor": 200 }]
            }"#,
        )
        .unwrap();

        assert_eq!(item.size("Large").unwrap().modifier_bps, 3000);
        assert!(item.size("Small").is_none());
        assert_eq!(item.addon(AddonId(9)).unwrap().price_minor, 200);
    }
}
