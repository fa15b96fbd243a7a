//! Client-owned customization of a cart line.
//!
//! A `Customization` is layered on top of a server line by `LineId`. It is
//! not created atomically with the line, so a line may render without one
//! (base price fallback) and an entry may outlive its line (an orphan,
//! pruned on the next reconciliation).

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cart::LineId;
use crate::catalog::{Addon, AddonId, ItemId, MenuItem, SizeOption};
use crate::money::{apply_modifier_bps, MinorUnits};

/// The user's selection from an item's customization flow.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CustomizationChoice {
    pub size: SizeOption,
    pub addon_ids: Vec<AddonId>,
}

impl CustomizationChoice {
    /// Derived unit price: the size surcharge applied to the base price
    /// (rounded half-up to the minor unit), plus each selected add-on.
    ///
    /// Unknown add-on ids contribute nothing.
    #[must_use]
    pub fn unit_price_minor(&self, base_price_minor: MinorUnits, addons: &[Addon]) -> MinorUnits {
        let sized = apply_modifier_bps(base_price_minor, self.size.modifier_bps);
        let extras: MinorUnits = self
            .addon_ids
            .iter()
            .filter_map(|id| addons.iter().find(|a| a.id == *id))
            .map(|a| a.price_minor)
            .sum();
        sized + extras
    }
}

/// A durable customization record, keyed by the server-assigned line id.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Customization {
    pub line_id: LineId,
    pub item_id: ItemId,
    pub size: String,
    #[serde(default)]
    pub addon_ids: BTreeSet<AddonId>,
    pub custom_unit_price_minor: MinorUnits,
    pub base_price_minor_at_save: MinorUnits,
    pub saved_at: i64,
}

impl Customization {
    /// Build the record for a completed customization of `item`, priced at
    /// the moment of saving.
    #[must_use]
    pub fn from_choice(line_id: LineId, item: &MenuItem, choice: &CustomizationChoice) -> Self {
        Self {
            line_id,
            item_id: item.id,
            size: choice.size.name.clone(),
            addon_ids: choice.addon_ids.iter().copied().collect(),
            custom_unit_price_minor: choice.unit_price_minor(item.price_minor, &item.addons),
            base_price_minor_at_save: item.price_minor,
            saved_at: Utc::now().timestamp_millis(),
        }
    }
}
