//! The derived, render-ready view of the cart.
//!
//! `DisplayCart` merges a server snapshot with the locally saved
//! customizations. It is recomputed fresh on every read and never stored;
//! the only two sources of truth are the server cart and the customization
//! store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cart::{CartSnapshot, LineId};
use crate::catalog::ItemId;
use crate::customization::Customization;
use crate::money::MinorUnits;

/// One reconciled cart row.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DisplayLine {
    pub line_id: LineId,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    /// The customized unit price when a customization exists, else the
    /// server base price.
    pub unit_price_minor: MinorUnits,
    pub line_total_minor: MinorUnits,
    pub customized: bool,
}

/// The reconciled cart.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DisplayCart {
    pub lines: Vec<DisplayLine>,
    /// The figure to show: the customization-adjusted sum when any line is
    /// customized, otherwise the server total verbatim.
    pub display_total_minor: MinorUnits,
    /// The server-reported base total, kept as a secondary annotation when
    /// it differs from the displayed total.
    pub server_total_minor: MinorUnits,
    pub customized: bool,
}

impl DisplayCart {
    /// Merge a server snapshot with the customizations that survive it.
    ///
    /// `customizations` must already be pruned of orphans; entries whose
    /// line id is absent from the snapshot are simply not consulted here.
    /// The displayed total is the server total verbatim unless at least one
    /// line carries a customization, in which case it is the recomputed sum
    /// — the two figures are never silently conflated.
    #[must_use]
    pub fn merge(snapshot: &CartSnapshot, customizations: &HashMap<LineId, Customization>) -> Self {
        let mut customized = false;

        let lines: Vec<DisplayLine> = snapshot
            .items
            .iter()
            .map(|line| {
                let custom = customizations.get(&line.id);
                let unit_price_minor = custom
                    .map(|c| c.custom_unit_price_minor)
                    .unwrap_or_else(|| line.base_price_minor());
                customized |= custom.is_some();

                DisplayLine {
                    line_id: line.id,
                    item_id: line.item_id(),
                    item_name: line.item.name.clone(),
                    quantity: line.qty,
                    unit_price_minor,
                    line_total_minor: unit_price_minor * MinorUnits::from(line.qty),
                    customized: custom.is_some(),
                }
            })
            .collect();

        let adjusted: MinorUnits = lines.iter().map(|l| l.line_total_minor).sum();
        let display_total_minor = if customized {
            adjusted
        } else {
            snapshot.total_minor
        };

        Self {
            lines,
            display_total_minor,
            server_total_minor: snapshot.total_minor,
            customized,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities, the count badge projection.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
