//! Cart reconciliation engine.
//!
//! Merges server-authoritative cart snapshots with locally saved
//! customizations into a single display cart, and performs every mutation
//! so that the customization store and every subscribed view stay
//! consistent with the server.
//!
//! The display cart has no persistent state of its own; it is recomputed
//! fresh on every read. The only durable transitions are on customization
//! entries: absent → present on a successful add, present → present on a
//! re-add, present → absent on remove, clear or orphan pruning.
//!
//! Concurrent mutations on the same line are not coalesced: rapid repeated
//! quantity changes resolve independently and the last response to arrive
//! wins the displayed quantity.

use eyre::Result;
use tracing::debug;

use mensa_primitives::{
    CartSnapshot, Customization, CustomizationChoice, DisplayCart, LineId, MenuItem,
};

use crate::bus::CartEvents;
use crate::gateway::CartGateway;
use crate::store::CustomizationStore;

/// The reconciliation engine. One instance per session, shared by every
/// view.
#[derive(Debug)]
pub struct CartManager<G, S> {
    gateway: G,
    store: S,
    events: CartEvents,
}

impl<G, S> CartManager<G, S>
where
    G: CartGateway,
    S: CustomizationStore,
{
    #[must_use]
    pub fn new(gateway: G, store: S, events: CartEvents) -> Self {
        Self {
            gateway,
            store,
            events,
        }
    }

    /// The notification channel views subscribe to.
    #[must_use]
    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the current server cart and return the reconciled display
    /// cart. Read-only against the server; the one local side effect is
    /// pruning customizations whose line no longer exists.
    pub async fn display_cart(&self) -> Result<DisplayCart> {
        let snapshot = self.gateway.fetch_cart().await?;
        Ok(self.reconcile(&snapshot))
    }

    /// Count-only projection for the badge: sum of quantities.
    pub async fn item_count(&self) -> Result<u32> {
        let snapshot = self.gateway.fetch_cart().await?;
        Ok(snapshot.item_count())
    }

    /// Add one unit of `item` to the cart, optionally with a completed
    /// customization.
    ///
    /// The customization is priced and saved only after the server accepts
    /// the add and assigns the line id — a failed add leaves no local
    /// entry behind. Re-adding an item the server folds into an existing
    /// line supersedes that line's previous customization, last write wins.
    pub async fn add_item(
        &self,
        item: &MenuItem,
        choice: Option<&CustomizationChoice>,
    ) -> Result<DisplayCart> {
        let snapshot = self.gateway.add_line(item.id, 1).await?;

        if let Some(choice) = choice {
            if let Some(line) = snapshot.line_for_item(item.id) {
                self.store
                    .save(Customization::from_choice(line.id, item, choice));
            } else {
                debug!(item_id = %item.id, "added line missing from snapshot, customization dropped");
            }
        }

        self.events.publish();
        Ok(self.reconcile(&snapshot))
    }

    /// Set a line's quantity. Values below 1 (including the result of
    /// decrementing past one) are floored to 1: a no-op floor, not a
    /// removal.
    pub async fn change_quantity(&self, line_id: LineId, qty: i64) -> Result<DisplayCart> {
        let qty = u32::try_from(qty.max(1)).unwrap_or(u32::MAX);
        let snapshot = self.gateway.update_quantity(line_id, qty).await?;
        self.events.publish();
        Ok(self.reconcile(&snapshot))
    }

    /// Remove a line. Its customization is dropped *before* the gateway
    /// call: if the removal fails, the customization is lost slightly
    /// early, which beats an orphan resurrecting on a later render.
    pub async fn remove_line(&self, line_id: LineId) -> Result<DisplayCart> {
        self.store.remove(line_id);
        let snapshot = self.gateway.remove_line(line_id).await?;
        self.events.publish();
        Ok(self.reconcile(&snapshot))
    }

    /// Clear the cart wholesale, dropping every customization.
    pub async fn clear_cart(&self) -> Result<DisplayCart> {
        self.store.clear_all();
        let snapshot = self.gateway.clear_cart().await?;
        self.events.publish();
        Ok(self.reconcile(&snapshot))
    }

    /// Prune orphaned customizations against `snapshot`, then merge what
    /// survives into a display cart.
    fn reconcile(&self, snapshot: &CartSnapshot) -> DisplayCart {
        let mut saved = self.store.get_all();

        let orphans: Vec<LineId> = saved
            .keys()
            .copied()
            .filter(|line_id| snapshot.line(*line_id).is_none())
            .collect();

        for line_id in orphans {
            debug!(%line_id, "pruning orphaned customization");
            self.store.remove(line_id);
            let _ = saved.remove(&line_id);
        }

        DisplayCart::merge(snapshot, &saved)
    }
}
