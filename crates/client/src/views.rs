//! View synchronization.
//!
//! Each rendering surface (full cart page, slide-out drawer, item-count
//! badge) re-renders independently from a fresh display cart on every
//! cart-changed notification. Surfaces never mutate each other's state;
//! the only coupling is the broadcast channel and the shared engine. A
//! surface that fails to render is logged and skipped, siblings still
//! render.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use eyre::{eyre, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use mensa_primitives::{CartEvent, DisplayCart};
use mensa_primitives::money::format_minor;

use crate::engine::CartManager;
use crate::gateway::CartGateway;
use crate::store::CustomizationStore;

/// One independently rendered surface.
pub trait CartSurface: Send {
    fn name(&self) -> &str;

    /// Fully re-render from the given display cart.
    fn refresh(&mut self, cart: &DisplayCart) -> Result<()>;
}

/// Owns the registered surfaces and fans a fresh display cart out to each
/// of them on every notification.
pub struct ViewHub<G, S> {
    engine: Arc<CartManager<G, S>>,
    surfaces: Vec<Box<dyn CartSurface>>,
}

impl<G, S> std::fmt::Debug for ViewHub<G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewHub")
            .field("surfaces", &self.surfaces.len())
            .finish()
    }
}

impl<G, S> ViewHub<G, S>
where
    G: CartGateway,
    S: CustomizationStore,
{
    #[must_use]
    pub fn new(engine: Arc<CartManager<G, S>>) -> Self {
        Self {
            engine,
            surfaces: Vec::new(),
        }
    }

    pub fn add_surface(&mut self, surface: Box<dyn CartSurface>) {
        self.surfaces.push(surface);
    }

    /// Pull a fresh display cart and re-render every surface. A failing
    /// surface does not abort its siblings.
    pub async fn refresh_all(&mut self) -> Result<()> {
        let cart = self.engine.display_cart().await?;

        for surface in &mut self.surfaces {
            if let Err(err) = surface.refresh(&cart) {
                warn!(surface = surface.name(), %err, "skipping failed surface render");
            }
        }

        Ok(())
    }

    /// Subscribe to the engine's cart-changed channel and re-render on
    /// every signal until the channel closes. A failed cart read leaves
    /// the prior rendered state in place; lagged notifications collapse
    /// into the next refresh.
    pub async fn run(mut self) {
        let mut receiver = self.engine.events().subscribe();

        loop {
            match receiver.recv().await {
                Ok(CartEvent::Changed) => {
                    if let Err(err) = self.refresh_all().await {
                        warn!(%err, "cart refresh failed, keeping previous render");
                    }
                }
                Err(RecvError::Closed) => break,
                Err(RecvError::Lagged(_)) => {}
            }
        }
    }
}

/// The slide-out drawer: a compact per-line summary plus the displayed
/// total, rendered into a shared string.
#[derive(Clone, Debug, Default)]
pub struct DrawerView {
    contents: Arc<Mutex<String>>,
}

impl DrawerView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contents(&self) -> String {
        self.contents
            .lock()
            .map(|contents| contents.clone())
            .unwrap_or_default()
    }
}

impl CartSurface for DrawerView {
    fn name(&self) -> &str {
        "drawer"
    }

    fn refresh(&mut self, cart: &DisplayCart) -> Result<()> {
        let mut rendered = String::new();

        if cart.is_empty() {
            rendered.push_str("Your cart is empty.\n");
        } else {
            for line in &cart.lines {
                rendered.push_str(&format!(
                    "{} × {} — {}\n",
                    line.quantity,
                    line.item_name,
                    format_minor(line.line_total_minor),
                ));
            }
            rendered.push_str(&format!("Total: {}\n", format_minor(cart.display_total_minor)));
            if cart.customized {
                rendered.push_str(&format!(
                    "Base total: {}\n",
                    format_minor(cart.server_total_minor)
                ));
            }
        }

        let mut contents = self
            .contents
            .lock()
            .map_err(|_| eyre!("drawer mount poisoned"))?;
        *contents = rendered;

        Ok(())
    }
}

/// The item-count badge: just the sum of quantities.
#[derive(Clone, Debug, Default)]
pub struct CountBadge {
    count: Arc<AtomicU32>,
}

impl CountBadge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl CartSurface for CountBadge {
    fn name(&self) -> &str {
        "badge"
    }

    fn refresh(&mut self, cart: &DisplayCart) -> Result<()> {
        self.count.store(cart.item_count(), Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mensa_primitives::CartSnapshot;

    use super::*;

    fn cart() -> DisplayCart {
        let snapshot: CartSnapshot = serde_json::from_str(
            r#"{
                "items": [
                    { "id": 7, "qty": 2, "item": { "id": 3, "name": "Latte", "price_minor": 1000 } }
                ],
                "total_minor": 2000
            }"#,
        )
        .unwrap();
        DisplayCart::merge(&snapshot, &HashMap::new())
    }

    #[test]
    fn drawer_renders_lines_and_total() {
        let mut drawer = DrawerView::new();
        drawer.refresh(&cart()).unwrap();

        let contents = drawer.contents();
        assert!(contents.contains("2 × Latte — 20.00"));
        assert!(contents.contains("Total: 20.00"));
        assert!(!contents.contains("Base total"));
    }

    #[test]
    fn badge_tracks_quantity_sum() {
        let mut badge = CountBadge::new();
        badge.refresh(&cart()).unwrap();
        assert_eq!(badge.count(), 2);
    }

    #[test]
    fn drawer_renders_empty_state() {
        let mut drawer = DrawerView::new();
        drawer.refresh(&DisplayCart::default()).unwrap();
        assert!(drawer.contents().contains("empty"));
    }
}
