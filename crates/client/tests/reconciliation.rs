//! End-to-end behavior of the cart reconciliation engine against a scripted
//! in-memory backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eyre::{bail, Result};

use mensa_client::errors::ApiError;
use mensa_client::{
    CartEvents, CartGateway, CartManager, CartSurface, CountBadge, CustomizationStore,
    DrawerView, MemoryCustomizationStore, ViewHub,
};
use mensa_primitives::cart::CartLineItem;
use mensa_primitives::{
    CartLine, CartSnapshot, Customization, CustomizationChoice, DisplayCart, ItemId, LineId,
    MenuItem,
};

/// A scripted backend: folds repeated adds of the same item into one row,
/// recomputes the base total from base prices, and can be told to fail
/// individual operations to simulate transport trouble.
#[derive(Debug, Default)]
struct MockGateway {
    state: Mutex<MockState>,
    fail_add: AtomicBool,
    fail_update: AtomicBool,
    fail_remove: AtomicBool,
    fail_clear: AtomicBool,
}

#[derive(Debug, Default)]
struct MockState {
    lines: Vec<CartLine>,
    next_line_id: u64,
}

impl MockGateway {
    fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                lines: Vec::new(),
                next_line_id: 1,
            }),
            ..Self::default()
        }
    }

    fn catalog_price(item_id: ItemId) -> (String, u64) {
        match item_id.0 {
            1 => ("Latte".to_owned(), 1000),
            2 => ("Bagel".to_owned(), 700),
            _ => (format!("Item {}", item_id.0), 500),
        }
    }

    fn snapshot_locked(state: &MockState) -> CartSnapshot {
        let total = state
            .lines
            .iter()
            .map(|l| l.item.price_minor * u64::from(l.qty))
            .sum();
        CartSnapshot {
            items: state.lines.clone(),
            total_minor: total,
        }
    }

    fn transport_failure() -> eyre::Report {
        eyre::Report::new(ApiError {
            status_code: 503,
            message: "network unreachable".to_owned(),
        })
    }
}

#[async_trait]
impl CartGateway for MockGateway {
    async fn fetch_cart(&self) -> Result<CartSnapshot> {
        let state = self.state.lock().unwrap();
        Ok(Self::snapshot_locked(&state))
    }

    async fn add_line(&self, item_id: ItemId, qty: u32) -> Result<CartSnapshot> {
        if self.fail_add.load(Ordering::Relaxed) {
            return Err(Self::transport_failure());
        }

        let mut state = self.state.lock().unwrap();
        if let Some(line) = state.lines.iter_mut().find(|l| l.item.id == item_id) {
            line.qty += qty;
        } else {
            let (name, price_minor) = Self::catalog_price(item_id);
            let id = LineId(state.next_line_id);
            state.next_line_id += 1;
            state.lines.push(CartLine {
                id,
                qty,
                item: CartLineItem {
                    id: item_id,
                    name,
                    price_minor,
                    image_url: None,
                },
                line_total_minor: None,
            });
        }
        Ok(Self::snapshot_locked(&state))
    }

    async fn update_quantity(&self, line_id: LineId, qty: u32) -> Result<CartSnapshot> {
        if self.fail_update.load(Ordering::Relaxed) {
            return Err(Self::transport_failure());
        }

        let mut state = self.state.lock().unwrap();
        if qty < 1 {
            bail!(ApiError {
                status_code: 400,
                message: "Quantity must be at least 1.".to_owned(),
            });
        }
        let Some(line) = state.lines.iter_mut().find(|l| l.id == line_id) else {
            bail!(ApiError {
                status_code: 404,
                message: "No such cart item.".to_owned(),
            });
        };
        line.qty = qty;
        Ok(Self::snapshot_locked(&state))
    }

    async fn remove_line(&self, line_id: LineId) -> Result<CartSnapshot> {
        if self.fail_remove.load(Ordering::Relaxed) {
            return Err(Self::transport_failure());
        }

        let mut state = self.state.lock().unwrap();
        state.lines.retain(|l| l.id != line_id);
        Ok(Self::snapshot_locked(&state))
    }

    async fn clear_cart(&self) -> Result<CartSnapshot> {
        if self.fail_clear.load(Ordering::Relaxed) {
            return Err(Self::transport_failure());
        }

        let mut state = self.state.lock().unwrap();
        state.lines.clear();
        Ok(Self::snapshot_locked(&state))
    }
}

fn latte() -> MenuItem {
    serde_json::from_str(
        r#"{
            "id": 1, "name": "Latte", "price_minor": 1000,
            "sizes": [
                { "name": "Regular", "modifier_bps": 0 },
                { "name": "Large", "modifier_bps": 3000 }
            ],
            "addons": [{ "id": 9, "name": "Extra shot", "price_minor": 200 }]
        }"#,
    )
    .unwrap()
}

fn bagel() -> MenuItem {
    serde_json::from_str(r#"{ "id": 2, "name": "Bagel", "price_minor": 700 }"#).unwrap()
}

fn large_with_shot(item: &MenuItem) -> CustomizationChoice {
    CustomizationChoice {
        size: item.size("Large").unwrap().clone(),
        addon_ids: vec![mensa_primitives::AddonId(9)],
    }
}

fn manager() -> CartManager<Arc<MockGateway>, Arc<MemoryCustomizationStore>> {
    CartManager::new(
        Arc::new(MockGateway::new()),
        Arc::new(MemoryCustomizationStore::new()),
        CartEvents::new(),
    )
}

#[tokio::test]
async fn customized_line_displays_saved_unit_price() {
    let engine = manager();
    let item = latte();

    let cart = engine
        .add_item(&item, Some(&large_with_shot(&item)))
        .await
        .unwrap();

    // round(1000 × 1.3) + 200 = 1500, regardless of the server's 1000 base
    assert_eq!(cart.lines[0].unit_price_minor, 1500);
    assert!(cart.lines[0].customized);
}

#[tokio::test]
async fn uncustomized_line_falls_back_to_base_price() {
    let engine = manager();

    let cart = engine.add_item(&bagel(), None).await.unwrap();

    assert_eq!(cart.lines[0].unit_price_minor, 700);
    assert!(!cart.lines[0].customized);
    assert_eq!(cart.display_total_minor, cart.server_total_minor);
}

#[tokio::test]
async fn orphaned_customization_is_pruned_on_read() {
    let engine = manager();

    // An entry for a line the server cart never had.
    engine.store().save(Customization {
        line_id: LineId(7),
        item_id: ItemId(1),
        size: "Large".to_owned(),
        addon_ids: Default::default(),
        custom_unit_price_minor: 1500,
        base_price_minor_at_save: 1000,
        saved_at: 0,
    });

    let cart = engine.display_cart().await.unwrap();

    assert!(cart.is_empty());
    assert!(!engine.store().get_all().contains_key(&LineId(7)));
}

#[tokio::test]
async fn total_rule_selects_server_total_only_when_uncustomized() {
    let engine = manager();
    let item = latte();

    // Plain bagel only: server total verbatim.
    let cart = engine.add_item(&bagel(), None).await.unwrap();
    assert!(!cart.customized);
    assert_eq!(cart.display_total_minor, 700);
    assert_eq!(cart.server_total_minor, 700);

    // Add a customized latte: adjusted sum, server total annotated.
    let cart = engine
        .add_item(&item, Some(&large_with_shot(&item)))
        .await
        .unwrap();
    assert!(cart.customized);
    assert_eq!(cart.server_total_minor, 1700);
    assert_eq!(cart.display_total_minor, 700 + 1500);
}

#[tokio::test]
async fn remove_drops_customization_even_when_transport_fails() {
    let gateway = Arc::new(MockGateway::new());
    let store = Arc::new(MemoryCustomizationStore::new());
    let engine = CartManager::new(Arc::clone(&gateway), Arc::clone(&store), CartEvents::new());
    let item = latte();

    let cart = engine
        .add_item(&item, Some(&large_with_shot(&item)))
        .await
        .unwrap();
    let line_id = cart.lines[0].line_id;
    assert!(store.get(line_id).is_some());

    gateway.fail_remove.store(true, Ordering::Relaxed);
    let result = engine.remove_line(line_id).await;

    assert!(result.is_err());
    assert!(store.get(line_id).is_none());
}

#[tokio::test]
async fn failed_add_saves_no_customization() {
    let gateway = Arc::new(MockGateway::new());
    let store = Arc::new(MemoryCustomizationStore::new());
    let engine = CartManager::new(Arc::clone(&gateway), Arc::clone(&store), CartEvents::new());
    let item = latte();

    gateway.fail_add.store(true, Ordering::Relaxed);
    let result = engine.add_item(&item, Some(&large_with_shot(&item))).await;

    assert!(result.is_err());
    assert!(store.get_all().is_empty());
}

#[tokio::test]
async fn quantity_is_floored_at_one() {
    let engine = manager();
    let cart = engine.add_item(&bagel(), None).await.unwrap();
    let line_id = cart.lines[0].line_id;

    let cart = engine.change_quantity(line_id, 0).await.unwrap();
    assert_eq!(cart.lines[0].quantity, 1);

    let cart = engine.change_quantity(line_id, -5).await.unwrap();
    assert_eq!(cart.lines[0].quantity, 1);
}

#[tokio::test]
async fn customized_price_scales_with_quantity() {
    let engine = manager();
    let item = latte();

    let cart = engine
        .add_item(&item, Some(&large_with_shot(&item)))
        .await
        .unwrap();
    let line_id = cart.lines[0].line_id;

    let cart = engine.change_quantity(line_id, 2).await.unwrap();

    assert_eq!(cart.lines[0].unit_price_minor, 1500);
    assert_eq!(cart.lines[0].line_total_minor, 3000);
    assert_eq!(cart.display_total_minor, 3000);
    // server still totals at the 1000 base
    assert_eq!(cart.server_total_minor, 2000);
}

#[tokio::test]
async fn clear_cart_empties_display_and_store() {
    let engine = manager();
    let latte = latte();
    let bagel_item = bagel();

    let _ = engine
        .add_item(&latte, Some(&large_with_shot(&latte)))
        .await
        .unwrap();
    let _ = engine
        .add_item(
            &bagel_item,
            Some(&CustomizationChoice {
                size: mensa_primitives::SizeOption::regular(),
                addon_ids: Vec::new(),
            }),
        )
        .await
        .unwrap();
    assert_eq!(engine.store().get_all().len(), 2);

    let cart = engine.clear_cart().await.unwrap();

    assert!(cart.is_empty());
    assert_eq!(cart.display_total_minor, 0);
    assert!(engine.store().get_all().is_empty());
}

#[tokio::test]
async fn readding_an_item_supersedes_its_customization() {
    let engine = manager();
    let item = latte();

    let first = engine
        .add_item(&item, Some(&large_with_shot(&item)))
        .await
        .unwrap();
    let line_id = first.lines[0].line_id;
    assert_eq!(engine.store().get(line_id).unwrap().custom_unit_price_minor, 1500);

    // Re-add as Regular with no add-ons: last write wins, no merge.
    let choice = CustomizationChoice {
        size: item.size("Regular").unwrap().clone(),
        addon_ids: Vec::new(),
    };
    let second = engine.add_item(&item, Some(&choice)).await.unwrap();

    assert_eq!(second.lines.len(), 1);
    assert_eq!(second.lines[0].quantity, 2);
    assert_eq!(engine.store().get_all().len(), 1);
    assert_eq!(engine.store().get(line_id).unwrap().custom_unit_price_minor, 1000);
}

#[tokio::test]
async fn mutations_broadcast_cart_changed() {
    let engine = manager();
    let mut rx = engine.events().subscribe();

    let _ = engine.add_item(&bagel(), None).await.unwrap();

    assert!(rx.try_recv().is_ok());
}

/// A surface whose mount point is gone; refresh always fails.
#[derive(Debug)]
struct BrokenSurface;

impl CartSurface for BrokenSurface {
    fn name(&self) -> &str {
        "broken"
    }

    fn refresh(&mut self, _cart: &DisplayCart) -> Result<()> {
        eyre::bail!("mount point missing")
    }
}

#[tokio::test]
async fn failed_surface_does_not_block_siblings() {
    let engine = Arc::new(manager());
    let _ = engine.add_item(&bagel(), None).await.unwrap();

    let badge = CountBadge::new();
    let drawer = DrawerView::new();

    let mut hub = ViewHub::new(Arc::clone(&engine));
    hub.add_surface(Box::new(BrokenSurface));
    hub.add_surface(Box::new(badge.clone()));
    hub.add_surface(Box::new(drawer.clone()));

    hub.refresh_all().await.unwrap();

    assert_eq!(badge.count(), 1);
    assert!(drawer.contents().contains("Bagel"));
}

#[tokio::test]
async fn badge_projection_counts_quantities() {
    let engine = manager();
    let cart = engine.add_item(&bagel(), None).await.unwrap();
    let line_id = cart.lines[0].line_id;
    let _ = engine.change_quantity(line_id, 3).await.unwrap();

    assert_eq!(engine.item_count().await.unwrap(), 3);
}
