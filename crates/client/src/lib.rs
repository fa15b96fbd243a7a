//! Mensa client library.
//!
//! The browser-side half of the Mensa campus food platform, as a reusable
//! Rust library: menu and account services, a remote cart gateway, the
//! client-local customization store, the cart reconciliation engine that
//! merges the two into a consistent display cart, and the notification
//! fan-out that keeps independent view surfaces in sync after every
//! mutation.
//!
//! All pricing authority, inventory and order state live in the backend;
//! this crate presents, caches per render, and reconciles.

pub mod auth;
pub mod bus;
pub mod connection;
pub mod engine;
pub mod errors;
pub mod gateway;
pub mod menu;
pub mod orders;
pub mod session;
pub mod store;
pub mod views;
pub mod wallet;

pub use auth::{AuthService, UserProfile};
pub use bus::CartEvents;
pub use connection::ConnectionInfo;
pub use engine::CartManager;
pub use errors::ApiError;
pub use eyre::Result;
pub use gateway::{CartGateway, HttpCartGateway};
pub use menu::MenuService;
pub use orders::OrdersService;
pub use session::{AnonymousSession, MemorySession, SessionTokens};
pub use store::{CustomizationStore, FileCustomizationStore, MemoryCustomizationStore};
pub use url::Url;
pub use views::{CartSurface, CountBadge, DrawerView, ViewHub};
pub use wallet::WalletService;
