//! Domain types for the Mensa campus food-ordering client.
//!
//! Everything in this crate is a plain data type or a pure function over
//! them. Ownership follows the platform split: the server owns cart lines,
//! quantities and base prices; the client owns customizations and the
//! derived display cart is recomputed fresh on every read.

pub mod cart;
pub mod catalog;
pub mod customization;
pub mod display;
pub mod events;
pub mod money;
pub mod orders;
pub mod wallet;

pub use cart::{CartLine, CartSnapshot, LineId};
pub use catalog::{Addon, AddonId, Category, ItemId, MenuItem, SizeOption};
pub use customization::{Customization, CustomizationChoice};
pub use display::{DisplayCart, DisplayLine};
pub use events::CartEvent;
pub use money::MinorUnits;
pub use orders::{CheckoutOutcome, Order, OrderItem, OrderStatus};
pub use wallet::Wallet;
