//! Prepaid wallet types.

use serde::{Deserialize, Serialize};

use crate::money::MinorUnits;

/// The user's prepaid balance.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct Wallet {
    #[serde(default)]
    pub balance_minor: MinorUnits,
}
