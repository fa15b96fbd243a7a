//! Cross-view notification payloads.

use serde::{Deserialize, Serialize};

/// A payload-free signal that the cart changed in some way. Subscribers
/// re-pull a fresh display cart rather than patching from the event.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CartEvent {
    Changed,
}
