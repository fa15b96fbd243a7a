//! Cart-changed notification bus.
//!
//! A process-wide publish/subscribe channel. Delivery is best-effort: a
//! subscriber that was not listening at publish time gets nothing and
//! simply re-reads state on its own next mount.

use tokio::sync::broadcast;

use mensa_primitives::CartEvent;

const CHANNEL_CAPACITY: usize = 32;

/// Handle to the cart-changed channel. Cloneable; any holder may publish or
/// subscribe.
#[derive(Clone, Debug)]
pub struct CartEvents {
    sender: broadcast::Sender<CartEvent>,
}

impl CartEvents {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Broadcast a cart-changed signal. Having no subscribers is fine.
    pub fn publish(&self) {
        let _ = self.sender.send(CartEvent::Changed);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.sender.subscribe()
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let events = CartEvents::new();
        let mut rx = events.subscribe();

        events.publish();

        assert_eq!(rx.recv().await.unwrap(), CartEvent::Changed);
    }

    #[tokio::test]
    async fn late_subscribers_get_no_replay() {
        let events = CartEvents::new();
        events.publish();

        let mut rx = events.subscribe();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        CartEvents::new().publish();
    }
}
