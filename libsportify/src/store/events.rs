//! Store change notifications
//!
//! Every dispatch emits a `StoreEvent` carrying the action name and the state
//! that resulted from it. Emitting never blocks: without subscribers the
//! event is dropped, and a lagging subscriber misses the oldest events.

use tokio::sync::broadcast;

use super::state::AppState;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<StoreEvent>;

/// Default per-subscriber buffer
pub const DEFAULT_CAPACITY: usize = 100;

/// A dispatched action and the state it produced
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEvent {
    /// Action name, e.g. `favourites/addFavourite`
    pub action: &'static str,
    pub state: AppState,
}

/// Broadcast channel for store events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every event emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: StoreEvent) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(action: &'static str) -> StoreEvent {
        StoreEvent {
            action,
            state: AppState::new(),
        }
    }

    #[test]
    fn test_emit_without_subscribers() {
        let bus = EventBus::new(10);
        bus.emit(event("auth/logout"));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive_event() {
        let bus = EventBus::new(10);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.emit(event("auth/logout"));

        assert_eq!(rx1.recv().await.unwrap().action, "auth/logout");
        assert_eq!(rx2.recv().await.unwrap().action, "auth/logout");
    }

    #[tokio::test]
    async fn test_lagging_subscriber_misses_oldest() {
        let bus = EventBus::new(2);
        let mut rx = bus.subscribe();

        bus.emit(event("a"));
        bus.emit(event("b"));
        bus.emit(event("c"));

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        assert_eq!(rx.recv().await.unwrap().action, "b");
        assert_eq!(rx.recv().await.unwrap().action, "c");
    }
}
