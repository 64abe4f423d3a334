use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::ConfigEvent;

/// In-process event bus backed by `tokio::broadcast`. Single editor node;
/// a save with nobody listening is normal, not an error.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<ConfigEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event; returns how many subscribers received it.
    pub fn publish(&self, event: ConfigEvent) -> usize {
        match self.sender.send(event) {
            Ok(delivered) => delivered,
            // No active subscribers.
            Err(_) => 0,
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
