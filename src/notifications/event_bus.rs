//! Event Bus for broadcasting booking events to subscribers
//!
//! Uses tokio broadcast channel for pub/sub pattern.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::broadcast;

use super::events::{BookingEvent, EventMessage};

/// Default channel capacity
const DEFAULT_CAPACITY: usize = 1024;

/// Event bus for broadcasting events to all subscribers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventBus {
    /// Create a new event bus with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a new event bus with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            subscriber_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish an event to all subscribers. Best-effort: a lagging or
    /// absent consumer never surfaces as an error to the publisher.
    pub fn publish(&self, event: BookingEvent) {
        let message = EventMessage::new(event);
        let event_type = message.event.event_type();
        let reservation_id = message.event.reservation_id().to_string();

        match self.sender.send(message) {
            Ok(count) => {
                debug!(
                    "Event published: type={}, reservation={}, subscribers={}",
                    event_type, reservation_id, count
                );
            }
            Err(_) => {
                // No subscribers - normal when no notification consumer is attached
                debug!(
                    "Event published (no subscribers): type={}, reservation={}",
                    event_type, reservation_id
                );
            }
        }
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> EventSubscriber {
        let receiver = self.sender.subscribe();
        self.subscriber_count.fetch_add(1, Ordering::SeqCst);
        let count = self.subscriber_count.load(Ordering::SeqCst);
        info!("New event subscriber, total: {}", count);

        EventSubscriber {
            receiver,
            subscriber_count: self.subscriber_count.clone(),
        }
    }

    /// Get current subscriber count
    pub fn subscriber_count(&self) -> usize {
        self.subscriber_count.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end of the bus; dropping it unregisters the subscriber
pub struct EventSubscriber {
    receiver: broadcast::Receiver<EventMessage>,
    subscriber_count: Arc<AtomicUsize>,
}

impl EventSubscriber {
    /// Wait for the next event. `None` when the bus is closed or this
    /// subscriber lagged past the channel capacity.
    pub async fn recv(&mut self) -> Option<EventMessage> {
        match self.receiver.recv().await {
            Ok(message) => Some(message),
            Err(broadcast::error::RecvError::Closed) => None,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!("Event subscriber lagged, skipped {} events", skipped);
                self.receiver.recv().await.ok()
            }
        }
    }
}

impl Drop for EventSubscriber {
    fn drop(&mut self) {
        self.subscriber_count.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Create a shared event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}

// ── Tests ──────────────────────────────────────────────────────
