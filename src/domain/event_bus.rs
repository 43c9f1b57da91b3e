//! Broadcast channel for pointing events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every status
//! change and tracking sample publishes a [`PointingEvent`] through the bus,
//! and every push channel connection subscribes to it.

use tokio::sync::broadcast;

use super::PointingEvent;

/// Broadcast bus for [`PointingEvent`]s.
///
/// Backed by a `tokio::broadcast` channel with a configurable capacity.
/// When the ring buffer is full, the oldest events are dropped for lagging
/// receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PointingEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: PointingEvent) -> usize {
        let event_type = event.event_type_str();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(event_type, delivered, "event published");
        delivered
    }

    /// Creates a new receiver that will receive all future events.
    ///
    /// Each push channel connection calls this once on connect.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PointingEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
