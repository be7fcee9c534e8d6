//! # Pool Event Channel
//!
//! Each pool publishes spawn/despawn notifications into a bounded
//! channel. Consumers (presentation, audio, analytics) subscribe to the
//! receiving end and drain it at their own cadence; the pool never
//! blocks on a slow consumer.
//!
//! Uses crossbeam channels for zero-allocation delivery in the hot path.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::ids::Instance;

/// Notification published by a pool around its issue/return boundary.
#[derive(Clone, Debug)]
pub enum PoolEvent {
    /// An instance was issued to a caller.
    Spawned(Instance),
    /// An instance was returned to the pool.
    Despawned(Instance),
}

/// Bounded notification channel owned by one pool.
///
/// Holds both ends so that late subscribers can still attach, and so an
/// unobserved pool never disconnects its own sender.
pub(crate) struct PoolEventBus {
    sender: Sender<PoolEvent>,
    receiver: Receiver<PoolEvent>,
}

impl PoolEventBus {
    /// Creates a new event bus.
    ///
    /// `capacity` bounds the number of undelivered events; beyond it,
    /// new events are dropped rather than blocking the spawn path.
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event (non-blocking).
    ///
    /// Returns `false` if the channel was full and the event dropped.
    #[inline]
    pub(crate) fn publish(&self, event: PoolEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                // Consumer is behind; dropping keeps the spawn path O(1)
                tracing::debug!(?event, "pool event channel full, dropping");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub(crate) fn subscribe(&self) -> PoolEventReceiver {
        PoolEventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for receiving pool events.
#[derive(Clone)]
pub struct PoolEventReceiver {
    receiver: Receiver<PoolEvent>,
}

impl PoolEventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<PoolEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event (non-blocking).
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<PoolEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{Instance, InstanceId, PrototypeId};
    use std::sync::Arc;

    fn instance(raw: u64) -> Instance {
        Instance::new(InstanceId::new(raw), PrototypeId::new(1), Arc::from("Coin"))
    }

    #[test]
    fn test_publish_and_drain() {
        let bus = PoolEventBus::new(8);
        let rx = bus.subscribe();

        assert!(bus.publish(PoolEvent::Spawned(instance(1))));
        assert!(bus.publish(PoolEvent::Despawned(instance(1))));

        let events = rx.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], PoolEvent::Spawned(i) if i.id == InstanceId::new(1)));
        assert!(matches!(&events[1], PoolEvent::Despawned(_)));
        assert_eq!(rx.pending_count(), 0);
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let bus = PoolEventBus::new(1);
        let rx = bus.subscribe();

        assert!(bus.publish(PoolEvent::Spawned(instance(1))));
        assert!(!bus.publish(PoolEvent::Spawned(instance(2))));

        let events = rx.drain();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_late_subscriber_sees_backlog() {
        let bus = PoolEventBus::new(8);
        assert!(bus.publish(PoolEvent::Spawned(instance(7))));

        let rx = bus.subscribe();
        assert!(matches!(rx.try_recv(), Some(PoolEvent::Spawned(_))));
        assert!(rx.try_recv().is_none());
    }
}
