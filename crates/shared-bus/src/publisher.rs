//! # Event Publisher
//!
//! Engines publish through [`EventPublisher`] once a ledger call has
//! committed, so a rejected call never produces an event.
//!
//! [`InMemoryEventBus`] fans events out over a `tokio::sync::broadcast`
//! channel. Filtering happens on the receiving side; the bus only tracks
//! which topics have live listeners so it can flag events nobody will see.

use crate::events::{EventFilter, EventTopic, SuretyEvent};
use crate::subscriber::{EventStream, EventSubscriber, Subscription, TopicListeners};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Publishing side of the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Broadcast `event`, returning how many subscriptions will see it.
    async fn publish(&self, event: SuretyEvent) -> usize;

    /// Events published since the bus was created.
    fn events_published(&self) -> u64;
}

/// Single-process event bus.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<SuretyEvent>,
    listeners: TopicListeners,
    events_published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus whose subscribers buffer at most `capacity` events each.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            listeners: TopicListeners::default(),
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to events matching `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let lease = self.listeners.lease(&filter);
        debug!(topics = ?filter.topics, "New subscription created");
        Subscription::new(self.sender.subscribe(), filter, lease)
    }

    /// Subscribe and wrap the subscription as a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.subscribe(filter).into_stream()
    }

    /// Live subscriptions whose filter accepts events on `topic`.
    #[must_use]
    pub fn listening_to(&self, topic: EventTopic) -> usize {
        self.listeners.listening_to(topic)
    }

    /// Live subscriptions regardless of filter.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: SuretyEvent) -> usize {
        let topic = event.topic();
        let name = event.name();
        let listeners = self.listeners.listening_to(topic);
        self.events_published.fetch_add(1, Ordering::Relaxed);

        if listeners == 0 {
            // Oracle requests with nobody listening never get answered.
            if topic == EventTopic::Oracles {
                warn!(event = name, "[bus] No oracle listener for event");
            } else {
                debug!(topic = ?topic, event = name, "[bus] Event has no listeners");
            }
            return 0;
        }

        match self.sender.send(event) {
            Ok(_) => {
                debug!(topic = ?topic, event = name, listeners, "[bus] Event published");
                listeners
            }
            Err(_) => 0,
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, filter: EventFilter) -> Subscription {
        InMemoryEventBus::subscribe(self, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::U256;

    fn funded() -> SuretyEvent {
        SuretyEvent::AirlineFunded {
            airline: [1u8; 20],
            amount: U256::from(10),
        }
    }

    #[tokio::test]
    async fn test_publish_without_listeners_is_counted() {
        let bus = InMemoryEventBus::new();

        assert_eq!(bus.publish(funded()).await, 0);
        assert_eq!(bus.events_published(), 1);
    }

    #[tokio::test]
    async fn test_publish_counts_interested_subscriptions_only() {
        let bus = InMemoryEventBus::new();

        let _everything = bus.subscribe(EventFilter::all());
        let _governance = EventSubscriber::subscribe(
            &bus,
            EventFilter::topics(vec![EventTopic::Governance]),
        );
        let _oracles = bus.subscribe(EventFilter::topics(vec![EventTopic::Oracles]));

        assert_eq!(bus.publish(funded()).await, 2);
        assert_eq!(bus.subscriber_count(), 3);
    }

    #[tokio::test]
    async fn test_uninterested_subscription_sees_nothing() {
        let bus = InMemoryEventBus::new();
        let mut oracles = bus.subscribe(EventFilter::topics(vec![EventTopic::Oracles]));

        assert_eq!(bus.publish(funded()).await, 0);
        assert!(matches!(oracles.try_recv(), Ok(None)));
    }

    #[test]
    fn test_default_bus() {
        let bus = InMemoryEventBus::default();
        assert_eq!(bus.capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.events_published(), 0);
        assert_eq!(InMemoryEventBus::with_capacity(16).capacity(), 16);
    }
}
