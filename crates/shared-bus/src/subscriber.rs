//! # Event Subscriber
//!
//! Subscriptions filter the broadcast by topic and keep a per-topic listener
//! count up to date for as long as they live, so publishers can tell when an
//! event has nobody interested in it (an `OracleRequest` with no coordinator
//! running, for instance).

use crate::events::{EventFilter, EventTopic, SuretyEvent};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::debug;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was closed.
    #[error("Event bus closed")]
    Closed,
}

/// Anything events can be subscribed from.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe to events matching a filter.
    fn subscribe(&self, filter: EventFilter) -> Subscription;
}

// =============================================================================
// LISTENER ACCOUNTING
// =============================================================================

/// Live subscription count per topic. Unfiltered subscriptions count under
/// `EventTopic::All`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TopicListeners {
    counts: Arc<Mutex<HashMap<EventTopic, usize>>>,
}

impl TopicListeners {
    fn keys(filter: &EventFilter) -> Vec<EventTopic> {
        if filter.topics.is_empty() || filter.topics.contains(&EventTopic::All) {
            vec![EventTopic::All]
        } else {
            let mut topics = filter.topics.clone();
            topics.sort_by_key(|t| *t as u8);
            topics.dedup();
            topics
        }
    }

    /// Count a new subscription with `filter` until the lease drops.
    pub(crate) fn lease(&self, filter: &EventFilter) -> TopicLease {
        let topics = Self::keys(filter);
        let mut counts = self.counts.lock();
        for topic in &topics {
            *counts.entry(*topic).or_insert(0) += 1;
        }
        drop(counts);
        TopicLease {
            listeners: self.clone(),
            topics,
        }
    }

    /// Subscriptions that would receive an event on `topic`.
    pub(crate) fn listening_to(&self, topic: EventTopic) -> usize {
        let counts = self.counts.lock();
        let all = counts.get(&EventTopic::All).copied().unwrap_or(0);
        if topic == EventTopic::All {
            return all;
        }
        all + counts.get(&topic).copied().unwrap_or(0)
    }
}

/// Keeps one subscription counted.
#[derive(Debug)]
pub(crate) struct TopicLease {
    listeners: TopicListeners,
    topics: Vec<EventTopic>,
}

impl Drop for TopicLease {
    fn drop(&mut self) {
        let mut counts = self.listeners.counts.lock();
        for topic in &self.topics {
            if let Some(count) = counts.get_mut(topic) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    counts.remove(topic);
                }
            }
        }
        debug!(topics = ?self.topics, "Subscription dropped");
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// A filtered receiver of ledger events.
pub struct Subscription {
    receiver: broadcast::Receiver<SuretyEvent>,
    filter: EventFilter,
    _lease: TopicLease,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<SuretyEvent>,
        filter: EventFilter,
        lease: TopicLease,
    ) -> Self {
        Self {
            receiver,
            filter,
            _lease: lease,
        }
    }

    /// Next event matching the filter, or `None` once the bus is gone.
    ///
    /// Events overwritten while this subscriber lagged are skipped.
    pub async fn recv(&mut self) -> Option<SuretyEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Subscriber lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-buffered matching event, without waiting.
    ///
    /// `Ok(None)` when nothing matching is buffered.
    pub fn try_recv(&mut self) -> Result<Option<SuretyEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) | Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Turn this subscription into a `Stream`.
    #[must_use]
    pub fn into_stream(self) -> EventStream {
        EventStream {
            inner: BroadcastStream::new(self.receiver),
            filter: self.filter,
            _lease: self._lease,
        }
    }
}

// =============================================================================
// STREAM
// =============================================================================

/// `Stream` view of a subscription, for use with stream combinators.
pub struct EventStream {
    inner: BroadcastStream<SuretyEvent>,
    filter: EventFilter,
    _lease: TopicLease,
}

impl EventStream {
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }
}

impl Stream for EventStream {
    type Item = SuretyEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => {
                    if self.filter.matches(&event) {
                        return Poll::Ready(Some(event));
                    }
                }
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    debug!(skipped, "Stream lagged, events dropped");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::InMemoryEventBus;
    use crate::EventPublisher;
    use shared_types::U256;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    fn registered() -> SuretyEvent {
        SuretyEvent::AirlineRegistered {
            airline: [1u8; 20],
            name: "Delta".into(),
        }
    }

    fn request() -> SuretyEvent {
        SuretyEvent::OracleRequest {
            indexes: [0, 4, 7],
            airline: [1u8; 20],
            key: [9u8; 32],
            timestamp: 42,
        }
    }

    #[tokio::test]
    async fn test_recv_skips_other_topics() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Oracles]));

        bus.publish(registered()).await;
        bus.publish(request()).await;

        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(received, request());
        assert!(matches!(sub.try_recv(), Ok(None)));
    }

    #[tokio::test]
    async fn test_subscription_survives_lag() {
        let bus = InMemoryEventBus::with_capacity(2);
        let mut sub = bus.subscribe(EventFilter::all());

        for amount in 0..5u64 {
            bus.publish(SuretyEvent::AirlineFunded {
                airline: [1u8; 20],
                amount: U256::from(amount),
            })
            .await;
        }

        // only the two newest are still buffered
        let received = timeout(Duration::from_millis(100), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        assert_eq!(
            received,
            SuretyEvent::AirlineFunded {
                airline: [1u8; 20],
                amount: U256::from(3),
            }
        );
    }

    #[tokio::test]
    async fn test_recv_returns_none_when_bus_dropped() {
        let bus = InMemoryEventBus::new();
        let mut sub = bus.subscribe(EventFilter::all());
        drop(bus);

        assert!(sub.recv().await.is_none());
        assert_eq!(sub.try_recv(), Err(SubscriptionError::Closed));
    }

    #[test]
    fn test_listener_counts_follow_leases() {
        let bus = InMemoryEventBus::new();
        {
            let _oracles = bus.subscribe(EventFilter::topics(vec![
                EventTopic::Oracles,
                EventTopic::Oracles,
            ]));
            let _everything = bus.subscribe(EventFilter::all());

            assert_eq!(bus.listening_to(EventTopic::Oracles), 2);
            assert_eq!(bus.listening_to(EventTopic::Insurance), 1);
            assert_eq!(bus.subscriber_count(), 2);
        }

        assert_eq!(bus.listening_to(EventTopic::Oracles), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_counts_survive_panicking_subscriber() {
        let bus = std::sync::Arc::new(InMemoryEventBus::new());
        let mut survivor = bus.subscribe(EventFilter::topics(vec![EventTopic::Oracles]));

        let worker_bus = std::sync::Arc::clone(&bus);
        let panicked = std::thread::spawn(move || {
            let _lease = worker_bus.subscribe(EventFilter::topics(vec![EventTopic::Oracles]));
            panic!("subscriber task failed");
        })
        .join();
        assert!(panicked.is_err());

        assert_eq!(bus.listening_to(EventTopic::Oracles), 1);
        assert_eq!(bus.publish(request()).await, 1);
        assert_eq!(survivor.try_recv(), Ok(Some(request())));
    }

    #[tokio::test]
    async fn test_stream_yields_matching_events() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Oracles]));

        bus.publish(registered()).await;
        bus.publish(request()).await;

        let next = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout");
        assert_eq!(next, Some(request()));
        assert_eq!(EventStream::filter(&stream).topics, vec![EventTopic::Oracles]);

        drop(bus);
        assert_eq!(stream.next().await, None);
    }
}
