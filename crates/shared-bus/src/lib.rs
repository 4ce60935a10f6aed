//! # Shared Bus - Ledger Event Channel
//!
//! Ledger events are the sole cross-component notification channel. Engines
//! publish after a call has committed; off-ledger collaborators (the oracle
//! coordinator, UIs) subscribe with a topic filter.
//!
//! ```text
//!  governance ─┐                       ┌─► oracle coordinator (Oracles)
//!  insurance  ─┼─ publish(SuretyEvent) ┤
//!  oracles    ─┘    after commit       └─► dapp / logs (All)
//! ```
//!
//! Delivery order across independent subscribers is not correlated. A
//! lagging subscriber skips the overwritten events and keeps going.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SuretyEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
