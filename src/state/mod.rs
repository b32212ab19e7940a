//! Shared game state.
//!
//! [`StateStore`] is the only process-wide mutable resource. It is written
//! by exactly one update driver and read by every button registry.

mod store;

pub use store::{StateStore, Subscriber, SubscriptionId};
