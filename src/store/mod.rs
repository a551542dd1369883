//! State store and derived-view publisher.
//!
//! This module is the imperative shell around the pure reducer: it owns the
//! current state, routes every change through the transition function,
//! logs the result and hands read-only snapshots to subscribers.

mod error;
mod machine;
mod snapshot;

pub use error::SubmitError;
pub use machine::{Outcome, Store, Subscriber, SubscriptionId};
pub use snapshot::Snapshot;
