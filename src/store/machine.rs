//! Store that owns the budget state and publishes snapshots.

use crate::builder::BuildError;
use crate::core::{Action, Amount, BudgetState};
use crate::store::error::SubmitError;
use crate::store::snapshot::Snapshot;
use crate::transition::{NoChange, Reducer, TransitionError, TransitionResult};
use crate::validation::{decode, Decoded, RawAction};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Callback invoked with every newly published snapshot.
pub type Subscriber = Box<dyn Fn(&Snapshot) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Result of a submitted action that was not refused.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A new state was published; subscribers have seen this snapshot
    Published(Snapshot),

    /// Nothing changed and nothing was published
    Unchanged(NoChange),

    /// The action type is not recognised; the state was not consulted
    Ignored { kind: String },
}

impl Outcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Owns the current budget state.
///
/// [`Store::submit`] is the only way to change the state. Each accepted
/// transition replaces the state with a new value, bumps the revision and
/// notifies subscribers synchronously in registration order.
///
/// # Example
///
/// ```rust
/// use allotment::core::Action;
/// use allotment::store::Store;
///
/// let mut store = Store::seeded();
/// assert_eq!(store.snapshot().remaining(), 4040.0);
///
/// store.submit(Action::delete_expense("Finance")).unwrap();
/// assert_eq!(store.snapshot().remaining(), 4340.0);
/// assert_eq!(store.snapshot().revision(), 1);
/// ```
pub struct Store {
    current: Snapshot,
    reducer: Reducer,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Store {
    /// Create a store holding `initial` with the standard guards.
    /// Returns an error if `initial` breaks an entry invariant.
    pub fn new(initial: BudgetState) -> Result<Self, BuildError> {
        initial.validate()?;
        Ok(Self::from_parts(initial, Reducer::new(), Vec::new()))
    }

    /// Create a store holding [`BudgetState::seed`].
    pub fn seeded() -> Self {
        Self::from_parts(BudgetState::seed(), Reducer::new(), Vec::new())
    }

    pub(crate) fn from_parts(
        initial: BudgetState,
        reducer: Reducer,
        subscribers: Vec<Subscriber>,
    ) -> Self {
        let mut store = Self {
            current: Snapshot::capture(Arc::new(initial), 0),
            reducer,
            subscribers: Vec::new(),
            next_subscription: 0,
        };
        for subscriber in subscribers {
            let id = store.allocate_id();
            store.subscribers.push((id, subscriber));
        }
        store
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn state(&self) -> &BudgetState {
        self.current.state()
    }

    pub fn remaining(&self) -> Amount {
        self.current.remaining()
    }

    /// Register a callback for future snapshots.
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Apply a typed action.
    ///
    /// Guard failures are returned as errors and leave the published
    /// snapshot untouched.
    pub fn submit(&mut self, action: Action) -> Result<Outcome, TransitionError> {
        let kind = action.kind();
        match self.reducer.apply(self.current.state(), &action) {
            Ok(TransitionResult::Applied(next)) => {
                let snapshot = self.publish(next);
                tracing::debug!(
                    action = kind,
                    revision = snapshot.revision(),
                    remaining = snapshot.remaining(),
                    "transition applied"
                );
                Ok(Outcome::Published(snapshot))
            }
            Ok(TransitionResult::Unchanged(reason)) => {
                tracing::trace!(action = kind, ?reason, "transition left state unchanged");
                Ok(Outcome::Unchanged(reason))
            }
            Err(err) => {
                tracing::warn!(action = kind, error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    /// Decode and apply an untyped action.
    ///
    /// Unknown action types are ignored and reported as
    /// [`Outcome::Ignored`]. Malformed payloads are rejected with
    /// every violation found.
    pub fn submit_raw(&mut self, raw: &RawAction) -> Result<Outcome, SubmitError> {
        match decode(raw) {
            Validation::Success(Decoded::Known(action)) => Ok(self.submit(action)?),
            Validation::Success(Decoded::Unknown(kind)) => {
                tracing::trace!(action = %kind, "ignoring unknown action");
                Ok(Outcome::Ignored { kind })
            }
            Validation::Failure(violations) => {
                let violations: Vec<_> = violations.iter().cloned().collect();
                tracing::warn!(
                    action = %raw.kind,
                    violations = violations.len(),
                    "rejected malformed action payload"
                );
                Err(SubmitError::InvalidPayload {
                    kind: raw.kind.clone(),
                    violations,
                })
            }
        }
    }

    fn publish(&mut self, next: BudgetState) -> Snapshot {
        let revision = self.current.revision() + 1;
        self.current = Snapshot::capture(Arc::new(next), revision);
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.current);
        }
        self.current.clone()
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExpenseEntry, StateError};
    use serde_json::json;
    use std::sync::Mutex;

    fn recorder(store: &mut Store) -> (SubscriptionId, Arc<Mutex<Vec<u64>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = store.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.revision()));
        (id, seen)
    }

    #[test]
    fn accepted_transition_publishes_new_revision() {
        let mut store = Store::seeded();
        let (_, seen) = recorder(&mut store);

        let outcome = store.submit(Action::add_expense("Sales", 30.0)).unwrap();

        assert!(outcome.is_published());
        assert_eq!(store.snapshot().revision(), 1);
        assert_eq!(store.remaining(), 4010.0);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn rejected_add_keeps_snapshot_identity() {
        let mut store = Store::seeded();
        let (_, seen) = recorder(&mut store);
        let before = store.snapshot().clone();

        let err = store.submit(Action::add_expense("IT", 4100.0)).unwrap_err();

        assert!(matches!(err, TransitionError::BudgetExceeded { .. }));
        assert!(store.snapshot().is_same_as(&before));
        assert_eq!(store.remaining(), 4040.0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn previous_snapshot_survives_transition() {
        let mut store = Store::seeded();
        let before = store.snapshot().clone();

        store.submit(Action::add_expense("Sales", 30.0)).unwrap();

        assert_eq!(before.state().expense("Sales").map(|e| e.cost()), Some(70.0));
        assert_eq!(before.remaining(), 4040.0);
        assert!(!store.snapshot().is_same_as(&before));
    }

    #[test]
    fn no_change_does_not_notify() {
        let mut store = Store::seeded();
        let (_, seen) = recorder(&mut store);

        let outcome = store.submit(Action::delete_expense("Legal")).unwrap();

        assert!(matches!(
            outcome,
            Outcome::Unchanged(NoChange::MissingExpense { .. })
        ));
        assert_eq!(store.snapshot().revision(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let mut store = Store::seeded();
        let order = Arc::new(Mutex::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let sink = Arc::clone(&order);
            store.subscribe(move |_| sink.lock().unwrap().push(label));
        }

        store.submit(Action::set_budget(6000.0)).unwrap();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = Store::seeded();
        let (id, seen) = recorder(&mut store);

        store.submit(Action::set_budget(6000.0)).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.submit(Action::set_budget(7000.0)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn raw_unknown_action_is_ignored() {
        let mut store = Store::seeded();
        let before = store.snapshot().clone();

        let outcome = store
            .submit_raw(&RawAction::new("UNDO", json!(null)))
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::Ignored { ref kind } if kind == "UNDO"
        ));
        assert!(store.snapshot().is_same_as(&before));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let state = BudgetState::new(
            100.0,
            vec![ExpenseEntry::new("Ops", 10.0), ExpenseEntry::new("Ops", 20.0)],
            "$",
        );

        let result = Store::new(state);

        assert!(matches!(
            result,
            Err(BuildError::InvalidState(StateError::DuplicateExpense { .. }))
        ));
    }

    #[test]
    fn new_accepts_valid_state() {
        let state = BudgetState::new(100.0, vec![ExpenseEntry::new("Ops", 10.0)], "$");
        let mut store = Store::new(state).unwrap();

        let err = store.submit(Action::add_expense("Ops", 95.0)).unwrap_err();

        assert!(matches!(err, TransitionError::BudgetExceeded { .. }));
        assert_eq!(store.remaining(), 90.0);
    }

    #[test]
    fn non_finite_budget_is_never_published() {
        let mut store = Store::seeded();
        let (_, seen) = recorder(&mut store);

        let err = store.submit(Action::set_budget(f64::NAN)).unwrap_err();

        assert!(matches!(err, TransitionError::NonFiniteAmount { .. }));
        assert_eq!(store.remaining(), 4040.0);
        assert!(seen.lock().unwrap().is_empty());
        assert!(store.submit(Action::add_expense("Sales", 1.0)).is_ok());
    }

    #[test]
    fn raw_malformed_payload_is_rejected() {
        let mut store = Store::seeded();

        let err = store
            .submit_raw(&RawAction::new("ADD_EXPENSE", json!({})))
            .unwrap_err();

        match err {
            SubmitError::InvalidPayload { kind, violations } => {
                assert_eq!(kind, "ADD_EXPENSE");
                assert_eq!(violations.len(), 2);
            }
            other => panic!("Expected invalid payload, got {other:?}"),
        }
        assert_eq!(store.snapshot().revision(), 0);
    }

    #[test]
    fn raw_guard_failure_surfaces_transition_error() {
        let mut store = Store::seeded();

        let err = store
            .submit_raw(&RawAction::new(
                "RED_EXPENSE",
                json!({"name": "Sales", "cost": 80}),
            ))
            .unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Transition(TransitionError::ReductionRejected { .. })
        ));
    }

    #[test]
    fn raw_valid_action_is_applied() {
        let mut store = Store::seeded();

        store
            .submit_raw(&RawAction::new("CHG_CURRENCY", json!("$")))
            .unwrap();

        assert_eq!(store.snapshot().currency(), "$");
    }
}
