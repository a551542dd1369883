//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::{Allocation, Amount, BudgetState, Guard, Reduction};
use crate::store::{Snapshot, Store, Subscriber};
use crate::transition::Reducer;

/// Builder for constructing a [`Store`] with a fluent API.
///
/// Without further configuration it builds a store over
/// [`BudgetState::seed`] with the standard guards.
///
/// # Example
///
/// ```rust
/// use allotment::builder::StoreBuilder;
///
/// let store = StoreBuilder::new()
///     .budget(8000.0)
///     .currency("€")
///     .build()
///     .unwrap();
///
/// assert_eq!(store.snapshot().remaining(), 7040.0);
/// assert_eq!(store.snapshot().currency(), "€");
/// ```
pub struct StoreBuilder {
    initial: Option<BudgetState>,
    budget: Option<Amount>,
    currency: Option<String>,
    reducer: Reducer,
    subscribers: Vec<Subscriber>,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            budget: None,
            currency: None,
            reducer: Reducer::new(),
            subscribers: Vec::new(),
        }
    }

    /// Start from this state instead of the seed.
    pub fn initial(mut self, state: BudgetState) -> Self {
        self.initial = Some(state);
        self
    }

    /// Override the ceiling of the initial state.
    pub fn budget(mut self, budget: Amount) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Override the currency label of the initial state.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Replace the guard consulted when adding to an expense.
    pub fn ceiling_guard(mut self, guard: Guard<Allocation>) -> Self {
        self.reducer = self.reducer.with_ceiling_guard(guard);
        self
    }

    /// Replace the guard consulted when reducing an expense.
    pub fn reduction_guard(mut self, guard: Guard<Reduction>) -> Self {
        self.reducer = self.reducer.with_reduction_guard(guard);
        self
    }

    /// Register a subscriber before the store exists.
    pub fn subscriber<F>(mut self, subscriber: F) -> Self
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
        self
    }

    /// Build the store.
    /// Returns an error if the initial state breaks an entry invariant.
    pub fn build(self) -> Result<Store, BuildError> {
        let base = self.initial.unwrap_or_else(BudgetState::seed);
        let budget = self.budget.unwrap_or(base.budget());
        let currency = self.currency.unwrap_or_else(|| base.currency().to_string());
        let initial = BudgetState::new(budget, base.expenses().to_vec(), currency);

        initial.validate()?;
        tracing::debug!(
            budget = initial.budget(),
            expenses = initial.expenses().len(),
            currency = initial.currency(),
            "store built"
        );
        Ok(Store::from_parts(initial, self.reducer, self.subscribers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, ExpenseEntry, StateError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn default_builder_uses_seed() {
        let store = StoreBuilder::new().build().unwrap();
        assert_eq!(store.state(), &BudgetState::seed());
    }

    #[test]
    fn initial_state_replaces_seed() {
        let state = BudgetState::new(100.0, vec![ExpenseEntry::new("Ops", 40.0)], "$");
        let store = StoreBuilder::new().initial(state.clone()).build().unwrap();
        assert_eq!(store.state(), &state);
        assert_eq!(store.remaining(), 60.0);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let state = BudgetState::new(
            100.0,
            vec![ExpenseEntry::new("Ops", 10.0), ExpenseEntry::new("Ops", 20.0)],
            "$",
        );
        let result = StoreBuilder::new().initial(state).build();
        assert!(matches!(
            result,
            Err(BuildError::InvalidState(StateError::DuplicateExpense { ref name }))
                if name == "Ops"
        ));
    }

    #[test]
    fn non_finite_budget_is_rejected() {
        let result = StoreBuilder::new().budget(f64::NAN).build();
        assert!(matches!(
            result,
            Err(BuildError::InvalidState(StateError::NonFiniteAmount { .. }))
        ));
    }

    #[test]
    fn non_finite_cost_is_rejected() {
        let state = BudgetState::new(100.0, vec![ExpenseEntry::new("Ops", f64::INFINITY)], "$");
        let result = StoreBuilder::new().initial(state).build();
        assert!(matches!(
            result,
            Err(BuildError::InvalidState(StateError::NonFiniteAmount { .. }))
        ));
    }

    #[test]
    fn registered_subscribers_receive_snapshots() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut store = StoreBuilder::new()
            .subscriber(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        store.submit(Action::change_currency("$")).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn ceiling_guard_is_applied() {
        let mut store = StoreBuilder::new()
            .ceiling_guard(Guard::new(|_: &Allocation| false))
            .build()
            .unwrap();

        assert!(store.submit(Action::add_expense("Sales", 1.0)).is_err());
    }

    #[test]
    fn reduction_guard_is_applied() {
        let mut store = StoreBuilder::new()
            .reduction_guard(Guard::new(|r: &Reduction| r.resulting() >= 10.0))
            .build()
            .unwrap();

        assert!(store.submit(Action::reduce_expense("Sales", 65.0)).is_err());
        assert!(store.submit(Action::reduce_expense("Sales", 60.0)).is_ok());
    }
}
