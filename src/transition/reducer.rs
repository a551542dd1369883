//! The transition function.

use crate::core::{
    non_negative, within_ceiling, Action, Allocation, Amount, BudgetState, ExpenseChange,
    ExpenseEntry, Guard, Reduction,
};
use crate::transition::outcome::{NoChange, TransitionError, TransitionResult};

/// Applies actions to budget states.
///
/// Holds the guards for the add and reduce paths. Application is pure:
/// the input state is never modified and every applied action yields a
/// new state with a newly built expenses list.
///
/// # Example
///
/// ```rust
/// use allotment::core::{Action, BudgetState};
/// use allotment::transition::{Reducer, TransitionError, TransitionResult};
///
/// let reducer = Reducer::new();
/// let state = BudgetState::seed();
///
/// let result = reducer.apply(&state, &Action::add_expense("Sales", 30.0)).unwrap();
/// let TransitionResult::Applied(next) = result else { panic!("expected a new state") };
/// assert_eq!(next.expense("Sales").map(|e| e.cost()), Some(100.0));
///
/// let err = reducer.apply(&state, &Action::add_expense("IT", 4100.0)).unwrap_err();
/// assert!(matches!(err, TransitionError::BudgetExceeded { .. }));
/// ```
#[derive(Debug)]
pub struct Reducer {
    ceiling: Guard<Allocation>,
    reduction: Guard<Reduction>,
}

impl Default for Reducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer {
    /// Reducer with the standard ceiling and non-negative guards.
    pub fn new() -> Self {
        Self {
            ceiling: within_ceiling(),
            reduction: non_negative(),
        }
    }

    /// Replace the guard consulted on the add path.
    pub fn with_ceiling_guard(mut self, guard: Guard<Allocation>) -> Self {
        self.ceiling = guard;
        self
    }

    /// Replace the guard consulted on the reduce path.
    pub fn with_reduction_guard(mut self, guard: Guard<Reduction>) -> Self {
        self.reduction = guard;
        self
    }

    /// Apply an action, reporting guard failures and non-finite amounts
    /// as errors.
    pub fn apply(
        &self,
        state: &BudgetState,
        action: &Action,
    ) -> Result<TransitionResult, TransitionError> {
        ensure_finite(action)?;
        match action {
            Action::AddExpense(change) => self.add_expense(state, change),
            Action::ReduceExpense(change) => self.reduce_expense(state, change),
            Action::DeleteExpense(name) => Ok(delete_expense(state, name)),
            Action::SetBudget(budget) => Ok(TransitionResult::Applied(state.with_budget(*budget))),
            Action::ChangeCurrency(currency) => Ok(TransitionResult::Applied(
                state.with_currency(currency.as_str()),
            )),
        }
    }

    /// Apply an action, falling back to a copy of the input on any guard
    /// failure or no-op.
    pub fn reduce(&self, state: &BudgetState, action: &Action) -> BudgetState {
        match self.apply(state, action) {
            Ok(TransitionResult::Applied(next)) => next,
            Ok(TransitionResult::Unchanged(_)) | Err(_) => state.clone(),
        }
    }

    fn add_expense(
        &self,
        state: &BudgetState,
        change: &ExpenseChange,
    ) -> Result<TransitionResult, TransitionError> {
        let allocation = Allocation {
            ceiling: state.budget(),
            committed: state.total_spent(),
            requested: change.cost,
        };
        if !self.ceiling.check(&allocation) {
            return Err(TransitionError::BudgetExceeded {
                ceiling: allocation.ceiling,
                projected: allocation.projected(),
            });
        }

        let mut expenses = state.expenses().to_vec();
        match position(state, &change.name) {
            Some(index) => {
                let merged = expenses[index].with_cost(expenses[index].cost() + change.cost);
                expenses[index] = merged;
            }
            None => expenses.push(ExpenseEntry::new(change.name.as_str(), change.cost)),
        }
        Ok(TransitionResult::Applied(state.with_expenses(expenses)))
    }

    fn reduce_expense(
        &self,
        state: &BudgetState,
        change: &ExpenseChange,
    ) -> Result<TransitionResult, TransitionError> {
        let Some(index) = position(state, &change.name) else {
            return Ok(TransitionResult::Unchanged(NoChange::MissingExpense {
                name: change.name.clone(),
            }));
        };

        let reduction = Reduction {
            available: state.expenses()[index].cost(),
            requested: change.cost,
        };
        if !self.reduction.check(&reduction) {
            return Err(TransitionError::ReductionRejected {
                name: change.name.clone(),
                cost: change.cost,
                available: reduction.available,
            });
        }

        let mut expenses = state.expenses().to_vec();
        expenses[index] = expenses[index].with_cost(reduction.resulting());
        Ok(TransitionResult::Applied(state.with_expenses(expenses)))
    }
}

/// Index of the first entry named `name`.
fn position(state: &BudgetState, name: &str) -> Option<usize> {
    state
        .expenses()
        .iter()
        .position(|entry| entry.name() == name)
}

fn ensure_finite(action: &Action) -> Result<(), TransitionError> {
    let amount: Option<Amount> = match action {
        Action::AddExpense(change) | Action::ReduceExpense(change) => Some(change.cost),
        Action::SetBudget(budget) => Some(*budget),
        Action::DeleteExpense(_) | Action::ChangeCurrency(_) => None,
    };
    match amount {
        Some(amount) if !amount.is_finite() => Err(TransitionError::NonFiniteAmount {
            action: action.kind(),
            amount,
        }),
        _ => Ok(()),
    }
}

fn delete_expense(state: &BudgetState, name: &str) -> TransitionResult {
    if state.expense(name).is_none() {
        return TransitionResult::Unchanged(NoChange::MissingExpense {
            name: name.to_string(),
        });
    }
    let expenses = state
        .expenses()
        .iter()
        .filter(|entry| entry.name() != name)
        .cloned()
        .collect();
    TransitionResult::Applied(state.with_expenses(expenses))
}
