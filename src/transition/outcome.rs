//! Results and errors of applying an action.

use crate::core::{Amount, BudgetState};

/// Result of applying an action to a state.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionResult {
    /// The action was accepted and produced a new state
    Applied(BudgetState),

    /// The action was accepted but there was nothing to change
    Unchanged(NoChange),
}

impl TransitionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Why an accepted action left the state as it was.
#[derive(Clone, Debug, PartialEq)]
pub enum NoChange {
    /// A reduce or delete named an entry that does not exist
    MissingExpense { name: String },
}

/// Refused transitions. The state is left unchanged; the caller decides
/// how to present them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot increase the allocation! Out of funds: {projected} exceeds ceiling {ceiling}")]
    BudgetExceeded {
        ceiling: Amount,
        projected: Amount,
    },

    #[error("Cannot reduce '{name}' by {cost}: only {available} allocated")]
    ReductionRejected {
        name: String,
        cost: Amount,
        available: Amount,
    },

    #[error("{action} needs a finite amount, got {amount}")]
    NonFiniteAmount { action: &'static str, amount: Amount },
}
