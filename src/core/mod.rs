//! Core budget types and logic.
//!
//! This module contains the pure data model:
//! - The budget state and its expense entries
//! - Typed actions
//! - Guard predicates for transition control
//!
//! Nothing in this module performs side effects.

mod action;
mod guard;
mod state;

pub use action::{Action, ExpenseChange};
pub use guard::{non_negative, within_ceiling, Allocation, Guard, Reduction};
pub use state::{
    Amount, BudgetState, ExpenseEntry, StateError, SEED_BUDGET, SEED_CURRENCY, SEED_EXPENSES,
};
