//! Allotment: a pure functional budget allocation store
//!
//! Allotment keeps a budget ceiling, a currency label and an ordered list of
//! named expense allocations. Changes arrive as discrete actions and are
//! applied by a pure transition function; a store wraps that function,
//! publishes read-only snapshots with the derived remaining balance, and
//! reports refused changes as values instead of side effects.
//!
//! # Core Concepts
//!
//! - **State**: `BudgetState` and its `ExpenseEntry` list, immutable values
//! - **Actions**: typed `Action`s, or untyped `RawAction`s validated first
//! - **Guards**: pure predicates for the ceiling and non-negative checks
//! - **Store**: owns the state and notifies subscribers with `Snapshot`s
//!
//! # Example
//!
//! ```rust
//! use allotment::core::Action;
//! use allotment::store::Store;
//! use allotment::transition::TransitionError;
//!
//! let mut store = Store::seeded();
//! assert_eq!(store.snapshot().remaining(), 4040.0);
//!
//! store.submit(Action::add_expense("Sales", 30.0)).unwrap();
//! assert_eq!(store.snapshot().remaining(), 4010.0);
//!
//! let refused = store.submit(Action::add_expense("IT", 5000.0));
//! assert!(matches!(refused, Err(TransitionError::BudgetExceeded { .. })));
//! ```

pub mod builder;
pub mod core;
pub mod store;
pub mod transition;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StoreBuilder};
pub use crate::core::{Action, BudgetState, ExpenseEntry, Guard};
pub use store::{Outcome, Snapshot, Store, SubmitError};
pub use transition::{NoChange, Reducer, TransitionError, TransitionResult};
pub use validation::{PayloadViolation, RawAction};
