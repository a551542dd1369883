//! The transition function over budget states.
//!
//! # Key Concepts
//!
//! - **Reducer**: applies a typed [`Action`](crate::core::Action) to a state
//! - **TransitionResult**: either a new state or a reason nothing changed
//! - **TransitionError**: a guard refused the action; the state is unchanged
//!
//! Guard failures on the add and reduce paths are distinct error variants so
//! callers can treat them differently.

mod outcome;
mod reducer;

pub use outcome::{NoChange, TransitionError, TransitionResult};
pub use reducer::Reducer;
