//! Errors returned by the untyped submit path.

use crate::transition::TransitionError;
use crate::validation::PayloadViolation;
use thiserror::Error;

/// Errors that can occur when submitting an untyped action.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    /// The payload decoded but a guard refused the transition
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The payload did not match the shape its action type requires
    #[error("Invalid {kind} payload ({} violation(s))", .violations.len())]
    InvalidPayload {
        kind: String,
        violations: Vec<PayloadViolation>,
    },
}
