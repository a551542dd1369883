//! Build errors for the store builder.

use crate::core::StateError;
use thiserror::Error;

/// Errors that can occur when building a store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Invalid initial state: {0}")]
    InvalidState(#[from] StateError),
}
