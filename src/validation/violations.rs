//! Payload violations reported when decoding untyped actions.

use thiserror::Error;

/// A single problem with an untyped action payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PayloadViolation {
    #[error("{kind}: payload is missing")]
    MissingPayload { kind: String },

    #[error("{kind}: payload must be {expected}")]
    WrongPayloadType {
        kind: String,
        expected: &'static str,
    },

    #[error("{kind}: field '{field}' is missing")]
    MissingField { kind: String, field: &'static str },

    #[error("{kind}: field '{field}' must be {expected}")]
    WrongFieldType {
        kind: String,
        field: &'static str,
        expected: &'static str,
    },

    #[error("{kind}: expense name must not be empty")]
    EmptyName { kind: String },
}
