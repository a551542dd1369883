//! Validation of untyped actions.
//!
//! A UI layer submits actions as `{type, payload}` records with arbitrary
//! JSON payloads. This module turns them into typed
//! [`Action`](crate::core::Action)s using Stillwater's `Validation`, which
//! accumulates every violation in a payload instead of stopping at the
//! first one.
//!
//! # Example
//!
//! ```rust
//! use allotment::validation::{decode, Decoded, RawAction};
//! use serde_json::json;
//! use stillwater::validation::Validation;
//!
//! let raw = RawAction::new("ADD_EXPENSE", json!({"name": 5}));
//! match decode(&raw) {
//!     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
//!     Validation::Success(_) => panic!("payload should be rejected"),
//! }
//!
//! let raw = RawAction::new("UNDO", json!(null));
//! assert!(matches!(decode(&raw), Validation::Success(Decoded::Unknown(_))));
//! ```

pub mod raw;
pub mod rules;
pub mod violations;

pub use raw::RawAction;
pub use rules::{decode, Decoded, Violations};
pub use violations::PayloadViolation;
