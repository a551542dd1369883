//! Untyped actions as submitted by a UI layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An action before its payload has been checked.
///
/// # Example
///
/// ```rust
/// use allotment::validation::RawAction;
///
/// let raw: RawAction =
///     serde_json::from_str(r#"{"type": "SET_BUDGET", "payload": 6000}"#).unwrap();
/// assert_eq!(raw.kind, "SET_BUDGET");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub payload: Value,
}

impl RawAction {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}
