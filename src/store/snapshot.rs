//! Read-only views published to subscribers.

use crate::core::{Amount, BudgetState, ExpenseEntry};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// The derived view of a state at one revision.
///
/// Snapshots share the underlying state, so cloning one is cheap and two
/// snapshots of the same revision can be compared by identity with
/// [`Snapshot::is_same_as`].
#[derive(Clone, Debug)]
pub struct Snapshot {
    state: Arc<BudgetState>,
    remaining: Amount,
    revision: u64,
    published_at: DateTime<Utc>,
}

impl Snapshot {
    pub(crate) fn capture(state: Arc<BudgetState>, revision: u64) -> Self {
        let remaining = state.remaining();
        Self {
            state,
            remaining,
            revision,
            published_at: Utc::now(),
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn expenses(&self) -> &[ExpenseEntry] {
        self.state.expenses()
    }

    pub fn budget(&self) -> Amount {
        self.state.budget()
    }

    pub fn currency(&self) -> &str {
        self.state.currency()
    }

    /// `budget - sum(expenses.cost)` for this revision.
    pub fn remaining(&self) -> Amount {
        self.remaining
    }

    /// Number of accepted transitions before this snapshot; `0` for the
    /// initial state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// True when both snapshots view the very same state value.
    pub fn is_same_as(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

#[derive(Serialize)]
struct SnapshotRecord<'a> {
    expenses: &'a [ExpenseEntry],
    budget: Amount,
    remaining: Amount,
    currency: &'a str,
    revision: u64,
    published_at: DateTime<Utc>,
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SnapshotRecord {
            expenses: self.expenses(),
            budget: self.budget(),
            remaining: self.remaining,
            currency: self.currency(),
            revision: self.revision,
            published_at: self.published_at,
        }
        .serialize(serializer)
    }
}
