//! Budget state and expense entries.
//!
//! `BudgetState` is an immutable value: every change produces a new state
//! with a freshly built expenses list, so older values stay valid for
//! comparison by the presentation layer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Monetary amount in the configured currency.
pub type Amount = f64;

/// Ceiling used by the seeded state.
pub const SEED_BUDGET: Amount = 5000.0;

/// Currency label used by the seeded state.
pub const SEED_CURRENCY: &str = "£";

/// Departments and their allocations in the seeded state.
pub const SEED_EXPENSES: [(&str, Amount); 5] = [
    ("Marketing", 50.0),
    ("Finance", 300.0),
    ("Sales", 70.0),
    ("Human Resource", 40.0),
    ("IT", 500.0),
];

/// Ways a state or entry can break the data model invariants.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    #[error("Expense '{name}' appears more than once")]
    DuplicateExpense { name: String },

    #[error("Expense id '{id}' does not match its name '{name}'")]
    MismatchedId { id: String, name: String },

    #[error("{field} must be a finite amount")]
    NonFiniteAmount { field: String },
}

/// Wire form of an entry; `id` may be omitted and defaults to the name.
#[derive(Deserialize)]
struct EntryRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    cost: Amount,
}

/// A named expense allocation.
///
/// The `id` always equals the `name`; the name is the uniqueness key
/// within a [`BudgetState`].
///
/// # Example
///
/// ```rust
/// use allotment::core::ExpenseEntry;
///
/// let entry = ExpenseEntry::new("Sales", 70.0);
/// assert_eq!(entry.id(), "Sales");
/// assert_eq!(entry.cost(), 70.0);
///
/// let raised = entry.with_cost(100.0);
/// assert_eq!(raised.cost(), 100.0);
/// assert_eq!(entry.cost(), 70.0); // Original unchanged
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct ExpenseEntry {
    id: String,
    name: String,
    cost: Amount,
}

impl ExpenseEntry {
    /// Create an entry keyed by `name`.
    pub fn new(name: impl Into<String>, cost: Amount) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            cost,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost(&self) -> Amount {
        self.cost
    }

    /// Copy of this entry carrying a different cost.
    pub fn with_cost(&self, cost: Amount) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            cost,
        }
    }
}

impl TryFrom<EntryRecord> for ExpenseEntry {
    type Error = StateError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        match record.id {
            Some(id) if id != record.name => Err(StateError::MismatchedId {
                id,
                name: record.name,
            }),
            _ => Ok(Self::new(record.name, record.cost)),
        }
    }
}

#[derive(Deserialize)]
struct StateRecord {
    budget: Amount,
    expenses: Vec<ExpenseEntry>,
    currency: String,
}

/// The budget ceiling, currency label and ordered expense entries.
///
/// All `with_*` methods are pure: they return a new state and leave `self`
/// untouched. `new` does not check invariants; [`BudgetState::validate`]
/// does, and deserialization runs it.
///
/// # Example
///
/// ```rust
/// use allotment::core::BudgetState;
///
/// let state = BudgetState::seed();
/// assert_eq!(state.budget(), 5000.0);
/// assert_eq!(state.total_spent(), 960.0);
/// assert_eq!(state.remaining(), 4040.0);
/// assert_eq!(state.expense("Finance").map(|e| e.cost()), Some(300.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateRecord")]
pub struct BudgetState {
    budget: Amount,
    expenses: Vec<ExpenseEntry>,
    currency: String,
}

impl TryFrom<StateRecord> for BudgetState {
    type Error = StateError;

    fn try_from(record: StateRecord) -> Result<Self, Self::Error> {
        let state = Self::new(record.budget, record.expenses, record.currency);
        state.validate()?;
        Ok(state)
    }
}

impl Default for BudgetState {
    fn default() -> Self {
        Self::seed()
    }
}

impl BudgetState {
    pub fn new(budget: Amount, expenses: Vec<ExpenseEntry>, currency: impl Into<String>) -> Self {
        Self {
            budget,
            expenses,
            currency: currency.into(),
        }
    }

    /// The state a fresh session starts from: five departments totalling
    /// 960 against a ceiling of 5000.
    pub fn seed() -> Self {
        let expenses = SEED_EXPENSES
            .iter()
            .map(|(name, cost)| ExpenseEntry::new(*name, *cost))
            .collect();
        Self::new(SEED_BUDGET, expenses, SEED_CURRENCY)
    }

    /// Check that names are unique, every id equals its name and all
    /// amounts are finite.
    pub fn validate(&self) -> Result<(), StateError> {
        if !self.budget.is_finite() {
            return Err(StateError::NonFiniteAmount {
                field: "budget".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.expenses {
            if entry.id != entry.name {
                return Err(StateError::MismatchedId {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(StateError::DuplicateExpense {
                    name: entry.name.clone(),
                });
            }
            if !entry.cost.is_finite() {
                return Err(StateError::NonFiniteAmount {
                    field: format!("cost of '{}'", entry.name),
                });
            }
        }
        Ok(())
    }

    pub fn budget(&self) -> Amount {
        self.budget
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    /// Look up an entry by name.
    pub fn expense(&self, name: &str) -> Option<&ExpenseEntry> {
        self.expenses.iter().find(|entry| entry.name == name)
    }

    /// Sum of all entry costs, recomputed on every call.
    pub fn total_spent(&self) -> Amount {
        self.expenses.iter().map(ExpenseEntry::cost).sum()
    }

    /// `budget - total_spent()`. Negative when the ceiling was lowered
    /// below what is already allocated.
    pub fn remaining(&self) -> Amount {
        self.budget - self.total_spent()
    }

    pub(crate) fn with_expenses(&self, expenses: Vec<ExpenseEntry>) -> Self {
        Self {
            budget: self.budget,
            expenses,
            currency: self.currency.clone(),
        }
    }

    pub(crate) fn with_budget(&self, budget: Amount) -> Self {
        Self {
            budget,
            expenses: self.expenses.clone(),
            currency: self.currency.clone(),
        }
    }

    pub(crate) fn with_currency(&self, currency: impl Into<String>) -> Self {
        Self {
            budget: self.budget,
            expenses: self.expenses.clone(),
            currency: currency.into(),
        }
    }
}
