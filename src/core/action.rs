//! Typed actions accepted by the transition function.

use super::state::Amount;
use serde::{Deserialize, Serialize};

/// Payload of the add and reduce actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseChange {
    pub name: String,
    pub cost: Amount,
}

impl ExpenseChange {
    pub fn new(name: impl Into<String>, cost: Amount) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}

/// A discrete change request against a [`BudgetState`](super::BudgetState).
///
/// Serializes as `{"type": "...", "payload": ...}` using the wire names
/// `ADD_EXPENSE`, `RED_EXPENSE`, `DELETE_EXPENSE`, `SET_BUDGET` and
/// `CHG_CURRENCY`.
///
/// # Example
///
/// ```rust
/// use allotment::core::Action;
///
/// let action = Action::add_expense("Sales", 30.0);
/// assert_eq!(action.kind(), "ADD_EXPENSE");
///
/// let json = serde_json::to_value(&action).unwrap();
/// assert_eq!(json["type"], "ADD_EXPENSE");
/// assert_eq!(json["payload"]["name"], "Sales");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "ADD_EXPENSE")]
    AddExpense(ExpenseChange),

    #[serde(rename = "RED_EXPENSE")]
    ReduceExpense(ExpenseChange),

    #[serde(rename = "DELETE_EXPENSE")]
    DeleteExpense(String),

    #[serde(rename = "SET_BUDGET")]
    SetBudget(Amount),

    #[serde(rename = "CHG_CURRENCY")]
    ChangeCurrency(String),
}

impl Action {
    pub const ADD_EXPENSE: &'static str = "ADD_EXPENSE";
    pub const RED_EXPENSE: &'static str = "RED_EXPENSE";
    pub const DELETE_EXPENSE: &'static str = "DELETE_EXPENSE";
    pub const SET_BUDGET: &'static str = "SET_BUDGET";
    pub const CHG_CURRENCY: &'static str = "CHG_CURRENCY";

    pub fn add_expense(name: impl Into<String>, cost: Amount) -> Self {
        Self::AddExpense(ExpenseChange::new(name, cost))
    }

    pub fn reduce_expense(name: impl Into<String>, cost: Amount) -> Self {
        Self::ReduceExpense(ExpenseChange::new(name, cost))
    }

    pub fn delete_expense(name: impl Into<String>) -> Self {
        Self::DeleteExpense(name.into())
    }

    pub fn set_budget(budget: Amount) -> Self {
        Self::SetBudget(budget)
    }

    pub fn change_currency(currency: impl Into<String>) -> Self {
        Self::ChangeCurrency(currency.into())
    }

    /// Wire name of the action, for display and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddExpense(_) => Self::ADD_EXPENSE,
            Self::ReduceExpense(_) => Self::RED_EXPENSE,
            Self::DeleteExpense(_) => Self::DELETE_EXPENSE,
            Self::SetBudget(_) => Self::SET_BUDGET,
            Self::ChangeCurrency(_) => Self::CHG_CURRENCY,
        }
    }
}
