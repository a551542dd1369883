//! Decoding rules for untyped actions using Validation.

use crate::core::{Action, Amount, ExpenseChange};
use crate::validation::raw::RawAction;
use crate::validation::violations::PayloadViolation;
use serde_json::{Map, Value};
use stillwater::validation::Validation;
use stillwater::{NonEmptyVec, Semigroup};

/// All violations found in one payload.
pub type Violations = NonEmptyVec<PayloadViolation>;

/// An untyped action after its payload passed validation.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Known(Action),

    /// The action type is not recognised; it carries no checked payload.
    Unknown(String),
}

/// Decode an untyped action, accumulating every payload violation.
///
/// Unknown action types are not errors: they decode to
/// [`Decoded::Unknown`] regardless of payload.
pub fn decode(raw: &RawAction) -> Validation<Decoded, Violations> {
    let kind = raw.kind.as_str();
    let payload = &raw.payload;
    match kind {
        Action::ADD_EXPENSE => {
            expense_change(kind, payload).map(|change| Decoded::Known(Action::AddExpense(change)))
        }
        Action::RED_EXPENSE => expense_change(kind, payload)
            .map(|change| Decoded::Known(Action::ReduceExpense(change))),
        Action::DELETE_EXPENSE => {
            string_payload(kind, payload).map(|name| Decoded::Known(Action::DeleteExpense(name)))
        }
        Action::SET_BUDGET => {
            number_payload(kind, payload).map(|budget| Decoded::Known(Action::SetBudget(budget)))
        }
        Action::CHG_CURRENCY => string_payload(kind, payload)
            .map(|currency| Decoded::Known(Action::ChangeCurrency(currency))),
        other => Validation::success(Decoded::Unknown(other.to_string())),
    }
}

fn expense_change(kind: &str, payload: &Value) -> Validation<ExpenseChange, Violations> {
    let fields = match payload {
        Value::Object(fields) => fields,
        Value::Null => {
            return Validation::fail(PayloadViolation::MissingPayload {
                kind: kind.to_string(),
            })
        }
        _ => {
            return Validation::fail(PayloadViolation::WrongPayloadType {
                kind: kind.to_string(),
                expected: "an object with 'name' and 'cost'",
            })
        }
    };

    both(name_field(kind, fields), cost_field(kind, fields))
        .map(|(name, cost)| ExpenseChange { name, cost })
}

fn name_field(kind: &str, fields: &Map<String, Value>) -> Validation<String, Violations> {
    match fields.get("name") {
        None | Some(Value::Null) => Validation::fail(PayloadViolation::MissingField {
            kind: kind.to_string(),
            field: "name",
        }),
        Some(Value::String(name)) if name.trim().is_empty() => {
            Validation::fail(PayloadViolation::EmptyName {
                kind: kind.to_string(),
            })
        }
        Some(Value::String(name)) => Validation::success(name.clone()),
        Some(_) => Validation::fail(PayloadViolation::WrongFieldType {
            kind: kind.to_string(),
            field: "name",
            expected: "a string",
        }),
    }
}

fn cost_field(kind: &str, fields: &Map<String, Value>) -> Validation<Amount, Violations> {
    let wrong_type = || {
        Validation::fail(PayloadViolation::WrongFieldType {
            kind: kind.to_string(),
            field: "cost",
            expected: "a number",
        })
    };
    match fields.get("cost") {
        None | Some(Value::Null) => Validation::fail(PayloadViolation::MissingField {
            kind: kind.to_string(),
            field: "cost",
        }),
        Some(Value::Number(cost)) => match cost.as_f64() {
            Some(cost) => Validation::success(cost),
            None => wrong_type(),
        },
        Some(_) => wrong_type(),
    }
}

fn string_payload(kind: &str, payload: &Value) -> Validation<String, Violations> {
    match payload {
        Value::String(value) => Validation::success(value.clone()),
        Value::Null => Validation::fail(PayloadViolation::MissingPayload {
            kind: kind.to_string(),
        }),
        _ => Validation::fail(PayloadViolation::WrongPayloadType {
            kind: kind.to_string(),
            expected: "a string",
        }),
    }
}

fn number_payload(kind: &str, payload: &Value) -> Validation<Amount, Violations> {
    let wrong_type = || {
        Validation::fail(PayloadViolation::WrongPayloadType {
            kind: kind.to_string(),
            expected: "a number",
        })
    };
    match payload {
        Value::Number(value) => match value.as_f64() {
            Some(value) => Validation::success(value),
            None => wrong_type(),
        },
        Value::Null => Validation::fail(PayloadViolation::MissingPayload {
            kind: kind.to_string(),
        }),
        _ => wrong_type(),
    }
}

/// Pair two validations, keeping the violations of both sides.
fn both<A, B>(
    left: Validation<A, Violations>,
    right: Validation<B, Violations>,
) -> Validation<(A, B), Violations> {
    match (left, right) {
        (Validation::Success(a), Validation::Success(b)) => Validation::success((a, b)),
        (Validation::Failure(errors), Validation::Success(_))
        | (Validation::Success(_), Validation::Failure(errors)) => Validation::Failure(errors),
        (Validation::Failure(left), Validation::Failure(right)) => {
            Validation::Failure(left.combine(right))
        }
    }
}
