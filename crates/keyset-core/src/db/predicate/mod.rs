//! Module: db::predicate
//! Responsibility: the tagged filter representation handed to adapters,
//! the keyset builder that produces it, and a reference interpreter.
//! Does not own: translation into any store's query language.

mod builder;
mod coercion;
mod runtime;

#[cfg(test)]
mod tests;

use crate::value::Value;
use serde::Serialize;

// re-exports
pub use coercion::CoercionId;
pub use runtime::PredicateProgram;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

///
/// ComparePredicate
///
/// `field <op> value` under an explicit coercion policy.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
    pub coercion: CoercionId,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        op: CompareOp,
        value: Value,
        coercion: CoercionId,
    ) -> Self {
        Self {
            field: field.into(),
            op,
            value,
            coercion,
        }
    }
}

///
/// Predicate
///
/// Boolean expression over named fields and typed constants.
///
/// Comparisons against a null field value are false; only `IsNull`
/// observes nulls. Built predicates only ever wrap `IsNull` in `Not`, so
/// adapters with SQL three-valued logic select the same rows.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    IsNull { field: String },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn compare(
        field: impl Into<String>,
        op: CompareOp,
        value: Value,
        coercion: CoercionId,
    ) -> Self {
        Self::Compare(ComparePredicate::new(field, op, value, coercion))
    }

    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull {
            field: field.into(),
        }
    }
}
