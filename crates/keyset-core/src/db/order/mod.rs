//! Module: db::order
//! Responsibility: the total ordering handed to adapters, plus an in-memory
//! comparator for it.

mod runtime;

#[cfg(test)]
mod tests;

use crate::{
    db::{Keyset, SortSpec, direction::Direction, predicate::CoercionId},
    model::FieldModel,
    traits::EntityKind,
};
use serde::Serialize;

// re-exports
pub use runtime::OrderProgram;

///
/// NullsOrder
///
/// Placement of null values within one order term.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum NullsOrder {
    First,
    Last,
}

///
/// OrderTerm
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OrderTerm {
    pub field: String,
    pub direction: Direction,
    pub nulls: NullsOrder,
    pub coercion: CoercionId,
}

impl OrderTerm {
    /// Term with null placement following the direction (null is minimum).
    #[must_use]
    pub fn new(field: impl Into<String>, direction: Direction, coercion: CoercionId) -> Self {
        Self {
            field: field.into(),
            direction,
            nulls: direction.nulls(),
            coercion,
        }
    }

    fn for_field<E>(field: &FieldModel<E>, direction: Direction) -> Self {
        Self::new(field.name, direction, field.kind().coercion())
    }
}

///
/// OrderSpec
///
/// Ordered list of terms. Always ends with the key, so the order is total.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub terms: Vec<OrderTerm>,
}

impl OrderSpec {
    /// Sorted field first, then the key ascending unless the sorted field is the key.
    #[must_use]
    pub fn keyset<E: EntityKind>(sort: &SortSpec<E>, key: &'static FieldModel<E>) -> Self {
        let mut terms = vec![OrderTerm::for_field(sort.field, sort.direction)];

        if sort.field.name != key.name {
            terms.push(OrderTerm::for_field(key, Direction::Asc));
        }

        Self { terms }
    }

    /// `(field, ascending)` pairs, for adapters that only speak names.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, bool)> {
        self.terms
            .iter()
            .map(|term| (term.field.as_str(), term.direction.is_ascending()))
    }
}

impl Keyset {
    #[must_use]
    pub fn build_ordering<E: EntityKind>(
        &self,
        sort: &SortSpec<E>,
        key: &'static FieldModel<E>,
    ) -> OrderSpec {
        OrderSpec::keyset(sort, key)
    }
}
