use crate::{
    db::{
        direction::Direction,
        order::{NullsOrder, OrderSpec, OrderTerm},
        predicate::CoercionId,
    },
    model::FieldModel,
    traits::EntityKind,
    value::{Value, casefold_eq, compare_order},
};
use std::{cmp::Ordering, fmt};

///
/// OrderProgram
///
/// Order spec with field names resolved to accessor rows once.
/// Terms naming no field of the entity compare equal.
///

pub struct OrderProgram<E: EntityKind> {
    terms: Vec<ResolvedTerm<E>>,
}

struct ResolvedTerm<E: EntityKind> {
    field: Option<&'static FieldModel<E>>,
    direction: Direction,
    nulls: NullsOrder,
    coercion: CoercionId,
}

impl<E: EntityKind> OrderProgram<E> {
    #[must_use]
    pub fn compile(order: &OrderSpec) -> Self {
        let terms = order.terms.iter().map(resolve_term::<E>).collect();

        Self { terms }
    }

    #[must_use]
    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        for term in &self.terms {
            let Some(field) = term.field else {
                continue;
            };

            let ordering = compare_term(&field.value(left), &field.value(right), term);
            if ordering.is_ne() {
                return ordering;
            }
        }

        Ordering::Equal
    }

    /// Stable sort of `rows` under this order.
    pub fn sort(&self, rows: &mut [E]) {
        rows.sort_by(|left, right| self.compare(left, right));
    }
}

impl<E: EntityKind> fmt::Debug for OrderProgram<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.terms
                    .iter()
                    .map(|term| (term.field.map(|field| field.name), term.direction)),
            )
            .finish()
    }
}

fn resolve_term<E: EntityKind>(term: &OrderTerm) -> ResolvedTerm<E> {
    let fields: &'static [FieldModel<E>] = E::FIELDS;

    ResolvedTerm {
        field: fields
            .iter()
            .find(|field| casefold_eq(field.name, &term.field)),
        direction: term.direction,
        nulls: term.nulls,
        coercion: term.coercion,
    }
}

// Nulls are placed by the term's explicit policy, before direction applies
// to the non-null comparison.
fn compare_term<E: EntityKind>(left: &Value, right: &Value, term: &ResolvedTerm<E>) -> Ordering {
    let null_vs_value = match term.nulls {
        NullsOrder::First => Ordering::Less,
        NullsOrder::Last => Ordering::Greater,
    };

    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => null_vs_value,
        (false, true) => null_vs_value.reverse(),
        (false, false) => term.direction.apply(
            compare_order(left, right, term.coercion).unwrap_or(Ordering::Equal),
        ),
    }
}
