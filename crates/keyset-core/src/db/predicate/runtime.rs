use crate::{
    db::predicate::{CoercionId, CompareOp, ComparePredicate, Predicate},
    model::FieldModel,
    traits::EntityKind,
    value::{Value, casefold_eq, compare_eq, compare_order},
};
use std::{cmp::Ordering, fmt};

///
/// PredicateProgram
///
/// Predicate with field names resolved to accessor rows once; evaluation
/// reads fields through the accessor table only.
///
/// Nodes naming no field of the entity evaluate to false.
///

pub struct PredicateProgram<E: EntityKind> {
    resolved: ResolvedPredicate<E>,
}

///
/// ResolvedPredicate
///

enum ResolvedPredicate<E: EntityKind> {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare {
        field: Option<&'static FieldModel<E>>,
        op: CompareOp,
        value: Value,
        coercion: CoercionId,
    },
    IsNull {
        field: Option<&'static FieldModel<E>>,
    },
}

impl<E: EntityKind> PredicateProgram<E> {
    #[must_use]
    pub fn compile(predicate: &Predicate) -> Self {
        Self {
            resolved: resolve(predicate),
        }
    }

    #[must_use]
    pub fn eval(&self, entity: &E) -> bool {
        eval_resolved(&self.resolved, entity)
    }
}

impl<E: EntityKind> fmt::Debug for PredicateProgram<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateProgram")
            .field("entity", &E::PATH)
            .finish_non_exhaustive()
    }
}

fn resolve_field<E: EntityKind>(name: &str) -> Option<&'static FieldModel<E>> {
    let fields: &'static [FieldModel<E>] = E::FIELDS;

    fields.iter().find(|field| casefold_eq(field.name, name))
}

// Compile field-name predicates to accessor-row predicates.
fn resolve<E: EntityKind>(predicate: &Predicate) -> ResolvedPredicate<E> {
    match predicate {
        Predicate::And(children) => {
            ResolvedPredicate::And(children.iter().map(resolve::<E>).collect())
        }
        Predicate::Or(children) => {
            ResolvedPredicate::Or(children.iter().map(resolve::<E>).collect())
        }
        Predicate::Not(inner) => ResolvedPredicate::Not(Box::new(resolve::<E>(inner))),
        Predicate::Compare(ComparePredicate {
            field,
            op,
            value,
            coercion,
        }) => ResolvedPredicate::Compare {
            field: resolve_field::<E>(field),
            op: *op,
            value: value.clone(),
            coercion: *coercion,
        },
        Predicate::IsNull { field } => ResolvedPredicate::IsNull {
            field: resolve_field::<E>(field),
        },
    }
}

fn eval_resolved<E: EntityKind>(predicate: &ResolvedPredicate<E>, entity: &E) -> bool {
    match predicate {
        ResolvedPredicate::And(children) => {
            children.iter().all(|child| eval_resolved(child, entity))
        }
        ResolvedPredicate::Or(children) => {
            children.iter().any(|child| eval_resolved(child, entity))
        }
        ResolvedPredicate::Not(inner) => !eval_resolved(inner, entity),
        ResolvedPredicate::Compare {
            field,
            op,
            value,
            coercion,
        } => field.is_some_and(|field| eval_compare(&field.value(entity), *op, value, *coercion)),
        ResolvedPredicate::IsNull { field } => {
            field.is_some_and(|field| field.value(entity).is_null())
        }
    }
}

// Any comparison touching null is false.
fn eval_compare(actual: &Value, op: CompareOp, expected: &Value, coercion: CoercionId) -> bool {
    if actual.is_null() || expected.is_null() {
        return false;
    }

    match op {
        CompareOp::Eq => compare_eq(actual, expected, coercion) == Some(true),
        CompareOp::Gt => compare_order(actual, expected, coercion) == Some(Ordering::Greater),
        CompareOp::Lt => compare_order(actual, expected, coercion) == Some(Ordering::Less),
    }
}
