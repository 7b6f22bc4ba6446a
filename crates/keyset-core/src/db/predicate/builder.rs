//! Module: db::predicate::builder
//! Responsibility: the filter selecting rows strictly after a cursor.
//!
//! The filter pairs with `OrderSpec::keyset`: sorted field in the requested
//! direction, then the key ascending. Null is the minimum of every kind.

use crate::{
    db::{
        Cursor, Keyset, SortSpec,
        predicate::{CompareOp, Predicate},
    },
    error::Error,
    model::FieldModel,
    obs::{MetricsEvent, PredicateShape},
    traits::EntityKind,
    value::Value,
};

impl Keyset {
    /// Filter for the page after `cursor`; `Ok(None)` means no filter
    /// (first page).
    pub fn build_predicate<E: EntityKind>(
        &self,
        sort: &SortSpec<E>,
        key: &'static FieldModel<E>,
        cursor: Option<&Cursor>,
    ) -> Result<Option<Predicate>, Error> {
        let Some(cursor) = cursor else {
            self.record_shape::<E>(PredicateShape::FirstPage);
            return Ok(None);
        };

        let key_value = self
            .coercion()
            .convert(key.ty, &cursor.key)?
            .ok_or(Error::InvalidKeyValue { field: key.name })?;

        let field = sort.field;
        let direction = sort.direction;

        // sorting by the key itself never needs the target
        if field.name == key.name {
            self.record_shape::<E>(PredicateShape::KeyOnly);
            return Ok(Some(compare(key, direction.after_op(), key_value)));
        }

        let Some(raw_target) = cursor.target.as_deref() else {
            if field.ty.nullable {
                // last row held null in the sorted field
                self.record_shape::<E>(PredicateShape::NullAware);
                let nulls_after_key = Predicate::and(vec![
                    Predicate::is_null(field.name),
                    compare(key, CompareOp::Gt, key_value),
                ]);

                let predicate = if direction.is_ascending() {
                    Predicate::or(vec![
                        nulls_after_key,
                        Predicate::not(Predicate::is_null(field.name)),
                    ])
                } else {
                    nulls_after_key
                };

                return Ok(Some(predicate));
            }

            self.record_shape::<E>(PredicateShape::KeyOnly);
            return Ok(Some(compare(key, direction.after_op(), key_value)));
        };

        let target_value = self
            .coercion()
            .convert(field.ty, raw_target)?
            .ok_or(Error::InvalidFieldValue { field: field.name })?;

        let mut branches = vec![
            compare(field, direction.after_op(), target_value.clone()),
            Predicate::and(vec![
                compare(field, CompareOp::Eq, target_value),
                compare(key, CompareOp::Gt, key_value),
            ]),
        ];

        // nulls trail every value when descending
        if field.ty.nullable && !direction.is_ascending() {
            branches.push(Predicate::is_null(field.name));
            self.record_shape::<E>(PredicateShape::NullAware);
        } else {
            self.record_shape::<E>(PredicateShape::Compound);
        }

        Ok(Some(Predicate::or(branches)))
    }

    fn record_shape<E: EntityKind>(&self, shape: PredicateShape) {
        tracing::trace!(entity = E::PATH, ?shape, "keyset predicate built");
        self.record(MetricsEvent::PredicateBuilt {
            entity_path: E::PATH,
            shape,
        });
    }
}

fn compare<E>(field: &FieldModel<E>, op: CompareOp, value: Value) -> Predicate {
    Predicate::compare(field.name, op, value, field.kind().coercion())
}
