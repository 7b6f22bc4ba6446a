//! Module: model::accessor
//! Responsibility: case-insensitive field-name resolution with memoization.
//! Does not own: the accessor tables themselves (see `EntityKind::FIELDS`).

use crate::{
    model::FieldModel,
    obs::{LookupOutcome, MetricsEvent, MetricsSink},
    traits::EntityKind,
    value::casefold_eq,
};
use dashmap::DashMap;
use std::{
    any::TypeId,
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

///
/// FieldKeyView
///
/// Hash and equality over the case-folded spelling, shared by the stored key
/// and the borrowed lookup key. A client-supplied name is looked up as-is.
///

trait FieldKeyView {
    fn entity(&self) -> TypeId;
    fn name(&self) -> &str;
}

impl Hash for dyn FieldKeyView + '_ {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity().hash(state);
        for ch in self.name().chars().flat_map(char::to_uppercase) {
            ch.hash(state);
        }
    }
}

impl PartialEq for dyn FieldKeyView + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.entity() == other.entity() && casefold_eq(self.name(), other.name())
    }
}

impl Eq for dyn FieldKeyView + '_ {}

///
/// FieldCacheKey
///
/// Stored key: entity type plus the canonical declared field name.
///

#[derive(Clone, Copy, Debug)]
struct FieldCacheKey {
    entity: TypeId,
    name: &'static str,
}

impl FieldKeyView for FieldCacheKey {
    fn entity(&self) -> TypeId {
        self.entity
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl Hash for FieldCacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self as &dyn FieldKeyView).hash(state);
    }
}

impl PartialEq for FieldCacheKey {
    fn eq(&self, other: &Self) -> bool {
        (self as &dyn FieldKeyView) == (other as &dyn FieldKeyView)
    }
}

impl Eq for FieldCacheKey {}

impl<'a> Borrow<dyn FieldKeyView + 'a> for FieldCacheKey {
    fn borrow(&self) -> &(dyn FieldKeyView + 'a) {
        self
    }
}

///
/// FieldLookup
///

struct FieldLookup<'a> {
    entity: TypeId,
    name: &'a str,
}

impl FieldKeyView for FieldLookup<'_> {
    fn entity(&self) -> TypeId {
        self.entity
    }

    fn name(&self) -> &str {
        self.name
    }
}

///
/// FieldCache
///
/// Memoizes `(entity type, case-folded name) -> slot` lookups against the
/// entity's static accessor table. Lookups never allocate: the stored key
/// holds the declared `&'static` name and hits are looked up with the client's
/// spelling.
///
/// Only hits are stored. The key space is therefore bounded by the declared
/// tables and is never evicted; arbitrary client tokens cannot grow it.
/// Two threads racing on the same key compute the same slot, so the
/// insert-if-absent race is benign.
///

pub struct FieldCache {
    slots: DashMap<FieldCacheKey, usize>,
    sink: Arc<dyn MetricsSink>,
}

impl FieldCache {
    #[must_use]
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            slots: DashMap::new(),
            sink,
        }
    }

    #[must_use]
    pub fn with_shards(sink: Arc<dyn MetricsSink>, shards: usize) -> Self {
        Self {
            slots: DashMap::with_shard_amount(shards),
            sink,
        }
    }

    /// Resolve `name` (case-insensitively) to a field of `E`.
    pub fn resolve<E: EntityKind>(&self, name: &str) -> Option<&'static FieldModel<E>> {
        let fields: &'static [FieldModel<E>] = E::FIELDS;
        let entity = TypeId::of::<E>();
        let lookup = FieldLookup { entity, name };

        if let Some(slot) = self.slots.get(&lookup as &dyn FieldKeyView) {
            self.record::<E>(LookupOutcome::Hit);
            return fields.get(*slot);
        }

        let Some(slot) = fields
            .iter()
            .position(|field| casefold_eq(field.name, name))
        else {
            self.record::<E>(LookupOutcome::NotFound);
            tracing::debug!(entity = E::PATH, field = name, "field not found");
            return None;
        };

        let key = FieldCacheKey {
            entity,
            name: fields[slot].name,
        };
        let slot = *self.slots.entry(key).or_insert(slot);
        self.record::<E>(LookupOutcome::Miss);
        tracing::debug!(
            entity = E::PATH,
            field = fields[slot].name,
            slot,
            "field accessor cached"
        );

        fields.get(slot)
    }

    /// Number of memoized lookups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn record<E: EntityKind>(&self, outcome: LookupOutcome) {
        self.sink.record(MetricsEvent::FieldLookup {
            entity_path: E::PATH,
            outcome,
        });
    }
}

impl fmt::Debug for FieldCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCache")
            .field("entries", &self.slots.len())
            .finish_non_exhaustive()
    }
}

///
/// TESTS
///
