//! Process-wide event counters behind [`super::GlobalMetricsSink`].
//!
//! Counters are plain relaxed atomics: they are monotonic tallies, never
//! used to synchronise anything else.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// Counters
///

pub(crate) struct Counters {
    pub(crate) field_hits: AtomicU64,
    pub(crate) field_misses: AtomicU64,
    pub(crate) field_not_found: AtomicU64,
    pub(crate) converter_hits: AtomicU64,
    pub(crate) converter_misses: AtomicU64,
    pub(crate) converter_unsupported: AtomicU64,
    pub(crate) cursors_decoded: AtomicU64,
    pub(crate) cursors_rejected: AtomicU64,
    pub(crate) predicates_first_page: AtomicU64,
    pub(crate) predicates_key_only: AtomicU64,
    pub(crate) predicates_compound: AtomicU64,
    pub(crate) predicates_null_aware: AtomicU64,
}

impl Counters {
    const fn new() -> Self {
        Self {
            field_hits: AtomicU64::new(0),
            field_misses: AtomicU64::new(0),
            field_not_found: AtomicU64::new(0),
            converter_hits: AtomicU64::new(0),
            converter_misses: AtomicU64::new(0),
            converter_unsupported: AtomicU64::new(0),
            cursors_decoded: AtomicU64::new(0),
            cursors_rejected: AtomicU64::new(0),
            predicates_first_page: AtomicU64::new(0),
            predicates_key_only: AtomicU64::new(0),
            predicates_compound: AtomicU64::new(0),
            predicates_null_aware: AtomicU64::new(0),
        }
    }

    fn all(&self) -> [&AtomicU64; 12] {
        [
            &self.field_hits,
            &self.field_misses,
            &self.field_not_found,
            &self.converter_hits,
            &self.converter_misses,
            &self.converter_unsupported,
            &self.cursors_decoded,
            &self.cursors_rejected,
            &self.predicates_first_page,
            &self.predicates_key_only,
            &self.predicates_compound,
            &self.predicates_null_aware,
        ]
    }
}

pub(crate) static COUNTERS: Counters = Counters::new();

pub(crate) fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

///
/// EventReport
///
/// Point-in-time snapshot of the global counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub field_hits: u64,
    pub field_misses: u64,
    pub field_not_found: u64,
    pub converter_hits: u64,
    pub converter_misses: u64,
    pub converter_unsupported: u64,
    pub cursors_decoded: u64,
    pub cursors_rejected: u64,
    pub predicates_first_page: u64,
    pub predicates_key_only: u64,
    pub predicates_compound: u64,
    pub predicates_null_aware: u64,
}

pub(crate) fn report() -> EventReport {
    let c = &COUNTERS;
    let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

    EventReport {
        field_hits: load(&c.field_hits),
        field_misses: load(&c.field_misses),
        field_not_found: load(&c.field_not_found),
        converter_hits: load(&c.converter_hits),
        converter_misses: load(&c.converter_misses),
        converter_unsupported: load(&c.converter_unsupported),
        cursors_decoded: load(&c.cursors_decoded),
        cursors_rejected: load(&c.cursors_rejected),
        predicates_first_page: load(&c.predicates_first_page),
        predicates_key_only: load(&c.predicates_key_only),
        predicates_compound: load(&c.predicates_compound),
        predicates_null_aware: load(&c.predicates_null_aware),
    }
}

pub(crate) fn reset() {
    for counter in COUNTERS.all() {
        counter.store(0, Ordering::Relaxed);
    }
}
