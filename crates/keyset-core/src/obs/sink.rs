//! Metrics sink boundary.
//!
//! Core logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{
    model::FieldKind,
    obs::metrics::{self, COUNTERS, EventReport, bump},
};

///
/// LookupOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupOutcome {
    Hit,
    Miss,
    NotFound,
}

///
/// PredicateShape
///
/// Which branch of the keyset predicate builder produced the filter.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PredicateShape {
    FirstPage,
    KeyOnly,
    Compound,
    NullAware,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    FieldLookup {
        entity_path: &'static str,
        outcome: LookupOutcome,
    },
    ConverterLookup {
        kind: FieldKind,
        outcome: LookupOutcome,
    },
    CursorDecode {
        accepted: bool,
    },
    PredicateBuilt {
        entity_path: &'static str,
        shape: PredicateShape,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
///
/// Default sink that writes into the process-wide counters.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        let c = &COUNTERS;

        match event {
            MetricsEvent::FieldLookup { outcome, .. } => bump(match outcome {
                LookupOutcome::Hit => &c.field_hits,
                LookupOutcome::Miss => &c.field_misses,
                LookupOutcome::NotFound => &c.field_not_found,
            }),
            MetricsEvent::ConverterLookup { outcome, .. } => bump(match outcome {
                LookupOutcome::Hit => &c.converter_hits,
                LookupOutcome::Miss => &c.converter_misses,
                LookupOutcome::NotFound => &c.converter_unsupported,
            }),
            MetricsEvent::CursorDecode { accepted } => bump(if accepted {
                &c.cursors_decoded
            } else {
                &c.cursors_rejected
            }),
            MetricsEvent::PredicateBuilt { shape, .. } => bump(match shape {
                PredicateShape::FirstPage => &c.predicates_first_page,
                PredicateShape::KeyOnly => &c.predicates_key_only,
                PredicateShape::Compound => &c.predicates_compound,
                PredicateShape::NullAware => &c.predicates_null_aware,
            }),
        }
    }
}

///
/// NoopMetricsSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _: MetricsEvent) {}
}

/// Snapshot the global counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset every global counter to zero.
pub fn metrics_reset_all() {
    metrics::reset();
}

///
/// TESTS
///
