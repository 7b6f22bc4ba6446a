//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Engine code never touches the counters directly; every event flows
//! through [`MetricsSink`].

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::EventReport;
pub use sink::{
    GlobalMetricsSink, LookupOutcome, MetricsEvent, MetricsSink, NoopMetricsSink, PredicateShape,
    metrics_report, metrics_reset_all,
};
