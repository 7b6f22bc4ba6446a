//! Module: value::convert
//! Responsibility: raw cursor text -> typed `Value`, one converter per kind.
//! Does not own: choosing which field a payload belongs to (predicate builder).

use crate::{
    error::Error,
    model::{FieldKind, FieldType},
    obs::{LookupOutcome, MetricsEvent, MetricsSink},
    types::{Decimal, Uuid},
    value::Value,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dashmap::DashMap;
use std::{fmt, str::FromStr, sync::Arc};

/// Naive layouts accepted after RFC 3339; UTC is assumed.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Pure conversion from cursor text; `None` means malformed input.
pub type Converter = fn(&str) -> Option<Value>;

///
/// CoercionRegistry
///
/// Converter cache keyed by the underlying kind of a declared field type.
/// Entries are never evicted; the kind set is closed.
///

pub struct CoercionRegistry {
    converters: DashMap<FieldKind, Converter>,
    sink: Arc<dyn MetricsSink>,
}

impl CoercionRegistry {
    #[must_use]
    pub fn new(sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            converters: DashMap::new(),
            sink,
        }
    }

    #[must_use]
    pub fn with_shards(sink: Arc<dyn MetricsSink>, shards: usize) -> Self {
        Self {
            converters: DashMap::with_shard_amount(shards),
            sink,
        }
    }

    /// Converter for `ty`, unwrapping any nullable wrapper first.
    pub fn converter_for(&self, ty: FieldType) -> Result<Converter, Error> {
        let kind = ty.underlying();

        if let Some(converter) = self.converters.get(&kind) {
            self.record(kind, LookupOutcome::Hit);
            return Ok(*converter);
        }

        let Some(converter) = build_converter(kind) else {
            self.record(kind, LookupOutcome::NotFound);
            return Err(Error::UnsupportedFieldType {
                type_name: kind.name(),
            });
        };

        let converter = *self.converters.entry(kind).or_insert(converter);
        self.record(kind, LookupOutcome::Miss);
        tracing::debug!(kind = kind.name(), "converter cached");

        Ok(converter)
    }

    /// Convert `raw` for `ty`. `Ok(None)` means the kind is supported but
    /// the text is malformed; callers attach the field name.
    pub fn convert(&self, ty: FieldType, raw: &str) -> Result<Option<Value>, Error> {
        let converter = self.converter_for(ty)?;

        Ok(converter(raw))
    }

    /// Populate the cache for every supported kind.
    pub fn prewarm(&self) {
        for kind in FieldKind::SUPPORTED {
            if let Some(converter) = build_converter(kind) {
                self.converters.entry(kind).or_insert(converter);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    fn record(&self, kind: FieldKind, outcome: LookupOutcome) {
        self.sink
            .record(MetricsEvent::ConverterLookup { kind, outcome });
    }
}

impl fmt::Debug for CoercionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionRegistry")
            .field("entries", &self.converters.len())
            .finish_non_exhaustive()
    }
}

// Build the converter for one kind; `None` for unsupported kinds.
fn build_converter(kind: FieldKind) -> Option<Converter> {
    let converter: Converter = match kind {
        FieldKind::Unsupported(_) => return None,
        FieldKind::Bool => parse_bool,
        FieldKind::Char => parse_char,
        FieldKind::Decimal => |raw| parse_trimmed::<Decimal>(raw).map(Value::Decimal),
        FieldKind::Float32 => |raw| parse_trimmed(raw).map(Value::Float32),
        FieldKind::Float64 => |raw| parse_trimmed(raw).map(Value::Float64),
        FieldKind::Int8 => |raw| parse_trimmed(raw).map(Value::Int8),
        FieldKind::Int16 => |raw| parse_trimmed(raw).map(Value::Int16),
        FieldKind::Int32 => |raw| parse_trimmed(raw).map(Value::Int32),
        FieldKind::Int64 => |raw| parse_trimmed(raw).map(Value::Int64),
        FieldKind::Text => |raw| Some(Value::Text(raw.to_string())),
        FieldKind::Timestamp => parse_timestamp,
        FieldKind::Uint8 => |raw| parse_trimmed(raw).map(Value::Uint8),
        FieldKind::Uint16 => |raw| parse_trimmed(raw).map(Value::Uint16),
        FieldKind::Uint32 => |raw| parse_trimmed(raw).map(Value::Uint32),
        FieldKind::Uint64 => |raw| parse_trimmed(raw).map(Value::Uint64),
        FieldKind::Uuid => |raw| Uuid::parse_str(raw.trim()).ok().map(Value::Uuid),
    };

    Some(converter)
}

fn parse_trimmed<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}

fn parse_bool(raw: &str) -> Option<Value> {
    let raw = raw.trim();

    if raw.eq_ignore_ascii_case("true") {
        Some(Value::Bool(true))
    } else if raw.eq_ignore_ascii_case("false") {
        Some(Value::Bool(false))
    } else {
        None
    }
}

fn parse_char(raw: &str) -> Option<Value> {
    let mut chars = raw.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Value::Char(c)),
        _ => None,
    }
}

fn parse_timestamp(raw: &str) -> Option<Value> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(Value::Timestamp(ts.with_timezone(&Utc)));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Value::Timestamp(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Value::Timestamp(naive.and_utc()))
}
