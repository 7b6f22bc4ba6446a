//! Module: db
//! Responsibility: keyset paging over entity accessor tables.
//!
//! [`Keyset`] owns every cache. Build one at startup and share it by
//! reference or `Arc`; nothing here is global except the default metrics
//! counters.

pub mod cursor;
pub mod direction;
pub mod order;
pub mod predicate;
pub mod sort;

mod plan;

use crate::{
    config::{ConfigError, KeysetConfig},
    error::Error,
    model::{FieldCache, FieldModel},
    obs::{GlobalMetricsSink, MetricsEvent, MetricsSink},
    traits::EntityKind,
    value::CoercionRegistry,
};
use std::{fmt, sync::Arc};

// re-exports
pub use cursor::{
    Cursor, CursorDecodeError, decode_cursor, encode_cursor, encode_cursor_with_target,
    encode_last_cursor,
};
pub use plan::PagePlan;
pub use sort::{Sort, SortSpec};

///
/// Keyset
///
/// Paging service: field cache, converter cache, configuration, and the
/// metrics sink every operation reports to.
///

pub struct Keyset {
    config: KeysetConfig,
    fields: FieldCache,
    coercion: CoercionRegistry,
    sink: Arc<dyn MetricsSink>,
}

impl Keyset {
    /// Default configuration, reporting to the global counters.
    #[must_use]
    pub fn new() -> Self {
        Self::build(KeysetConfig::default(), Arc::new(GlobalMetricsSink))
    }

    pub fn with_config(config: KeysetConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, Arc::new(GlobalMetricsSink))
    }

    pub fn with_sink(
        config: KeysetConfig,
        sink: Arc<dyn MetricsSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self::build(config, sink))
    }

    fn build(config: KeysetConfig, sink: Arc<dyn MetricsSink>) -> Self {
        let (fields, coercion) = match config.cache.shards {
            Some(shards) => (
                FieldCache::with_shards(sink.clone(), shards),
                CoercionRegistry::with_shards(sink.clone(), shards),
            ),
            None => (FieldCache::new(sink.clone()), CoercionRegistry::new(sink.clone())),
        };

        if config.cache.prewarm_converters {
            coercion.prewarm();
            tracing::debug!(entries = coercion.len(), "converter cache prewarmed");
        }

        Self {
            config,
            fields,
            coercion,
            sink,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &KeysetConfig {
        &self.config
    }

    #[must_use]
    pub const fn fields(&self) -> &FieldCache {
        &self.fields
    }

    #[must_use]
    pub const fn coercion(&self) -> &CoercionRegistry {
        &self.coercion
    }

    /// Resolve a field of `E` by case-insensitive name.
    pub fn resolve_field<E: EntityKind>(
        &self,
        name: &str,
    ) -> Result<&'static FieldModel<E>, Error> {
        self.fields
            .resolve::<E>(name)
            .ok_or_else(|| Error::property_not_found(name, E::PATH))
    }

    pub(crate) fn record(&self, event: MetricsEvent) {
        self.sink.record(event);
    }
}

impl Default for Keyset {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Keyset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyset")
            .field("config", &self.config)
            .field("fields", &self.fields)
            .field("coercion", &self.coercion)
            .finish_non_exhaustive()
    }
}
