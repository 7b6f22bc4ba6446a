//! Scalar types an entity field may declare beyond the Rust primitives.
//!
//! Re-exported so entity crates do not have to pin `chrono`, `rust_decimal`,
//! or `uuid` themselves.

pub use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

/// Timestamp type used by `FieldKind::Timestamp` fields.
pub type Timestamp = DateTime<Utc>;
