mod compare;
mod convert;


use crate::{
    model::FieldKind,
    types::{Decimal, Timestamp, Uuid},
};
use chrono::SecondsFormat;
use serde::Serialize;
use std::fmt;

// re-exports
pub use compare::{casefold, casefold_cmp, casefold_eq, compare_eq, compare_order, strict_order_cmp};
pub use convert::{CoercionRegistry, Converter};

///
/// Value
///
/// Typed constant read from an entity field or converted from a cursor
/// payload. One variant per supported [`FieldKind`] plus `Null`.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Char(char),
    Decimal(Decimal),
    Float32(f32),
    Float64(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Text(String),
    Timestamp(Timestamp),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Uuid(Uuid),
}

impl Value {
    /// Kind of this value, `None` for `Null`.
    #[must_use]
    pub const fn kind(&self) -> Option<FieldKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Bool(_) => FieldKind::Bool,
            Self::Char(_) => FieldKind::Char,
            Self::Decimal(_) => FieldKind::Decimal,
            Self::Float32(_) => FieldKind::Float32,
            Self::Float64(_) => FieldKind::Float64,
            Self::Int8(_) => FieldKind::Int8,
            Self::Int16(_) => FieldKind::Int16,
            Self::Int32(_) => FieldKind::Int32,
            Self::Int64(_) => FieldKind::Int64,
            Self::Text(_) => FieldKind::Text,
            Self::Timestamp(_) => FieldKind::Timestamp,
            Self::Uint8(_) => FieldKind::Uint8,
            Self::Uint16(_) => FieldKind::Uint16,
            Self::Uint32(_) => FieldKind::Uint32,
            Self::Uint64(_) => FieldKind::Uint64,
            Self::Uuid(_) => FieldKind::Uuid,
        };

        Some(kind)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Stringified form embedded in cursor tokens.
    ///
    /// Every supported kind's converter parses this form back to an equal
    /// value. `Null` has no cursor form.
    #[must_use]
    pub fn to_cursor_string(&self) -> Option<String> {
        let text = match self {
            Self::Null => return None,
            Self::Text(text) => text.clone(),
            Self::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Self::Uuid(id) => id.hyphenated().to_string(),
            other => other.to_string(),
        };

        Some(text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Timestamp(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Uint8(v) => write!(f, "{v}"),
            Self::Uint16(v) => write!(f, "{v}"),
            Self::Uint32(v) => write!(f, "{v}"),
            Self::Uint64(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{}", v.hyphenated()),
        }
    }
}
