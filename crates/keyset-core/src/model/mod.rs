//! Runtime entity metadata: declared field types, accessor-table rows,
//! and the memoizing name resolver.

mod accessor;
mod field;

pub use accessor::FieldCache;
pub use field::{FieldKind, FieldModel, FieldType};
