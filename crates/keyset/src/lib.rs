//! Keyset ("cursor") pagination for typed entities.
//!
//! ## Crate layout
//! - `core`: accessor tables, values, sort tokens, cursors, predicates,
//!   orderings, configuration, and observability.
//!
//! The engine never runs a query. A store adapter takes the
//! [`PagePlan`](crate::core::db::PagePlan) from [`Keyset::plan`](crate::core::db::Keyset::plan),
//! translates its predicate and ordering, and hands the fetched page back
//! to [`PagePlan::next_cursor`](crate::core::db::PagePlan::next_cursor).

pub use keyset_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use keyset_core::{Error, ErrorClass, entity_model};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::KeysetConfig,
        db::{Sort, encode_cursor, encode_cursor_with_target, order::NullsOrder},
        prelude::*,
        types::{Decimal, Timestamp, Uuid},
    };
}
