//! Core runtime for keyset: entity accessor tables, values, sort tokens,
//! continuation cursors, and the predicate/ordering pair that selects
//! "the page after this cursor".
//!
//! The engine never executes a query. Adapters take the [`db::PagePlan`]
//! produced here and translate it into their own query language.
#![warn(unreachable_pub)]

extern crate self as keyset_core;

#[macro_use]
mod macros;

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

// re-exports
pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No caches, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            Cursor, Keyset, PagePlan, SortSpec,
            direction::Direction,
            order::{OrderSpec, OrderTerm},
            predicate::Predicate,
        },
        model::{FieldKind, FieldModel, FieldType},
        traits::{EntityKind, FieldValue},
        value::Value,
    };
}
