use crate::db::{order::NullsOrder, predicate::CompareOp};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// Direction
///
/// Sort direction of one order term. Ascending unless a `-` sign says
/// otherwise.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Operator selecting rows strictly after a position in this direction.
    #[must_use]
    pub const fn after_op(self) -> CompareOp {
        match self {
            Self::Asc => CompareOp::Gt,
            Self::Desc => CompareOp::Lt,
        }
    }

    /// Null placement: null is the minimum of every kind.
    #[must_use]
    pub const fn nulls(self) -> NullsOrder {
        match self {
            Self::Asc => NullsOrder::First,
            Self::Desc => NullsOrder::Last,
        }
    }

    /// Apply this direction to an ascending comparison.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

///
/// TESTS
///
