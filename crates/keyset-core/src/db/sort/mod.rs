//! Module: db::sort
//! Responsibility: sort-token parsing, untyped and entity-resolved.
//! Does not own: field lookup memoization (see `FieldCache`).


use crate::{
    db::{Keyset, direction::Direction},
    error::Error,
    model::FieldModel,
    traits::EntityKind,
};
use std::fmt;

///
/// Sort
///
/// Untyped sort request borrowed from the token: field name plus direction.
/// Adapters that build their own native sort clause by name stop here.
///
/// `Sort::default()` is the `("", Asc)` sentinel of the non-failing path.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sort<'a> {
    pub field: &'a str,
    pub direction: Direction,
}

impl<'a> Sort<'a> {
    /// Parse a sort token; an empty or whitespace-only token is an error.
    pub fn parse(token: &'a str) -> Result<Self, Error> {
        Self::try_parse(token).ok_or(Error::SortRequired)
    }

    /// Parse a sort token, falling back to `default` ascending when empty.
    #[must_use]
    pub fn parse_or(token: &'a str, default: &'a str) -> Self {
        Self::try_parse(token).unwrap_or(Self {
            field: default,
            direction: Direction::Asc,
        })
    }

    /// Non-failing parse. `None` means the token was empty;
    /// `try_parse(t).unwrap_or_default()` yields the `("", Asc)` sentinel.
    #[must_use]
    pub fn try_parse(token: &'a str) -> Option<Self> {
        if token.trim().is_empty() {
            return None;
        }

        // only a leading sign is stripped; the rest passes through verbatim
        let sort = if let Some(field) = token.strip_prefix('+') {
            Self {
                field,
                direction: Direction::Asc,
            }
        } else if let Some(field) = token.strip_prefix('-') {
            Self {
                field,
                direction: Direction::Desc,
            }
        } else {
            Self {
                field: token,
                direction: Direction::Asc,
            }
        };

        Some(sort)
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }
}

///
/// SortSpec
///
/// Sort request resolved against an entity's accessor table.
///

pub struct SortSpec<E: EntityKind> {
    pub direction: Direction,
    pub field: &'static FieldModel<E>,
}

impl<E: EntityKind> SortSpec<E> {
    #[must_use]
    pub const fn new(field: &'static FieldModel<E>, direction: Direction) -> Self {
        Self { direction, field }
    }

    /// Canonical field name (as declared, not as typed by the client).
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        self.field.name
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }
}

impl<E: EntityKind> Clone for SortSpec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: EntityKind> Copy for SortSpec<E> {}

impl<E: EntityKind> PartialEq for SortSpec<E> {
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction && self.field == other.field
    }
}

impl<E: EntityKind> fmt::Debug for SortSpec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSpec")
            .field("field", &self.field.name)
            .field("direction", &self.direction)
            .finish()
    }
}

impl Keyset {
    /// Parse `token` and resolve its field on `E`.
    pub fn parse_sort<E: EntityKind>(&self, token: &str) -> Result<SortSpec<E>, Error> {
        self.resolve_sort(Sort::parse(token)?)
    }

    /// Parse `token`, using `default` ascending when the token is empty.
    pub fn parse_sort_or<E: EntityKind>(
        &self,
        token: &str,
        default: &str,
    ) -> Result<SortSpec<E>, Error> {
        self.resolve_sort(Sort::parse_or(token, default))
    }

    /// Non-failing typed parse: `None` for an empty token or unknown field.
    #[must_use]
    pub fn try_parse_sort<E: EntityKind>(&self, token: &str) -> Option<SortSpec<E>> {
        let sort = Sort::try_parse(token)?;

        self.resolve_sort(sort).ok()
    }

    fn resolve_sort<E: EntityKind>(&self, sort: Sort<'_>) -> Result<SortSpec<E>, Error> {
        let field = self.resolve_field::<E>(sort.field)?;

        Ok(SortSpec::new(field, sort.direction))
    }
}
