use crate::db::cursor::CursorDecodeError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Caller-visible failure raised while parsing a sort token, decoding a
/// cursor, or building the predicate for the next page.
///
/// Every variant is synchronous and deterministic. Nothing is retried
/// internally; adapters map [`Error::class`] onto their own response shape.
///

#[derive(Debug, ThisError)]
pub enum Error {
    /// No sort token was supplied and no default field was given.
    #[error("sort needs to be defined")]
    SortRequired,

    /// The sort token (or a requested field) names no field of the entity.
    #[error("property '{name}' not found on type '{entity}'")]
    PropertyNotFound { name: String, entity: &'static str },

    /// The cursor token could not be decoded.
    #[error("invalid cursor format: {0}")]
    InvalidCursorFormat(#[from] CursorDecodeError),

    /// The cursor key value does not parse as the key field's declared type.
    #[error("invalid key value for property '{field}'")]
    InvalidKeyValue { field: &'static str },

    /// The cursor target value does not parse as the sorted field's type.
    #[error("invalid field value for property '{field}'")]
    InvalidFieldValue { field: &'static str },

    /// The field's declared type has no converter/comparator.
    #[error("unsupported field type for cursor '{type_name}'")]
    UnsupportedFieldType { type_name: &'static str },
}

impl Error {
    pub(crate) fn property_not_found(name: impl Into<String>, entity: &'static str) -> Self {
        Self::PropertyNotFound {
            name: name.into(),
            entity,
        }
    }

    /// Stable classification for transport mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::UnsupportedFieldType { .. } => ErrorClass::Unsupported,
            Self::SortRequired
            | Self::PropertyNotFound { .. }
            | Self::InvalidCursorFormat(_)
            | Self::InvalidKeyValue { .. }
            | Self::InvalidFieldValue { .. } => ErrorClass::InvalidInput,
        }
    }
}

///
/// ErrorClass
///
/// Internal error taxonomy for adapter-side mapping.
/// `InvalidInput` is the client's fault (a "bad request" class);
/// `Unsupported` means the entity declares a field the engine cannot page by.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidInput,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
