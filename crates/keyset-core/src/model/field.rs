use crate::{db::predicate::CoercionId, value::Value};
use std::fmt;

///
/// FieldKind
///
/// Declared scalar type of an entity field.
/// `Unsupported` carries the declared type name so errors can report it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    Bool,
    Char,
    Decimal,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
    Timestamp,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uuid,

    /// Marker for fields that cannot be converted or compared.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Every kind with a registered converter.
    pub const SUPPORTED: [Self; 16] = [
        Self::Bool,
        Self::Char,
        Self::Decimal,
        Self::Float32,
        Self::Float64,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Text,
        Self::Timestamp,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Uuid,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Char => "Char",
            Self::Decimal => "Decimal",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Text => "Text",
            Self::Timestamp => "Timestamp",
            Self::Uint8 => "Uint8",
            Self::Uint16 => "Uint16",
            Self::Uint32 => "Uint32",
            Self::Uint64 => "Uint64",
            Self::Uuid => "Uuid",
            Self::Unsupported(name) => name,
        }
    }

    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Comparison policy adapters must honour for this kind.
    ///
    /// Booleans have no native `<`/`>` in most query languages and are
    /// compared ordinally (`false < true`); text compares case-insensitively.
    #[must_use]
    pub const fn coercion(self) -> CoercionId {
        match self {
            Self::Bool => CoercionId::BoolOrdinal,
            Self::Text => CoercionId::TextCasefold,
            _ => CoercionId::Strict,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

///
/// FieldType
///
/// Declared type of a field: scalar kind plus the nullable wrapper.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FieldType {
    pub kind: FieldKind,
    pub nullable: bool,
}

impl FieldType {
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    /// Wrap this type in a nullable wrapper.
    #[must_use]
    pub const fn nullable(self) -> Self {
        Self {
            kind: self.kind,
            nullable: true,
        }
    }

    /// The kind under any nullable wrapper. Cursor payloads are never null,
    /// so conversion always targets this.
    #[must_use]
    pub const fn underlying(self) -> FieldKind {
        self.kind
    }
}

///
/// FieldModel
///
/// One row of an entity's accessor table: canonical name, declared type,
/// and the getter that reads the field as a [`Value`].
///

pub struct FieldModel<E> {
    /// Canonical field name as adapters will see it.
    pub name: &'static str,
    pub ty: FieldType,
    pub get: fn(&E) -> Value,
}

impl<E> FieldModel<E> {
    #[must_use]
    pub const fn new(name: &'static str, ty: FieldType, get: fn(&E) -> Value) -> Self {
        Self { name, ty, get }
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.ty.kind
    }

    #[must_use]
    pub fn value(&self, entity: &E) -> Value {
        (self.get)(entity)
    }
}

impl<E> Clone for FieldModel<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FieldModel<E> {}

impl<E> fmt::Debug for FieldModel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}

impl<E> PartialEq for FieldModel<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.ty == other.ty
    }
}

impl<E> Eq for FieldModel<E> {}
