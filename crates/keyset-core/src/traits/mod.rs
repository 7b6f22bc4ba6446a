use crate::{
    model::{FieldKind, FieldModel, FieldType},
    types::{Decimal, Timestamp, Uuid},
    value::Value,
};

///
/// EntityKind
///
/// An entity type with an explicit, build-time accessor table.
///
/// `FIELDS` replaces runtime reflection: every pageable field is listed
/// once with its canonical name, declared type, and getter. Usually
/// generated with [`entity_model!`](crate::entity_model).
///

pub trait EntityKind: Sized + Send + Sync + 'static {
    /// Stable type path (for diagnostics and error messages).
    const PATH: &'static str;

    /// Ordered accessor table.
    const FIELDS: &'static [FieldModel<Self>];
}

///
/// FieldValue
///
/// A Rust type that can live in an entity field and be read as a [`Value`].
///

pub trait FieldValue {
    const TYPE: FieldType;

    fn to_value(&self) -> Value;
}

// impl_field_value
macro_rules! impl_field_value {
    ($( $ty:ty => $kind:ident ),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                const TYPE: FieldType = FieldType::new(FieldKind::$kind);

                fn to_value(&self) -> Value {
                    Value::$kind(self.clone())
                }
            }
        )*
    };
}

impl_field_value! {
    bool => Bool,
    char => Char,
    Decimal => Decimal,
    f32 => Float32,
    f64 => Float64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    String => Text,
    Timestamp => Timestamp,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Uuid => Uuid,
}

impl<T: FieldValue> FieldValue for Option<T> {
    const TYPE: FieldType = T::TYPE.nullable();

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    const TYPE: FieldType = T::TYPE;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

///
/// TESTS
///
