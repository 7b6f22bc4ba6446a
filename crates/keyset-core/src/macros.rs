// entity_model
/// Declare the accessor table of an entity type.
///
/// ```ignore
/// entity_model! {
///     Person, path = "app::Person",
///     fields {
///         "Id" => id: Uuid,
///         "Age" => age: u16,
///         "Notes" => notes: Option<String>,
///     }
/// }
/// ```
///
/// Each entry names the field as clients spell it, the struct member, and
/// the member's type (which must implement `FieldValue`).
#[macro_export]
macro_rules! entity_model {
    (
        $entity:ty, path = $path:expr,
        fields { $( $name:literal => $member:ident : $ty:ty ),* $(,)? }
    ) => {
        impl $crate::traits::EntityKind for $entity {
            const PATH: &'static str = $path;

            const FIELDS: &'static [$crate::model::FieldModel<Self>] = &[
                $(
                    $crate::model::FieldModel::new(
                        $name,
                        <$ty as $crate::traits::FieldValue>::TYPE,
                        |entity: &$entity| $crate::traits::FieldValue::to_value(&entity.$member),
                    ),
                )*
            ];
        }
    };
}
