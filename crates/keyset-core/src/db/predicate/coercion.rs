use serde::Serialize;

///
/// CoercionId
///
/// Comparison policy attached to every compare node and order term.
///
/// Coercions express *how* two values of the same kind compare; they never
/// widen across kinds. Adapters translate the policy into their native
/// collation (for example a case-insensitive collation for `TextCasefold`).
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub enum CoercionId {
    /// Natural order of the value's kind.
    #[default]
    Strict,

    /// Ordinal comparison after upper-casing every scalar value.
    TextCasefold,

    /// `false < true`, for stores without native boolean `<`/`>`.
    BoolOrdinal,
}
