use super::{BigInt, Date, DataType, Double, Float, Int, SmallInt, Text, Time, Timestamp, VarChar};

/// Two SQL types that may be compared, assigned or unioned with each other.
///
/// ```
/// use sqlweave_types::sql::{BigInt, Compatible, Int, Text};
///
/// fn compatible<L: Compatible<R>, R: sqlweave_types::sql::DataType>() {}
/// compatible::<Int, BigInt>();
/// compatible::<Text, Text>();
/// ```
///
/// ```compile_fail,E0277
/// use sqlweave_types::sql::{Bool, Compatible, Int};
///
/// fn compatible<L: Compatible<R>, R: sqlweave_types::sql::DataType>() {}
/// compatible::<Int, Bool>();
/// ```
#[diagnostic::on_unimplemented(
    message = "SQL type `{Self}` is not compatible with `{Rhs}`",
    label = "these SQL types cannot be compared or coerced",
    note = "compatible types include: numbers with numbers, text with text/varchar, and any type with itself"
)]
pub trait Compatible<Rhs: DataType = Self>: DataType {}

impl<T: DataType> Compatible<T> for T {}

macro_rules! compatible_both_ways {
    ($($lhs:ident <=> $rhs:ident),* $(,)?) => {
        $(
            impl Compatible<$rhs> for $lhs {}
            impl Compatible<$lhs> for $rhs {}
        )*
    };
}

// Integer widening
compatible_both_ways! {
    SmallInt <=> Int,
    SmallInt <=> BigInt,
    Int <=> BigInt,
}

// Float widening and int/float cross-compatibility
compatible_both_ways! {
    Float <=> Double,
    SmallInt <=> Float,
    SmallInt <=> Double,
    Int <=> Float,
    Int <=> Double,
    BigInt <=> Float,
    BigInt <=> Double,
}

// Text
compatible_both_ways! {
    Text <=> VarChar,
}

// Text ↔ Temporal (string literals against date/time columns)
compatible_both_ways! {
    Text <=> Date,
    Text <=> Time,
    Text <=> Timestamp,
    Date <=> Timestamp,
}
