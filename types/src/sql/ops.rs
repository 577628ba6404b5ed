//! Arithmetic operation result types.
//!
//! This module defines the result types for arithmetic operations between
//! SQL numeric types, following SQL's type promotion rules.

use super::{BigInt, Double, Float, Int, Numeric, SmallInt};

/// Computes the result type of arithmetic operations between two SQL numeric types.
///
/// This follows SQL's type promotion rules:
/// - Integer + Integer = Integer (largest type wins)
/// - Float + Float = Float (largest type wins)
/// - Integer + Float = Float (float wins)
///
/// ```
/// use sqlweave_types::sql::{ArithmeticOutput, BigInt, Double, Int};
///
/// fn same<T>(_: core::marker::PhantomData<T>, _: core::marker::PhantomData<T>) {}
/// same(
///     core::marker::PhantomData::<<Int as ArithmeticOutput<BigInt>>::Output>,
///     core::marker::PhantomData::<BigInt>,
/// );
/// same(
///     core::marker::PhantomData::<<BigInt as ArithmeticOutput<Double>>::Output>,
///     core::marker::PhantomData::<Double>,
/// );
/// ```
#[diagnostic::on_unimplemented(
    message = "no arithmetic between `{Self}` and `{Rhs}`",
    label = "both operands must be numeric SQL types"
)]
pub trait ArithmeticOutput<Rhs: Numeric = Self>: Numeric {
    /// The resulting type of the arithmetic operation.
    type Output: Numeric;
}

macro_rules! arithmetic {
    ($($lhs:ident, $rhs:ident => $out:ident;)*) => {
        $(
            impl ArithmeticOutput<$rhs> for $lhs {
                type Output = $out;
            }
        )*
    };
}

// Integer arithmetic, largest type wins
arithmetic! {
    SmallInt, SmallInt => SmallInt;
    SmallInt, Int => Int;
    SmallInt, BigInt => BigInt;
    Int, SmallInt => Int;
    Int, Int => Int;
    Int, BigInt => BigInt;
    BigInt, SmallInt => BigInt;
    BigInt, Int => BigInt;
    BigInt, BigInt => BigInt;
}

// Float arithmetic, largest type wins
arithmetic! {
    Float, Float => Float;
    Float, Double => Double;
    Double, Float => Double;
    Double, Double => Double;
}

// Mixed integer/float arithmetic, float wins
arithmetic! {
    SmallInt, Float => Float;
    SmallInt, Double => Double;
    Int, Float => Float;
    Int, Double => Double;
    BigInt, Float => Float;
    BigInt, Double => Double;
    Float, SmallInt => Float;
    Float, Int => Float;
    Float, BigInt => Float;
    Double, SmallInt => Double;
    Double, Int => Double;
    Double, BigInt => Double;
}
