//! Type-safe arithmetic.
//!
//! These functions require `Numeric` types (SmallInt, Int, BigInt, Float,
//! Double). The result type follows `ArithmeticOutput`: the widest integer
//! between integers, the float as soon as one side is floating point.
//!
//! The std operators `+ - * / %` and unary `-` call these functions.
//!
//! Bitwise operators need `Integral` operands and have no std operator,
//! since `&` and `|` already build boolean logic. XOR renders as `#` on
//! PostgreSQL and `^` on MySQL; SQLite has no XOR operator and rendering it
//! fails with `Unsupported`.

use crate::sql::{SQL, Token};
use crate::types::{ArithmeticOutput, Integral, Numeric};

use super::{Binary, Expr, NullOf2, Shape, Unary, binary_op, operand};

/// Result of a binary arithmetic operation.
pub type Arith<L, R> = Binary<
    <<L as Expr>::SQLType as ArithmeticOutput<<R as Expr>::SQLType>>::Output,
    NullOf2<L, R>,
    L,
    R,
>;

/// Result of `neg`/`abs`.
pub type Signed<E> = Unary<<E as Expr>::SQLType, <E as Expr>::Nullable, E>;

fn arith<L, R>(left: L, op: Token, right: R) -> Arith<L, R>
where
    L: Expr,
    R: Expr,
    R::SQLType: Numeric,
    L::SQLType: ArithmeticOutput<R::SQLType>,
{
    Arith::<L, R>::with_shape(binary_op(left, op, right, Shape::Arith), Shape::Arith)
}

macro_rules! arith_fns {
    ($($(#[$meta:meta])* $name:ident => $token:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<L, R>(left: L, right: R) -> Arith<L, R>
            where
                L: Expr,
                R: Expr,
                R::SQLType: Numeric,
                L::SQLType: ArithmeticOutput<R::SQLType>,
            {
                arith(left, Token::$token, right)
            }
        )*
    };
}

arith_fns! {
    /// Addition (`+`).
    ///
    /// ```
    /// use sqlweave_core::expr::add;
    /// use sqlweave_core::ToSQL;
    ///
    /// assert_eq!(add(1, 2.5).to_sql().sql(), "? + ?");
    /// ```
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::expr::add;
    ///
    /// // Text is not Numeric
    /// let _ = add(1, "2");
    /// ```
    add => PLUS;
    /// Subtraction (`-`).
    sub => MINUS;
    /// Multiplication (`*`).
    mul => MUL;
    /// Division (`/`).
    div => DIV;
    /// Remainder (`%`).
    rem => MOD;
}

/// Unary minus.
pub fn neg<E>(expr: E) -> Signed<E>
where
    E: Expr,
    E::SQLType: Numeric,
{
    let sql = SQL::token(Token::MINUS).append(operand(expr, Shape::Arith));
    Signed::<E>::with_shape(sql, Shape::Arith)
}

/// ABS - absolute value, same type and nullability as the input.
pub fn abs<E>(expr: E) -> Signed<E>
where
    E: Expr,
    E::SQLType: Numeric,
{
    Signed::<E>::new(SQL::func("ABS", expr.into_sql()))
}

/// Result of `shl`/`shr`: the type of the shifted value.
pub type Shifted<L, R> = Binary<<L as Expr>::SQLType, NullOf2<L, R>, L, R>;

macro_rules! bitwise_fns {
    ($($(#[$meta:meta])* $name:ident => $token:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<L, R>(left: L, right: R) -> Arith<L, R>
            where
                L: Expr,
                R: Expr,
                R::SQLType: Integral,
                L::SQLType: Integral + ArithmeticOutput<R::SQLType>,
            {
                arith(left, Token::$token, right)
            }
        )*
    };
}

bitwise_fns! {
    /// Bitwise AND (`&`).
    ///
    /// ```
    /// use sqlweave_core::expr::bit_and;
    /// use sqlweave_core::ToSQL;
    ///
    /// assert_eq!(bit_and(6i64, 3).to_sql().sql(), "? & ?");
    /// ```
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::expr::bit_and;
    ///
    /// // Double is not Integral
    /// let _ = bit_and(1, 2.0);
    /// ```
    bit_and => BIT_AND;
    /// Bitwise OR (`|`).
    bit_or => BIT_OR;
    /// Bitwise XOR. Not available on SQLite.
    bit_xor => BIT_XOR;
}

macro_rules! shift_fns {
    ($($(#[$meta:meta])* $name:ident => $token:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<L, R>(value: L, bits: R) -> Shifted<L, R>
            where
                L: Expr,
                R: Expr,
                L::SQLType: Integral,
                R::SQLType: Integral,
            {
                let sql = binary_op(value, Token::$token, bits, Shape::Arith);
                Shifted::<L, R>::with_shape(sql, Shape::Arith)
            }
        )*
    };
}

shift_fns! {
    /// Left shift (`<<`).
    shl => SHL;
    /// Right shift (`>>`).
    shr => SHR;
}

/// Bitwise NOT (`~`).
pub fn bit_not<E>(expr: E) -> Signed<E>
where
    E: Expr,
    E::SQLType: Integral,
{
    let sql = SQL::token(Token::BIT_NOT).append(operand(expr, Shape::Arith));
    Signed::<E>::with_shape(sql, Shape::Arith)
}
