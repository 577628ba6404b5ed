//! Operator overloading for expressions.
//!
//! `a + b`, `a - b`, `a * b`, `a / b`, `a % b`, `-a` build arithmetic,
//! `a & b`, `a | b`, `!a` build boolean logic. The impls are stamped onto
//! [`SQLExpr`](super::SQLExpr), aliased columns and every column type that
//! [`table!`](crate::table) generates.

/// Implements the std operators for an expression type.
///
/// Bounds on `Self` are higher-ranked so that a column type with no generic
/// parameters gets impls whose bounds are simply unsatisfied instead of
/// rejected as trivially false.
#[doc(hidden)]
#[macro_export]
macro_rules! __expr_ops {
    ([$($gen:ident),*] $ty:ty) => {
        $crate::__expr_ops!(@arith [$($gen),*] $ty, Add, add);
        $crate::__expr_ops!(@arith [$($gen),*] $ty, Sub, sub);
        $crate::__expr_ops!(@arith [$($gen),*] $ty, Mul, mul);
        $crate::__expr_ops!(@arith [$($gen),*] $ty, Div, div);
        $crate::__expr_ops!(@arith [$($gen),*] $ty, Rem, rem);
        $crate::__expr_ops!(@logic [$($gen),*] $ty, BitAnd, bitand, and);
        $crate::__expr_ops!(@logic [$($gen),*] $ty, BitOr, bitor, or);

        impl<$($gen),*> ::core::ops::Not for $ty
        where
            Self: $crate::expr::Expr,
            for<'__a> <Self as $crate::expr::Expr>::SQLType: $crate::types::BooleanLike,
        {
            type Output = $crate::expr::Negated<Self>;

            fn not(self) -> Self::Output {
                $crate::expr::not(self)
            }
        }

        impl<$($gen),*> ::core::ops::Neg for $ty
        where
            Self: $crate::expr::Expr,
            for<'__a> <Self as $crate::expr::Expr>::SQLType: $crate::types::Numeric,
        {
            type Output = $crate::expr::Unary<
                <Self as $crate::expr::Expr>::SQLType,
                <Self as $crate::expr::Expr>::Nullable,
                Self,
            >;

            fn neg(self) -> Self::Output {
                $crate::expr::neg(self)
            }
        }
    };
    (@arith [$($gen:ident),*] $ty:ty, $Op:ident, $method:ident) => {
        impl<$($gen,)* __Rhs> ::core::ops::$Op<__Rhs> for $ty
        where
            Self: $crate::expr::Expr,
            __Rhs: $crate::expr::Expr,
            <__Rhs as $crate::expr::Expr>::SQLType: $crate::types::Numeric,
            for<'__a> <Self as $crate::expr::Expr>::SQLType:
                $crate::types::ArithmeticOutput<<__Rhs as $crate::expr::Expr>::SQLType>,
        {
            type Output = $crate::expr::Arith<Self, __Rhs>;

            fn $method(self, rhs: __Rhs) -> Self::Output {
                $crate::expr::$method(self, rhs)
            }
        }
    };
    (@logic [$($gen:ident),*] $ty:ty, $Op:ident, $method:ident, $func:ident) => {
        impl<$($gen,)* __Rhs> ::core::ops::$Op<__Rhs> for $ty
        where
            Self: $crate::expr::Expr,
            for<'__a> <Self as $crate::expr::Expr>::SQLType: $crate::types::BooleanLike,
            __Rhs: $crate::expr::Condition,
            <<__Rhs as $crate::expr::Condition>::Expr as $crate::expr::Expr>::SQLType:
                $crate::types::BooleanLike,
        {
            type Output = $crate::expr::Logical<Self, __Rhs>;

            fn $method(self, rhs: __Rhs) -> Self::Output {
                $crate::expr::$func(self, rhs)
            }
        }
    };
}
