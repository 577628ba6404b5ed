// =============================================================================
// Recursive accumulator macros
// =============================================================================
//
// These macros generate all tuple arities from a flat list of elements.
// Each element is listed once; the macro automatically generates all
// prefix arities (1-element, 2-element, ..., N-element tuples).

/// Recursive accumulator for type+index callbacks.
macro_rules! seq_tuples {
    (@acc $callback:ident [$($aT:ident),*] [$($ai:tt),*]) => {};
    (@acc $callback:ident [$($aT:ident),*] [$($ai:tt),*] ($T:ident, $i:tt) $($rest:tt)*) => {
        $callback!($($aT,)* $T; $($ai,)* $i);
        $crate::traits::seq_tuples!(@acc $callback [$($aT,)* $T] [$($ai,)* $i] $($rest)*);
    };
    ($callback:ident; $($pairs:tt)+) => {
        $crate::traits::seq_tuples!(@acc $callback [] [] $($pairs)+);
    };
}

/// Recursive accumulator for dual-type+index callbacks.
macro_rules! seq_dual {
    (@acc $callback:ident [$($sa:ident),*] [$($da:ident),*] [$($ai:tt),*]) => {};
    (@acc $callback:ident [$($sa:ident),*] [$($da:ident),*] [$($ai:tt),*] ($s:ident, $d:ident, $i:tt) $($rest:tt)*) => {
        $callback!($($sa,)* $s; $($da,)* $d; $($ai,)* $i);
        $crate::traits::seq_dual!(@acc $callback [$($sa,)* $s] [$($da,)* $d] [$($ai,)* $i] $($rest)*);
    };
}

/// Calls `$callback!(T0; 0)`, ..., `$callback!(T0, ..., T15; 0, ..., 15)`.
macro_rules! with_tuple_sizes {
    ($callback:ident) => {
        $crate::traits::seq_tuples!($callback;
            (T0,0) (T1,1) (T2,2) (T3,3)
            (T4,4) (T5,5) (T6,6) (T7,7)
            (T8,8) (T9,9) (T10,10) (T11,11)
            (T12,12) (T13,13) (T14,14) (T15,15)
        );
    };
}

/// Calls `$callback!(S0; D0; 0)`, ..., `$callback!(S0..S15; D0..D15; 0..15)`.
macro_rules! with_dual_tuple_sizes {
    ($callback:ident) => {
        $crate::traits::seq_dual!(@acc $callback [] [] []
            (S0,D0,0) (S1,D1,1) (S2,D2,2) (S3,D3,3)
            (S4,D4,4) (S5,D5,5) (S6,D6,6) (S7,D7,7)
            (S8,D8,8) (S9,D9,9) (S10,D10,10) (S11,D11,11)
            (S12,D12,12) (S13,D13,13) (S14,D14,14) (S15,D15,15)
        );
    };
}

pub(crate) use seq_dual;
pub(crate) use seq_tuples;
pub(crate) use with_dual_tuple_sizes;
pub(crate) use with_tuple_sizes;
