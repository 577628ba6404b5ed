use crate::sql::Token;
use crate::traits::{Concat, ToSQL, TypeSet};

use super::{Compound, Query, ResolvedList, UnionHead, UnionOperand};

fn assert_same_columns<L: ResolvedList, R: ResolvedList>() {
    const {
        assert!(
            L::NAMES.const_eq(&R::NAMES),
            "union sides must select the same column names"
        )
    };
}

impl<Res, C, K> Query<Res, C, K>
where
    Res: ResolvedList,
    C: TypeSet,
{
    /// `self UNION ALL other`.
    ///
    /// Both sides must select the same names with the same Rust row type.
    /// The result keeps the nullability of the left side. Neither side may
    /// end in ORDER BY, LIMIT or OFFSET, and only SELECTs can be combined.
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::select;
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct Log("log") { id: Int } }
    ///
    /// let log = Log::default();
    /// let latest = select(log.id).from(log).unconditionally().order_by(log.id).build();
    /// // an ordered SELECT cannot start a UNION
    /// let _ = latest.union_all(select(log.id).from(log).unconditionally().build());
    /// ```
    ///
    /// ```compile_fail,E0277
    /// use sqlweave_core::builder::{delete_from, select};
    /// use sqlweave_core::table;
    /// use sqlweave_core::types::Int;
    ///
    /// table! { struct Log("log") { id: Int } }
    ///
    /// let log = Log::default();
    /// let removed = delete_from(log).unconditionally().returning(log.id).build();
    /// // a DELETE is not a SELECT
    /// let _ = select(log.id).from(log).unconditionally().build().union_all(removed);
    /// ```
    pub fn union_all<Res2, C2, K2>(self, other: Query<Res2, C2, K2>) -> Query<Res, Concat<C, C2>, Compound>
    where
        Res2: ResolvedList<Values = Res::Values>,
        K: UnionHead,
        C2: TypeSet,
        K2: UnionOperand,
    {
        assert_same_columns::<Res, Res2>();
        self.combine(Token::UNION_ALL, other)
    }

    /// `self UNION other`, removing duplicate rows.
    pub fn union_distinct<Res2, C2, K2>(
        self,
        other: Query<Res2, C2, K2>,
    ) -> Query<Res, Concat<C, C2>, Compound>
    where
        Res2: ResolvedList<Values = Res::Values>,
        K: UnionHead,
        C2: TypeSet,
        K2: UnionOperand,
    {
        assert_same_columns::<Res, Res2>();
        self.combine(Token::UNION_DISTINCT, other)
    }

    fn combine<Res2, C2: TypeSet, K2>(
        self,
        token: Token,
        other: Query<Res2, C2, K2>,
    ) -> Query<Res, Concat<C, C2>, Compound> {
        Query::new(self.into_sql().push(token).append(other.into_sql()))
    }
}
