use sqlweave::prelude::*;

mod common;
use common::*;

name_tag! {
    struct Totals = "totals";
    struct Levels = "levels";
    struct Depth = "depth";
}

#[test]
fn cte_joined_with_a_table() {
    let (foo, bar) = tables();
    let totals = cte(Totals).as_(
        select((bar.foo_id, sum(bar.amount).as_(Total)))
            .from(bar)
            .unconditionally()
            .group_by(bar.foo_id)
            .build(),
    );
    let t = totals.table();
    let query = select((foo.name, t.col(Total)))
        .from(foo.left_join(t).on(t.col(bar.foo_id).eq(foo.id)))
        .unconditionally()
        .build();
    let query = with(totals).query(query);

    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"WITH "totals" AS (SELECT "tab_bar"."foo_id", SUM("tab_bar"."amount") AS "total" FROM "tab_bar" GROUP BY "tab_bar"."foo_id") SELECT "tab_foo"."name", "totals"."total" FROM "tab_foo" LEFT JOIN "totals" ON "totals"."foo_id" = "tab_foo"."id""#
    );

    let row: (String, Option<i64>) = query
        .decode(&vec![Value::from("a"), Value::Null])
        .unwrap();
    assert_eq!(row, ("a".to_string(), None));
}

#[test]
fn cte_read_from_a_subquery() {
    let (foo, _) = tables();
    let flagged = cte(Ranked).as_(select(foo.id).from(foo).where_(foo.flag.eq(true)).build());
    let f = flagged.table();
    let query = select(foo.name)
        .from(foo)
        .where_(foo.id.in_query(select(f.col(foo.id)).from(f).unconditionally()))
        .build();
    let query = with(flagged).query(query);
    assert_eq!(
        query.to_string(),
        r#"WITH "ranked" AS (SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."flag" = ?) SELECT "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."id" IN (SELECT "ranked"."id" FROM "ranked")"#
    );
}

#[test]
fn recursive_cte_over_a_table() {
    let foo = TabFoo::default();
    let levels = cte(Levels).as_(
        select((foo.id, value(0).as_(Depth)))
            .from(foo)
            .where_(foo.score.is_null())
            .build(),
    );
    let l = levels.table();
    let next = foo.as_(Other);
    let step = select((next.col(foo.id), (l.col(Depth) + 1).as_(Depth)))
        .from(l.join(next).on(next.col(foo.id).eq(l.col(foo.id) + 1)))
        .where_(l.col(Depth).lt(10))
        .build();
    let levels = levels.union_all(step);

    let query = select((levels.col(foo.id), levels.col(Depth)))
        .from(levels.table())
        .unconditionally()
        .order_by(levels.col(Depth))
        .build();
    let query = with(levels).query(query);

    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"WITH RECURSIVE "levels" AS (SELECT "tab_foo"."id", ? AS "depth" FROM "tab_foo" WHERE "tab_foo"."score" IS NULL UNION ALL SELECT "other"."id", "levels"."depth" + ? AS "depth" FROM "levels" JOIN "tab_foo" AS "other" ON "other"."id" = ("levels"."id" + ?) WHERE "levels"."depth" < ?) SELECT "levels"."id", "levels"."depth" FROM "levels" ORDER BY "levels"."depth""#
    );
}

#[test]
fn with_wraps_data_changing_statements() {
    let (foo, _) = tables();
    let stale = cte(Ranked).as_(select(foo.id).from(foo).where_(foo.flag.eq(false)).build());
    let s = stale.table();
    let query = delete_from(foo)
        .where_(foo.id.in_query(select(s.col(foo.id)).from(s).unconditionally()))
        .build();
    let query = with(stale).query(query);
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"WITH "ranked" AS (SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."flag" = $1) DELETE FROM "tab_foo" WHERE "tab_foo"."id" IN (SELECT "ranked"."id" FROM "ranked")"#
    );
}
