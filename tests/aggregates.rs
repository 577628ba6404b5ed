use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn group_by_with_having_and_ordering() {
    let (foo, bar) = tables();
    let query = select((
        foo.name,
        count(bar.id).as_(Hits),
        sum(bar.amount).as_(Total),
    ))
    .from(foo.left_join(bar).on(bar.foo_id.eq(foo.id)))
    .where_(foo.flag.eq(true))
    .group_by(foo.name)
    .having(count(bar.id).gt(1))
    .order_by(count(bar.id).desc())
    .build();

    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."name", COUNT("tab_bar"."id") AS "hits", SUM("tab_bar"."amount") AS "total" FROM "tab_foo" LEFT JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id" WHERE "tab_foo"."flag" = $1 GROUP BY "tab_foo"."name" HAVING COUNT("tab_bar"."id") > $2 ORDER BY COUNT("tab_bar"."id") DESC"#
    );

    // COUNT never yields NULL, SUM over no rows does
    let row: (String, i64, Option<i64>) = query
        .decode(&vec![Value::from("a"), Value::Integer(0), Value::Null])
        .unwrap();
    assert_eq!(row, ("a".to_string(), 0, None));
}

#[test]
fn aggregates_without_group_by() {
    let (foo, _) = tables();
    let query = select((
        count_all().as_(Hits),
        avg(foo.score).as_(Best),
        max(foo.id).as_(Total),
    ))
    .from(foo)
    .unconditionally()
    .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT COUNT(*) AS "hits", AVG("tab_foo"."score") AS "best", MAX("tab_foo"."id") AS "total" FROM "tab_foo""#
    );

    let row: (i64, Option<f64>, Option<i32>) = query
        .decode(&vec![Value::Integer(0), Value::Null, Value::Null])
        .unwrap();
    assert_eq!(row, (0, None, None));
}

#[test]
fn grouping_by_several_columns() {
    let (foo, _) = tables();
    let query = select((foo.name, foo.flag, count_distinct(foo.score).as_(Hits)))
        .from(foo)
        .unconditionally()
        .group_by((foo.name, foo.flag))
        .having(foo.name.neq("") & count_all().gte(2))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "tab_foo"."flag", COUNT(DISTINCT "tab_foo"."score") AS "hits" FROM "tab_foo" GROUP BY "tab_foo"."name", "tab_foo"."flag" HAVING "tab_foo"."name" <> ? AND COUNT(*) >= ?"#
    );
}

#[test]
fn aggregate_arithmetic() {
    let (_, bar) = tables();
    let query = select((bar.label, (sum(bar.amount) / count_all()).as_(Total)))
        .from(bar)
        .unconditionally()
        .group_by(bar.label)
        .limit(5)
        .build();
    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"SELECT "tab_bar"."label", SUM("tab_bar"."amount") / COUNT(*) AS "total" FROM "tab_bar" GROUP BY "tab_bar"."label" LIMIT ?"#
    );
}
