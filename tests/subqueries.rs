use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn in_subquery() {
    let (foo, bar) = tables();
    let big_spenders = select(bar.foo_id).from(bar).where_(bar.amount.gt(1000i64));
    let query = select(foo.name)
        .from(foo)
        .where_(foo.id.in_query(big_spenders))
        .build();
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."id" IN (SELECT "tab_bar"."foo_id" FROM "tab_bar" WHERE "tab_bar"."amount" > $1)"#
    );
    assert_eq!(rendered.params, [Value::Integer(1000)]);
}

#[test]
fn correlated_exists() {
    let (foo, bar) = tables();
    let has_bars = select(bar.id).from(bar).where_(bar.foo_id.eq(foo.id));
    let query = select(foo.name)
        .from(foo)
        .where_(foo.flag.eq(true) & not_exists(has_bars))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."flag" = ? AND NOT EXISTS (SELECT "tab_bar"."id" FROM "tab_bar" WHERE "tab_bar"."foo_id" = "tab_foo"."id")"#
    );
}

#[test]
fn correlated_scalar_in_select_list() {
    let (foo, bar) = tables();
    let largest = select(max(bar.amount).as_(Total))
        .from(bar)
        .where_(bar.foo_id.eq(foo.id));
    let query = select((foo.name, scalar(largest).as_(Best)))
        .from(foo)
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", (SELECT MAX("tab_bar"."amount") AS "total" FROM "tab_bar" WHERE "tab_bar"."foo_id" = "tab_foo"."id") AS "best" FROM "tab_foo""#
    );

    let row: (String, Option<i64>) = query
        .decode(&vec![Value::from("a"), Value::Null])
        .unwrap();
    assert_eq!(row, ("a".to_string(), None));
}

#[test]
fn scalar_subquery_in_comparison() {
    let (foo, _) = tables();
    let other = foo.as_(Other);
    let average = select(avg(other.col(foo.score)).as_(Best))
        .from(other)
        .unconditionally();
    let query = select(foo.name)
        .from(foo)
        .where_(foo.score.gt(scalar(average)))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."score" > (SELECT AVG("other"."score") AS "best" FROM "tab_foo" AS "other")"#
    );
}

#[test]
fn derived_table_in_a_join() {
    let (foo, bar) = tables();
    let ranked = select((bar.foo_id, sum(bar.amount).as_(Total)))
        .from(bar)
        .unconditionally()
        .group_by(bar.foo_id)
        .build()
        .as_(Ranked);
    let (total, owner) = (ranked.col(Total), ranked.col(bar.foo_id));

    let query = select((foo.name, total))
        .from(foo.join(ranked).on(owner.eq(foo.id)))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "ranked"."total" FROM "tab_foo" JOIN (SELECT "tab_bar"."foo_id", SUM("tab_bar"."amount") AS "total" FROM "tab_bar" GROUP BY "tab_bar"."foo_id") AS "ranked" ON "ranked"."foo_id" = "tab_foo"."id""#
    );

    let row: (String, Option<i64>) = query
        .decode(&vec![Value::from("a"), Value::Integer(12)])
        .unwrap();
    assert_eq!(row, ("a".to_string(), Some(12)));
}

#[test]
fn derived_table_keeps_its_parameters() {
    let (foo, _) = tables();
    let flagged = select((foo.id, foo.name))
        .from(foo)
        .where_(foo.flag.eq(placeholder::<Bool>("flag")))
        .build()
        .bind("flag", true)
        .unwrap()
        .as_(Ranked);
    let name = flagged.col(foo.name);

    let query = select(name).from(flagged).where_(name.neq("x")).build();
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "ranked"."name" FROM (SELECT "tab_foo"."id", "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."flag" = $1) AS "ranked" WHERE "ranked"."name" <> $2"#
    );
    assert_eq!(rendered.params, [Value::Bool(true), Value::from("x")]);
}
