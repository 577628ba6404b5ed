use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn union_of_two_tables() {
    let (foo, bar) = tables();
    let query = select(foo.name.as_(Label))
        .from(foo)
        .where_(foo.flag.eq(true))
        .build()
        .union_distinct(select(bar.label).from(bar).unconditionally().build());

    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"SELECT "tab_foo"."name" AS "label" FROM "tab_foo" WHERE "tab_foo"."flag" = ? UNION SELECT "tab_bar"."label" FROM "tab_bar""#
    );
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT "tab_foo"."name" AS "label" FROM "tab_foo" WHERE "tab_foo"."flag" = $1 UNION DISTINCT SELECT "tab_bar"."label" FROM "tab_bar""#
    );
    assert_eq!(query.column_names(), ["label"]);
}

#[test]
fn union_all_numbers_parameters_across_sides() {
    let (foo, bar) = tables();
    let query = select((foo.id.as_(Hits), foo.name.as_(Label)))
        .from(foo)
        .where_(foo.id.gt(1))
        .build()
        .union_all(
            select((bar.id.as_(Hits), bar.label))
                .from(bar)
                .where_(bar.amount.lt(2i64))
                .build(),
        );
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."id" AS "hits", "tab_foo"."name" AS "label" FROM "tab_foo" WHERE "tab_foo"."id" > $1 UNION ALL SELECT "tab_bar"."id" AS "hits", "tab_bar"."label" FROM "tab_bar" WHERE "tab_bar"."amount" < $2"#
    );
    assert_eq!(rendered.params, [Value::Integer(1), Value::Integer(2)]);

    let row: (i32, String) = query
        .decode(&vec![Value::Integer(1), Value::from("x")])
        .unwrap();
    assert_eq!(row, (1, "x".to_string()));
}

#[test]
fn union_as_derived_table() {
    let (foo, bar) = tables();
    let names = select(foo.name.as_(Label))
        .from(foo)
        .unconditionally()
        .build()
        .union_all(select(bar.label).from(bar).unconditionally().build())
        .as_(Ranked);
    let label = names.col(Label);

    let query = select(count_distinct(label).as_(Total))
        .from(names)
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT COUNT(DISTINCT "ranked"."label") AS "total" FROM (SELECT "tab_foo"."name" AS "label" FROM "tab_foo" UNION ALL SELECT "tab_bar"."label" FROM "tab_bar") AS "ranked""#
    );
}

#[test]
fn ordering_a_union_goes_through_a_derived_table() {
    let (foo, bar) = tables();
    let names = select(foo.name.as_(Label))
        .from(foo)
        .unconditionally()
        .build()
        .union_all(select(bar.label).from(bar).unconditionally().build())
        .as_(Ranked);
    let label = names.col(Label);

    let query = select(label)
        .from(names)
        .unconditionally()
        .order_by(label.desc())
        .limit(3)
        .build();
    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"SELECT "ranked"."label" FROM (SELECT "tab_foo"."name" AS "label" FROM "tab_foo" UNION ALL SELECT "tab_bar"."label" FROM "tab_bar") AS "ranked" ORDER BY "ranked"."label" DESC LIMIT ?"#
    );
}

#[test]
fn union_extends_a_union() {
    let (foo, bar) = tables();
    let both = select(foo.name.as_(Label))
        .from(foo)
        .unconditionally()
        .build()
        .union_all(select(bar.label).from(bar).unconditionally().build());
    let query = both.union_distinct(
        select(foo.name.as_(Label))
            .from(foo)
            .where_(foo.flag.eq(false))
            .build(),
    );
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name" AS "label" FROM "tab_foo" UNION ALL SELECT "tab_bar"."label" FROM "tab_bar" UNION SELECT "tab_foo"."name" AS "label" FROM "tab_foo" WHERE "tab_foo"."flag" = ?"#
    );
}

#[test]
fn ordered_select_as_derived_table() {
    let (foo, _) = tables();
    let top = select(foo.name.as_(Label))
        .from(foo)
        .unconditionally()
        .order_by(foo.score.desc())
        .limit(5)
        .build()
        .as_(Ranked);
    let label = top.col(Label);

    let query = select(count(label).as_(Total))
        .from(top)
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT COUNT("ranked"."label") AS "total" FROM (SELECT "tab_foo"."name" AS "label" FROM "tab_foo" ORDER BY "tab_foo"."score" DESC LIMIT ?) AS "ranked""#
    );
}
