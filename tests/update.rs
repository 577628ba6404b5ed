use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn update_with_where() {
    let foo = TabFoo::default();
    let query = update(foo)
        .set((foo.name.assign(upper(foo.name)), foo.score.assign(Some(1.5))))
        .where_(foo.id.eq(7) & foo.flag.eq(true))
        .build();
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"UPDATE "tab_foo" SET "name" = UPPER("tab_foo"."name"), "score" = $1 WHERE "tab_foo"."id" = $2 AND "tab_foo"."flag" = $3"#
    );
    assert_eq!(
        rendered.params,
        [Value::Real(1.5), Value::Integer(7), Value::Bool(true)]
    );
}

#[test]
fn update_every_row() {
    let bar = TabBar::default();
    let query = update(bar)
        .set(bar.amount.assign(bar.amount * 2i64))
        .unconditionally()
        .build();
    assert_eq!(
        query.render(Dialect::MySQL).unwrap().sql,
        "UPDATE `tab_bar` SET `amount` = `tab_bar`.`amount` * ?"
    );
}

#[test]
fn update_from_a_correlated_subquery() {
    let (foo, bar) = tables();
    let spent = select(sum(bar.amount).as_(Total))
        .from(bar)
        .where_(bar.foo_id.eq(foo.id));
    let query = update(foo)
        .set(foo.score.assign(scalar(spent)))
        .where_(foo.flag.eq(true))
        .build();
    assert_eq!(
        query.to_string(),
        r#"UPDATE "tab_foo" SET "score" = (SELECT SUM("tab_bar"."amount") AS "total" FROM "tab_bar" WHERE "tab_bar"."foo_id" = "tab_foo"."id") WHERE "tab_foo"."flag" = ?"#
    );
}

#[test]
fn update_filtered_by_a_subquery() {
    let (foo, bar) = tables();
    let query = update(foo)
        .set((foo.flag.assign(false), dynamic(false, foo.score.assign(None::<f64>))))
        .where_(not_exists(select(bar.id).from(bar).where_(bar.foo_id.eq(foo.id))))
        .build();
    assert_eq!(
        query.to_string(),
        r#"UPDATE "tab_foo" SET "flag" = ? WHERE NOT EXISTS (SELECT "tab_bar"."id" FROM "tab_bar" WHERE "tab_bar"."foo_id" = "tab_foo"."id")"#
    );
}

#[test]
fn update_returning() {
    let foo = TabFoo::default();
    let query = update(foo)
        .set(foo.score.assign(None::<f64>))
        .where_(foo.name.eq("ada"))
        .returning((foo.id, foo.name))
        .build();
    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"UPDATE "tab_foo" SET "score" = NULL WHERE "tab_foo"."name" = ? RETURNING "tab_foo"."id", "tab_foo"."name""#
    );
    let row: (i32, String) = query
        .decode(&vec![Value::Integer(3), Value::from("ada")])
        .unwrap();
    assert_eq!(row, (3, "ada".to_string()));
    assert!(query.render(Dialect::MySQL).is_err());
}
