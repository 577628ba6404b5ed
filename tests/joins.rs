use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn inner_join_keeps_columns_non_null() {
    let (foo, bar) = tables();
    let query = select((foo.name, bar.label))
        .from(foo.inner_join(bar).on(bar.foo_id.eq(foo.id)))
        .where_(bar.amount.gt(100i64))
        .build();
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT "tab_foo"."name", "tab_bar"."label" FROM "tab_foo" INNER JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id" WHERE "tab_bar"."amount" > $1"#
    );

    let row: (String, String) = query
        .decode(&vec![Value::from("f"), Value::from("b")])
        .unwrap();
    assert_eq!(row, ("f".to_string(), "b".to_string()));
}

#[test]
fn left_join_makes_right_side_nullable() {
    let (foo, bar) = tables();
    let query = select((foo.name, bar.label, bar.amount))
        .from(foo.left_join(bar).on(bar.foo_id.eq(foo.id)))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "tab_bar"."label", "tab_bar"."amount" FROM "tab_foo" LEFT JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id""#
    );

    let row: (String, Option<String>, Option<i64>) = query
        .decode(&vec![Value::from("lonely"), Value::Null, Value::Null])
        .unwrap();
    assert_eq!(row, ("lonely".to_string(), None, None));
}

#[test]
fn null_safe_expressions_ignore_outer_joins() {
    let (foo, bar) = tables();
    let query = select((
        coalesce(bar.amount, 0i64).as_(Total),
        bar.label.is_null().as_(Hits),
        coalesce(bar.foo_id, bar.id).as_(Best),
    ))
    .from(foo.left_join(bar).on(bar.foo_id.eq(foo.id)))
    .unconditionally()
    .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT COALESCE("tab_bar"."amount", ?) AS "total", "tab_bar"."label" IS NULL AS "hits", COALESCE("tab_bar"."foo_id", "tab_bar"."id") AS "best" FROM "tab_foo" LEFT JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id""#
    );

    // the fallback itself reads the outer-joined table
    let row: (i64, bool, Option<i32>) = query
        .decode(&vec![Value::Integer(0), Value::Bool(true), Value::Null])
        .unwrap();
    assert_eq!(row, (0, true, None));
}

#[test]
fn right_join_makes_left_side_nullable() {
    let (foo, bar) = tables();
    let query = select((foo.name, bar.label))
        .from(foo.right_outer_join(bar).on(bar.foo_id.eq(foo.id)))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "tab_bar"."label" FROM "tab_foo" RIGHT OUTER JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id""#
    );

    let row: (Option<String>, String) = query
        .decode(&vec![Value::Null, Value::from("orphan")])
        .unwrap();
    assert_eq!(row, (None, "orphan".to_string()));
}

#[test]
fn full_join_makes_both_sides_nullable() {
    let (foo, bar) = tables();
    let query = select((foo.id, bar.amount))
        .from(foo.full_join(bar).on(bar.foo_id.eq(foo.id)))
        .unconditionally()
        .build();

    let row: (Option<i32>, Option<i64>) = query
        .decode(&vec![Value::Integer(3), Value::Null])
        .unwrap();
    assert_eq!(row, (Some(3), None));

    assert!(query.render(Dialect::PostgreSQL).is_ok());
    assert!(matches!(
        query.render(Dialect::MySQL),
        Err(SqlweaveError::Unsupported { .. })
    ));
}

#[test]
fn chained_joins_accumulate_scope() {
    let (foo, bar) = tables();
    let other = foo.as_(Other);
    let query = select((foo.name, bar.label, other.col(foo.name).as_(Best)))
        .from(
            foo.join(bar)
                .on(bar.foo_id.eq(foo.id))
                .left_join(other)
                .on(other.col(foo.id).eq(bar.amount)),
        )
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "tab_bar"."label", "other"."name" AS "best" FROM "tab_foo" JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id" LEFT JOIN "tab_foo" AS "other" ON "other"."id" = "tab_bar"."amount""#
    );

    let row: (String, String, Option<String>) = query
        .decode(&vec![Value::from("a"), Value::from("b"), Value::Null])
        .unwrap();
    assert_eq!(row.2, None);
}

#[test]
fn self_join_through_an_alias() {
    let foo = TabFoo::default();
    let other = foo.as_(Other);
    let query = select((foo.name, other.col(foo.name).as_(Label)))
        .from(foo.join(other).on(other.col(foo.score).gt(foo.score)))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "other"."name" AS "label" FROM "tab_foo" JOIN "tab_foo" AS "other" ON "other"."score" > "tab_foo"."score""#
    );
}

#[test]
fn cross_join_needs_no_condition() {
    let (foo, bar) = tables();
    let query = select((foo.name, bar.label))
        .from(foo.cross_join(bar))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name", "tab_bar"."label" FROM "tab_foo" CROSS JOIN "tab_bar""#
    );
}

#[test]
fn join_on_the_right_is_parenthesized() {
    let (foo, bar) = tables();
    let other = foo.as_(Other);
    let inner = bar.join(other).on(other.col(foo.id).eq(bar.foo_id));
    let query = select(foo.name)
        .from(foo.left_join(inner).on(bar.foo_id.eq(foo.id)))
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."name" FROM "tab_foo" LEFT JOIN ("tab_bar" JOIN "tab_foo" AS "other" ON "other"."id" = "tab_bar"."foo_id") ON "tab_bar"."foo_id" = "tab_foo"."id""#
    );
}
