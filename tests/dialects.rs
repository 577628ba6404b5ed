use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn one_statement_three_dialects() {
    let (foo, bar) = tables();
    let query = select((foo.name, bar.label))
        .from(foo.join(bar).on(bar.foo_id.eq(foo.id)))
        .where_(foo.id.gt(1) & bar.label.neq("x"))
        .build();

    let expected = [
        (
            Dialect::SQLite,
            r#"SELECT "tab_foo"."name", "tab_bar"."label" FROM "tab_foo" JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id" WHERE "tab_foo"."id" > ? AND "tab_bar"."label" <> ?"#,
        ),
        (
            Dialect::PostgreSQL,
            r#"SELECT "tab_foo"."name", "tab_bar"."label" FROM "tab_foo" JOIN "tab_bar" ON "tab_bar"."foo_id" = "tab_foo"."id" WHERE "tab_foo"."id" > $1 AND "tab_bar"."label" <> $2"#,
        ),
        (
            Dialect::MySQL,
            "SELECT `tab_foo`.`name`, `tab_bar`.`label` FROM `tab_foo` JOIN `tab_bar` ON `tab_bar`.`foo_id` = `tab_foo`.`id` WHERE `tab_foo`.`id` > ? AND `tab_bar`.`label` <> ?",
        ),
    ];
    for (dialect, sql) in expected {
        let rendered = query.render(dialect).unwrap();
        assert_eq!(rendered.sql, sql, "{dialect}");
        assert_eq!(rendered.params, [Value::Integer(1), Value::from("x")]);
    }
}

#[test]
fn distinct_from_is_not_available_on_mysql() {
    let foo = TabFoo::default();
    let query = select(foo.id)
        .from(foo)
        .where_(is_distinct_from(foo.score, 1.0))
        .build();
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."score" IS DISTINCT FROM $1"#
    );
    assert!(matches!(
        query.render(Dialect::MySQL),
        Err(SqlweaveError::Unsupported { dialect: Dialect::MySQL, .. })
    ));
}

#[test]
fn not_distinct_from_as_a_method() {
    let foo = TabFoo::default();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.score.is_not_distinct_from(None::<f64>) | foo.score.is_distinct_from(2.0))
        .build();
    assert_eq!(
        query.render(Dialect::SQLite).unwrap().sql,
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."score" IS NOT DISTINCT FROM NULL OR "tab_foo"."score" IS DISTINCT FROM ?"#
    );
}

#[test]
fn bitwise_flags() {
    let bar = TabBar::default();
    let query = select(bar.amount.shr(4).bit_and(0xffi64).as_(Total))
        .from(bar)
        .where_(bar.amount.bit_and(1i64).neq(0i64) & bar.id.bit_not().lt(0))
        .build();
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT ("tab_bar"."amount" >> $1) & $2 AS "total" FROM "tab_bar" WHERE ("tab_bar"."amount" & $3) <> $4 AND (~ "tab_bar"."id") < $5"#
    );

    let toggled = select(bar.amount.bit_xor(1i64).as_(Total))
        .from(bar)
        .unconditionally()
        .build();
    assert_eq!(
        toggled.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT "tab_bar"."amount" # $1 AS "total" FROM "tab_bar""#
    );
    assert_eq!(
        toggled.render(Dialect::MySQL).unwrap().sql,
        "SELECT `tab_bar`.`amount` ^ ? AS `total` FROM `tab_bar`"
    );
    assert!(matches!(
        toggled.render(Dialect::SQLite),
        Err(SqlweaveError::Unsupported { dialect: Dialect::SQLite, .. })
    ));
}

#[test]
fn placeholders_number_in_statement_order() {
    let foo = TabFoo::default();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.name.eq(placeholder::<Text>("name")) & foo.id.lt(100))
        .build()
        .bind("name", "ada")
        .unwrap();
    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."name" = $1 AND "tab_foo"."id" < $2"#
    );
    assert_eq!(rendered.params, [Value::from("ada"), Value::Integer(100)]);
}

#[test]
fn dialects_parse_from_names() {
    assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::PostgreSQL);
    assert_eq!(Dialect::parse("SQLite3"), Some(Dialect::SQLite));
    assert_eq!(Dialect::parse("mariadb"), Some(Dialect::MySQL));
    assert!("oracle".parse::<Dialect>().is_err());
}

#[test]
fn blob_placeholder_from_the_prelude() {
    let query = select(placeholder::<Bytes>("payload").as_(Label)).build();
    let rendered = query
        .bind("payload", vec![0xde_u8, 0xad])
        .unwrap()
        .render(Dialect::PostgreSQL)
        .unwrap();
    assert_eq!(rendered.sql, r#"SELECT $1 AS "label""#);
    assert_eq!(rendered.params, vec![Value::Blob(vec![0xde, 0xad])]);
}
