use sqlweave::prelude::*;

mod common;
use common::*;

#[test]
fn filtered_select_with_ordering_and_paging() {
    let (foo, _) = tables();
    let query = select((foo.id, foo.name))
        .from(foo)
        .where_(foo.flag.eq(true) & foo.score.gt(2.5))
        .order_by((foo.name.asc(), foo.id.desc()))
        .limit(10)
        .offset(20)
        .build();

    let rendered = query.render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."id", "tab_foo"."name" FROM "tab_foo" WHERE "tab_foo"."flag" = $1 AND "tab_foo"."score" > $2 ORDER BY "tab_foo"."name" ASC, "tab_foo"."id" DESC LIMIT $3 OFFSET $4"#
    );
    assert_eq!(
        rendered.params,
        [
            Value::Bool(true),
            Value::Real(2.5),
            Value::Integer(10),
            Value::Integer(20)
        ]
    );
    assert_eq!(query.column_names(), ["id", "name"]);
}

#[test]
fn mysql_quotes_with_backticks() {
    let (foo, _) = tables();
    let query = select(foo.name)
        .from(foo)
        .where_(foo.name.like("a%"))
        .build();
    let rendered = query.render(Dialect::MySQL).unwrap();
    assert_eq!(
        rendered.sql,
        "SELECT `tab_foo`.`name` FROM `tab_foo` WHERE `tab_foo`.`name` LIKE ?"
    );
}

#[test]
fn nullable_columns_decode_to_options() {
    let (foo, _) = tables();
    let query = select((foo.name, foo.score))
        .from(foo)
        .unconditionally()
        .build();

    let row: (String, Option<f64>) = query
        .decode(&vec![Value::from("a"), Value::Null])
        .unwrap();
    assert_eq!(row, ("a".to_string(), None));

    let err = query.decode(&vec![Value::Null, Value::Real(1.0)]).unwrap_err();
    assert!(matches!(err, SqlweaveError::UnexpectedNull { index: 0 }));
}

#[test]
fn or_inside_and_is_parenthesized() {
    let (foo, _) = tables();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.flag.eq(true) & (foo.id.lt(5) | foo.score.is_null()))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."flag" = ? AND ("tab_foo"."id" < ? OR "tab_foo"."score" IS NULL)"#
    );
}

#[test]
fn in_lists_and_ranges() {
    let (foo, _) = tables();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.id.in_([1, 2, 3]) & foo.score.between(0.5, 1.5))
        .build();
    let rendered = query.render(Dialect::SQLite).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."id" IN (?, ?, ?) AND "tab_foo"."score" BETWEEN ? AND ?"#
    );
    assert_eq!(rendered.params.len(), 5);
}

#[test]
fn empty_in_list_selects_nothing() {
    let (foo, _) = tables();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.id.in_(Vec::<i32>::new()))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE FALSE"#
    );
}

#[test]
fn dynamic_filters_drop_out() {
    let (foo, _) = tables();
    let build = |only_flagged: bool| {
        select(foo.id)
            .from(foo)
            .where_(and(foo.id.gt(0), dynamic(only_flagged, foo.flag.eq(true))))
            .build()
            .to_string()
    };
    assert_eq!(
        build(true),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."id" > ? AND "tab_foo"."flag" = ?"#
    );
    assert_eq!(
        build(false),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."id" > ?"#
    );

    let query = select(foo.id)
        .from(foo)
        .where_(dynamic(false, foo.flag.eq(true)))
        .build();
    assert_eq!(query.to_string(), r#"SELECT "tab_foo"."id" FROM "tab_foo""#);
}

#[test]
fn fully_disabled_filters_keep_valid_sql() {
    let (foo, _) = tables();
    let none = || and(dynamic(false, foo.id.eq(1)), dynamic(false, foo.id.eq(2)));

    let query = select(foo.id).from(foo).where_(not(none())).build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE NOT TRUE"#
    );

    let query = select(none().as_(Label)).from(foo).unconditionally().build();
    assert_eq!(
        query.to_string(),
        r#"SELECT TRUE AS "label" FROM "tab_foo""#
    );

    let query = select(foo.id)
        .from(foo)
        .where_(or(dynamic(false, foo.flag.eq(true)), dynamic(false, foo.id.lt(3))))
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE FALSE"#
    );
}

#[test]
fn dynamic_select_items_become_null() {
    let (foo, _) = tables();
    let query = select((foo.id, dynamic(false, foo.name.as_(Label))))
        .from(foo)
        .unconditionally()
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT "tab_foo"."id", NULL AS "label" FROM "tab_foo""#
    );
    let row: (i32, Option<String>) = query
        .decode(&vec![Value::Integer(1), Value::Null])
        .unwrap();
    assert_eq!(row, (1, None));
}

#[test]
fn named_placeholders_bind_before_render() {
    let (foo, _) = tables();
    let query = select(foo.id)
        .from(foo)
        .where_(foo.name.eq(placeholder::<Text>("name")))
        .build();

    assert!(matches!(
        query.render(Dialect::SQLite),
        Err(SqlweaveError::UnboundPlaceholder(name)) if name == "name"
    ));
    assert!(matches!(
        query.clone().bind("nope", 1),
        Err(SqlweaveError::UnknownPlaceholder(_))
    ));

    let rendered = query.bind("name", "ada").unwrap().render(Dialect::PostgreSQL).unwrap();
    assert_eq!(
        rendered.sql,
        r#"SELECT "tab_foo"."id" FROM "tab_foo" WHERE "tab_foo"."name" = $1"#
    );
    assert_eq!(rendered.params, [Value::from("ada")]);
}

#[test]
fn distinct_and_expressions() {
    let (foo, _) = tables();
    let query = select_distinct((upper(foo.name).as_(Label), (foo.id * 2).as_(Total)))
        .from(foo)
        .unconditionally()
        .order_by(foo.score.desc().nulls_last())
        .build();
    assert_eq!(
        query.to_string(),
        r#"SELECT DISTINCT UPPER("tab_foo"."name") AS "label", "tab_foo"."id" * ? AS "total" FROM "tab_foo" ORDER BY "tab_foo"."score" DESC NULLS LAST"#
    );
    assert!(query.render(Dialect::MySQL).is_err());
}

#[test]
fn case_expressions() {
    let (foo, _) = tables();
    let grade = case_when(foo.score.gte(90.0))
        .then("a")
        .when(foo.score.gte(50.0))
        .then("b")
        .else_("c");
    let query = select(grade.as_(Label)).from(foo).unconditionally().build();
    assert_eq!(
        query.to_string(),
        r#"SELECT CASE WHEN "tab_foo"."score" >= ? THEN ? WHEN "tab_foo"."score" >= ? THEN ? ELSE ? END AS "label" FROM "tab_foo""#
    );
}

#[test]
fn select_without_from() {
    let query = select((value(1).as_(Hits), coalesce(null::<Text>(), "x").as_(Label))).build();
    assert_eq!(
        query.render(Dialect::PostgreSQL).unwrap().sql,
        r#"SELECT $1 AS "hits", COALESCE(NULL, $2) AS "label""#
    );
    let row: (i32, String) = query
        .decode(&vec![Value::Integer(1), Value::from("x")])
        .unwrap();
    assert_eq!(row, (1, "x".to_string()));
}
