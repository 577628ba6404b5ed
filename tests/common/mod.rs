#![allow(dead_code)]

use sqlweave::Nil;
use sqlweave::prelude::*;
use sqlweave::query::{IntoTuple, ResolvedList, RowOf};
use sqlweave::row::FromRow;

table! {
    pub struct TabFoo("tab_foo") {
        id: Int [primary_key, default],
        name: Text,
        score: Nullable<Double>,
        flag: Bool,
    }
}

table! {
    pub struct TabBar("tab_bar") {
        id: Int [primary_key, default],
        foo_id: Nullable<Int>,
        label: Text,
        amount: BigInt,
    }
}

name_tag! {
    pub struct Total = "total";
    pub struct Hits = "hits";
    pub struct Best = "best";
    pub struct Label = "label";
    pub struct Other = "other";
    pub struct Ranked = "ranked";
}

pub fn tables() -> (TabFoo, TabBar) {
    (TabFoo::default(), TabBar::default())
}

pub const SCHEMA: &str = r#"
    CREATE TABLE "tab_foo" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "name" TEXT NOT NULL,
        "score" REAL,
        "flag" INTEGER NOT NULL
    );
    CREATE TABLE "tab_bar" (
        "id" INTEGER PRIMARY KEY AUTOINCREMENT,
        "foo_id" INTEGER REFERENCES "tab_foo" ("id"),
        "label" TEXT NOT NULL,
        "amount" INTEGER NOT NULL
    );
"#;

pub fn setup_db() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().expect("open in-memory database");
    conn.execute_batch(SCHEMA).expect("create tables");
    conn
}

/// Renders `query` for SQLite and executes it.
pub fn execute<Res, K>(conn: &rusqlite::Connection, query: &Query<Res, Nil, K>) -> usize {
    let rendered = query.render(Dialect::SQLite).expect("render");
    conn.execute(&rendered.sql, rusqlite::params_from_iter(rendered.params.iter()))
        .expect("execute")
}

/// Renders `query` for SQLite and decodes every result row.
pub fn fetch<Res, K>(conn: &rusqlite::Connection, query: &Query<Res, Nil, K>) -> Vec<RowOf<Res>>
where
    Res: ResolvedList,
    Res::Values: IntoTuple,
    RowOf<Res>: FromRow,
{
    let rendered = query.render(Dialect::SQLite).expect("render");
    let mut stmt = conn.prepare(&rendered.sql).expect("prepare");
    let mut rows = stmt
        .query(rusqlite::params_from_iter(rendered.params.iter()))
        .expect("query");
    let mut out = Vec::new();
    while let Some(row) = rows.next().expect("step") {
        out.push(query.decode(row).expect("decode"));
    }
    out
}
