// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the generic (ANSI) dialect

use polysql_dialect::{GenericDialect, Render, RenderError};
use polysql_ir::{
    Expression, SortDirection, SqlCreate, SqlDataType, SqlDelete, SqlInsert, SqlKeyword, SqlQuery,
    SqlSelect, SqlUpdate, sql,
};

fn render(node: &impl Render) -> String {
    node.render(&GenericDialect).unwrap()
}

// =============================================================================
// SELECT
// =============================================================================

#[test]
fn test_select_with_native_limit_offset() {
    let query = SqlSelect::new()
        .add_from("Users")
        .set_where(sql::more_equal("", "age", 30))
        .add_order_name("name", SortDirection::Asc)
        .set_limit(10)
        .set_offset(20);

    assert_eq!(
        render(&query),
        r#"SELECT * FROM "Users" WHERE "age" >= 30 ORDER BY "name" LIMIT 10 OFFSET 20"#
    );
}

#[test]
fn test_select_with_joins_grouping_and_having() {
    let query = SqlSelect::new()
        .add_field("c", "name", None)
        .add_count(Some("orders"))
        .add_from_as("Customers", "c")
        .add_from_left("Orders", Some("o"), sql::join("c", "id", "o", "customer_id"))
        .add_group("c", "name")
        .set_having(sql::compare(
            sql::count_all(),
            polysql_ir::Operator::Gt,
            sql::constant(5),
        ))
        .add_order_desc("c", "name")
        .set_distinct_mode(true);

    assert_eq!(
        render(&query),
        r#"SELECT DISTINCT "c"."name", COUNT(*) AS "orders" FROM "Customers" "c" LEFT JOIN "Orders" "o" ON "c"."id" = "o"."customer_id" GROUP BY "c"."name" HAVING COUNT(*) > 5 ORDER BY "c"."name" DESC"#
    );
}

#[test]
fn test_union_members_are_parenthesized_and_ordered_by_name() {
    let query = SqlSelect::new()
        .add_fields("a", ["id"])
        .add_from_as("A", "a")
        .add_union(SqlSelect::new().add_fields("b", ["id"]).add_from_as("B", "b"))
        .set_union_all_mode(true)
        .add_order("a", "id");

    assert_eq!(
        render(&query),
        r#"SELECT "a"."id" FROM "A" "a" UNION ALL (SELECT "b"."id" FROM "B" "b") ORDER BY "id""#
    );
}

#[test]
fn test_subquery_source() {
    let inner = SqlSelect::new().add_fields("u", ["id"]).add_from_as("Users", "u");
    let query = SqlSelect::new().add_all_fields("x").add_from_query(inner, "x");

    assert_eq!(
        render(&query),
        r#"SELECT "x".* FROM (SELECT "u"."id" FROM "Users" "u") "x""#
    );
}

#[test]
fn test_empty_where_is_omitted() {
    let query = SqlSelect::new()
        .add_from("Users")
        .set_where(sql::and(Vec::<polysql_ir::Condition>::new()));

    assert_eq!(render(&query), r#"SELECT * FROM "Users""#);
}

#[test]
fn test_select_without_from_is_rejected() {
    let err = SqlSelect::new()
        .add_constant(1, "one")
        .render(&GenericDialect)
        .unwrap_err();
    assert!(matches!(err, RenderError::EmptyStatement { ref statement } if statement == "SELECT"));
}

// =============================================================================
// INSERT / UPDATE / DELETE
// =============================================================================

#[test]
fn test_insert_values_escape_text() {
    let insert = SqlInsert::new("Users")
        .add_constant("id", 1)
        .add_constant("name", "O'Neil");

    assert_eq!(
        render(&insert),
        r#"INSERT INTO "Users" ("id", "name") VALUES (1, 'O''Neil')"#
    );
}

#[test]
fn test_insert_from_select() {
    let insert = SqlInsert::new("Archive")
        .add_fields(["id", "name"])
        .set_data_source(
            SqlSelect::new()
                .add_fields("u", ["id", "name"])
                .add_from_as("Users", "u"),
        );

    assert_eq!(
        render(&insert),
        r#"INSERT INTO "Archive" ("id", "name") SELECT "u"."id", "u"."name" FROM "Users" "u""#
    );
}

#[test]
fn test_insert_with_values_and_data_source_is_rejected() {
    let insert = SqlInsert {
        target: "t".to_string(),
        fields: vec!["a".to_string()],
        values: vec![sql::constant(1)],
        data_source: Some(Box::new(
            SqlSelect::new().add_fields("s", ["a"]).add_from_as("S", "s"),
        )),
    };

    let err = insert.render(&GenericDialect).unwrap_err();
    assert!(
        matches!(err, RenderError::InvalidStatement { ref statement, .. } if statement == "INSERT"),
        "{err}"
    );
}

#[test]
fn test_deserialized_statement_with_both_sources_is_rejected() {
    let source = serde_json::to_value(SqlSelect::new().add_from("S")).unwrap();
    let mut insert = serde_json::to_value(SqlQuery::from(SqlInsert::new("t").add_constant("a", 1)))
        .unwrap();
    insert["statement"]["data_source"] = source.clone();
    let insert: SqlQuery = serde_json::from_value(insert).unwrap();
    assert!(matches!(
        insert.render(&GenericDialect).unwrap_err(),
        RenderError::InvalidStatement { .. }
    ));

    let mut create = serde_json::to_value(SqlQuery::from(SqlCreate::new("t").add_integer("id", false)))
        .unwrap();
    create["statement"]["data_source"] = source;
    let create: SqlQuery = serde_json::from_value(create).unwrap();
    assert!(matches!(
        create.render(&GenericDialect).unwrap_err(),
        RenderError::InvalidStatement { .. }
    ));
}

#[test]
fn test_update_with_subquery_value() {
    let total = SqlSelect::new()
        .add_sum("i", "amount", None)
        .add_from_as("Items", "i")
        .set_where(sql::join("i", "order_id", "Orders", "id"));
    let update = SqlUpdate::new("Orders")
        .add_expression("total", Expression::from(total))
        .set_where(sql::equal("", "status", "open"));

    assert_eq!(
        render(&update),
        r#"UPDATE "Orders" SET "total"=(SELECT SUM("i"."amount") FROM "Items" "i" WHERE "i"."order_id" = "Orders"."id") WHERE "status" = 'open'"#
    );
}

#[test]
fn test_correlated_update_uses_update_from() {
    let update = SqlUpdate::new("Orders")
        .add_constant("status", "closed")
        .set_from_table(
            "Customers",
            Some("c"),
            sql::join("Orders", "customer_id", "c", "id"),
        )
        .set_where(sql::equal("c", "active", false));

    assert_eq!(
        render(&update),
        r#"UPDATE "Orders" SET "status"='closed' FROM "Customers" "c" WHERE "Orders"."customer_id" = "c"."id" AND "c"."active" = 0"#
    );
}

#[test]
fn test_delete_requires_where() {
    let err = SqlDelete::new("Users").render(&GenericDialect).unwrap_err();
    assert!(matches!(err, RenderError::EmptyStatement { .. }));

    let delete = SqlDelete::new("Users").set_where(sql::is_null("", "email"));
    assert_eq!(render(&delete), r#"DELETE FROM "Users" WHERE "email" IS NULL"#);
}

// =============================================================================
// CREATE
// =============================================================================

#[test]
fn test_create_with_columns() {
    let create = SqlCreate::new("People")
        .add_integer("id", true)
        .add_string("name", 50, false)
        .add_decimal("salary", 10, 2, false)
        .add_text("notes", false);

    assert_eq!(
        render(&create),
        r#"CREATE TABLE "People" ("id" INTEGER NOT NULL, "name" VARCHAR(50), "salary" NUMERIC(10, 2), "notes" TEXT)"#
    );
}

#[test]
fn test_create_as_select() {
    let create = SqlCreate::new("Snapshot")
        .temporary(true)
        .set_data_source(SqlSelect::new().add_from("Users"));

    assert_eq!(
        render(&create),
        r#"CREATE TEMPORARY TABLE "Snapshot" AS SELECT * FROM "Users""#
    );
}

// =============================================================================
// Conditions and functions
// =============================================================================

#[test]
fn test_nested_junctions() {
    let cond = sql::and([
        sql::equal("", "a", 1),
        sql::or([
            sql::equal("", "b", 2),
            sql::and([sql::equal("", "c", 3), sql::equal("", "d", 4)]),
        ]),
    ]);

    assert_eq!(
        render(&cond),
        r#""a" = 1 AND ("b" = 2 OR ("c" = 3 AND "d" = 4))"#
    );
    assert_eq!(render(&sql::not(sql::equal("", "a", 1))), r#"NOT ("a" = 1)"#);
}

#[test]
fn test_in_list_and_in_query() {
    let cond = sql::in_list(sql::name("id"), [1, 2, 3]);
    assert_eq!(render(&cond), r#""id" IN (1, 2, 3)"#);

    let owners = SqlSelect::new().add_fields("o", ["user_id"]).add_from_as("Orders", "o");
    let cond = sql::in_query(sql::name("id"), owners);
    assert_eq!(
        render(&cond),
        r#""id" IN (SELECT "o"."user_id" FROM "Orders" "o")"#
    );
}

#[test]
fn test_empty_in_list_never_matches() {
    let cond = sql::and([
        sql::equal("", "active", true),
        sql::in_list(sql::name("id"), Vec::<i64>::new()),
    ]);
    assert_eq!(render(&cond), r#""active" = 1 AND 1 = 0"#);
}

#[test]
fn test_starts_with_escapes_metacharacters() {
    let cond = sql::starts_with(sql::name("code"), "Ab_c%");
    assert_eq!(render(&cond), r#""code" LIKE 'Ab|_c|%%' ESCAPE '|'"#);
}

#[test]
fn test_matches_translates_wildcards() {
    let cond = sql::matches(sql::name("code"), "A*_?");
    assert_eq!(render(&cond), r#""code" LIKE 'A%|__' ESCAPE '|'"#);
}

#[test]
fn test_function_rendering() {
    let concat = sql::concat([sql::name("first"), sql::constant(" "), sql::name("last")]);
    assert_eq!(render(&concat), r#""first" || ' ' || "last""#);

    let nvl = sql::nvl([sql::name("nick"), sql::name("name")]);
    assert_eq!(render(&nvl), r#"COALESCE("nick", "name")"#);

    let cast = sql::cast(sql::name("x"), SqlDataType::Decimal, 10, 2);
    assert_eq!(render(&cast), r#"CAST("x" AS NUMERIC(10, 2))"#);

    let choice = sql::sql_if(sql::is_null("", "x"), sql::constant(0), sql::name("x"));
    assert_eq!(render(&choice), r#"CASE WHEN "x" IS NULL THEN 0 ELSE "x" END"#);

    let sum = sql::plus([sql::name("a"), sql::constant(1)]);
    assert_eq!(render(&sum), r#"("a" + 1)"#);

    let left = sql::left(sql::name("code"), 3);
    assert_eq!(render(&left), r#"SUBSTR("code",1,3)"#);

    let bits = sql::bit_and(sql::name("flags"), 4);
    assert_eq!(render(&bits), r#"("flags" & 4)"#);
}

// =============================================================================
// Keywords
// =============================================================================

#[test]
fn test_ddl_keywords() {
    let index = sql::create_index("Users", "ix_name", &["name"], false);
    assert_eq!(render(&index), r#"CREATE INDEX "ix_name" ON "Users" ("name")"#);

    let fk = sql::create_foreign_key(
        "Orders",
        "fk_customer",
        "customer_id",
        "Customers",
        "id",
        Some(SqlKeyword::Delete),
    );
    assert_eq!(
        render(&fk),
        r#"ALTER TABLE "Orders" ADD CONSTRAINT "fk_customer" FOREIGN KEY ("customer_id") REFERENCES "Customers" ("id") ON DELETE CASCADE"#
    );

    let pk = sql::create_primary_key("Orders", "pk_orders", &["id"]);
    assert_eq!(
        render(&pk),
        r#"ALTER TABLE "Orders" ADD CONSTRAINT "pk_orders" PRIMARY KEY ("id")"#
    );

    assert_eq!(render(&sql::drop_table("Orders")), r#"DROP TABLE "Orders""#);
    assert_eq!(
        render(&sql::rename_table("a", "b")),
        r#"ALTER TABLE "a" RENAME TO "b""#
    );
    assert_eq!(render(&sql::temporary_name("scratch")), "scratch");
}

#[test]
fn test_unsupported_keywords_are_not_implemented() {
    for command in [
        sql::db_indexes(None, None, None),
        sql::set_parameter("x", 1),
    ] {
        let err = command.render(&GenericDialect).unwrap_err();
        assert!(err.is_not_implemented(), "{err}");
    }
}

#[test]
fn test_db_name_is_empty() {
    assert_eq!(render(&sql::db_name()), "");
}

#[test]
fn test_statement_dispatch() {
    let query = SqlQuery::from(SqlSelect::new().add_from("Users"));
    assert_eq!(render(&query), r#"SELECT * FROM "Users""#);
}
