// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the PostgreSQL dialect

use polysql_dialect::{PostgreSqlDialect, Render};
use polysql_ir::{
    SortDirection, SqlCreate, SqlDataType, SqlField, SqlSelect, SqlUpdate, TriggerBody,
    TriggerEvent, TriggerSpec, TriggerTiming, sql,
};

fn render(node: &impl Render) -> String {
    node.render(&PostgreSqlDialect).unwrap()
}

#[test]
fn test_select_with_limit_offset() {
    let query = SqlSelect::new()
        .add_from("Users")
        .set_where(sql::more_equal("", "age", 30))
        .add_order_name("name", SortDirection::Asc)
        .set_limit(10)
        .set_offset(20);

    assert_eq!(
        render(&query),
        "SELECT * FROM \"Users\" WHERE \"age\" >= 30 ORDER BY \"name\" LIMIT 10 OFFSET 20"
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
        );

    assert_eq!(
        render(&update),
        "UPDATE \"Orders\" SET \"status\"='closed' FROM \"Customers\" \"c\" \
         WHERE \"Orders\".\"customer_id\" = \"c\".\"id\""
    );
}

#[test]
fn test_ends_with_uses_ilike() {
    let cond = sql::ends_with(sql::field("u", "name"), "son");
    assert_eq!(
        render(&cond),
        "\"u\".\"name\" ILIKE '%son' ESCAPE '|'"
    );
}

#[test]
fn test_column_types() {
    let create = SqlCreate::new("Flags")
        .add_boolean("active", true)
        .add_field(SqlField::new("score", SqlDataType::Double))
        .add_long("created", false);

    assert_eq!(
        render(&create),
        "CREATE TABLE \"Flags\" (\"active\" NUMERIC(1) NOT NULL, \"score\" DOUBLE PRECISION, \"created\" BIGINT)"
    );
}

#[test]
fn test_catalog_tables_over_pg_class() {
    let sql = render(&sql::db_tables(None, Some("public"), Some("users")));

    assert_eq!(
        sql,
        "SELECT \"c\".\"relname\" AS \"tblName\", \"c\".\"reltuples\" AS \"rowCount\" \
         FROM \"pg_catalog\".\"pg_class\" \"c\" \
         INNER JOIN \"pg_catalog\".\"pg_namespace\" \"n\" ON \"c\".\"relnamespace\" = \"n\".\"oid\" \
         WHERE \"c\".\"relkind\" = 'r' AND \"n\".\"nspname\" = 'public' AND \"c\".\"relname\" = 'users'"
    );
}

#[test]
fn test_catalog_indexes_and_session_functions() {
    let sql = render(&sql::db_indexes(None, None, Some("users")));
    assert!(sql.contains("FROM \"pg_catalog\".\"pg_indexes\" \"i\""), "{sql}");
    assert!(sql.ends_with("WHERE \"i\".\"tablename\" = 'users'"), "{sql}");

    assert_eq!(
        render(&sql::db_name()),
        "SELECT current_database() AS \"dbName\""
    );
    assert_eq!(
        render(&sql::db_schema()),
        "SELECT current_schema() AS \"dbSchema\""
    );
}

#[test]
fn test_audit_trigger_creates_function_and_trigger() {
    let trigger = TriggerSpec::new(
        TriggerTiming::After,
        vec![TriggerEvent::Delete],
        TriggerBody::Audit {
            audit_table: "users_audit".to_string(),
            id_name: "id".to_string(),
            fields: vec!["name".to_string()],
        },
    );

    assert_eq!(
        render(&sql::create_trigger("tr_audit", "users", trigger)),
        "CREATE OR REPLACE FUNCTION \"tr_audit_fn\"() RETURNS trigger AS $$ BEGIN \
         INSERT INTO \"users_audit\" (\"id\", \"name\") VALUES (OLD.\"id\", OLD.\"name\"); \
         RETURN NULL; END; $$ LANGUAGE plpgsql; \
         CREATE TRIGGER \"tr_audit\" AFTER DELETE ON \"users\" FOR EACH ROW EXECUTE PROCEDURE \"tr_audit_fn\"()"
    );
}

#[test]
fn test_before_update_trigger_returns_new_row() {
    let trigger = TriggerSpec::new(
        TriggerTiming::Before,
        vec![TriggerEvent::Update],
        TriggerBody::Custom("NEW.updated := now();".to_string()),
    );

    let sql = render(&sql::create_trigger("tr_touch", "users", trigger));
    assert!(sql.contains("BEGIN NEW.updated := now(); RETURN NEW; END;"), "{sql}");
    assert!(sql.contains("BEFORE UPDATE ON \"users\""), "{sql}");
}
