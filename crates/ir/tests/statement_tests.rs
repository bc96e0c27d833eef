// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for statement builders

use polysql_ir::{
    Condition, Expression, FromItem, FromSource, JoinType, SortDirection, SqlCommand, SqlCreate,
    SqlInsert, SqlKeyword, SqlQuery, SqlSelect, SqlUpdate, sql,
};

// =============================================================================
// SELECT
// =============================================================================

#[test]
fn test_select_builder_accumulates_clauses_in_order() {
    let query = SqlSelect::new()
        .add_fields("u", ["id", "name"])
        .add_count(Some("cnt"))
        .add_from_as("users", "u")
        .add_from_left("orders", Some("o"), sql::join("u", "id", "o", "user_id"))
        .add_group("u", "id")
        .add_group("u", "name")
        .add_order_desc("u", "name")
        .set_distinct_mode(true)
        .set_limit(5);

    assert_eq!(query.fields.len(), 3);
    assert_eq!(query.fields[2].alias.as_deref(), Some("cnt"));
    assert!(matches!(query.from[0], FromItem::Source(FromSource::Table { .. })));
    assert!(matches!(
        query.from[1],
        FromItem::Join {
            join_type: JoinType::Left,
            ..
        }
    ));
    assert_eq!(query.group_by.len(), 2);
    assert_eq!(query.order_by[0].direction, SortDirection::Desc);
    assert!(query.distinct);
    assert_eq!(query.limit, 5);
    assert_eq!(query.offset, 0);
}

#[test]
fn test_select_union_flags() {
    let part = SqlSelect::new().add_fields("a", ["id"]).add_from_as("a", "a");
    let query = part
        .clone()
        .add_union(part.clone())
        .set_union_all_mode(true);

    assert!(query.has_union());
    assert!(query.union_all);
    assert!(!part.has_union());
}

#[test]
fn test_set_where_none_clears_condition() {
    let query = SqlSelect::new()
        .add_from("t")
        .set_where(sql::equal("t", "a", 1))
        .set_where(None);
    assert!(query.where_clause.is_none());
}

// =============================================================================
// INSERT
// =============================================================================

#[test]
fn test_insert_values_are_positional() {
    let insert = SqlInsert::new("users")
        .add_constant("id", 1)
        .add_constant("name", "Ann")
        .add_expression("created", sql::expression("CURRENT_TIMESTAMP"));

    assert_eq!(insert.fields, vec!["id", "name", "created"]);
    assert_eq!(insert.values.len(), 3);
    assert!(!insert.is_empty());
}

#[test]
fn test_insert_from_select() {
    let insert = SqlInsert::new("archive")
        .add_fields(["id", "name"])
        .set_data_source(SqlSelect::new().add_fields("u", ["id", "name"]).add_from_as("users", "u"));
    assert!(insert.values.is_empty());
    assert!(!insert.is_empty());
}

#[test]
#[should_panic(expected = "a data source cannot be combined with explicit values")]
fn test_insert_rejects_data_source_after_values() {
    let _ = SqlInsert::new("users")
        .add_constant("id", 1)
        .set_data_source(SqlSelect::new().add_from("other"));
}

#[test]
#[should_panic(expected = "explicit values cannot be combined with a data source")]
fn test_insert_rejects_values_after_data_source() {
    let _ = SqlInsert::new("users")
        .add_fields(["id"])
        .set_data_source(SqlSelect::new().add_from("other"))
        .add_constant("name", "x");
}

#[test]
fn test_insert_without_fields_is_empty() {
    assert!(SqlInsert::new("users").is_empty());
    assert!(SqlInsert::new("").add_constant("a", 1).is_empty());
}

#[test]
fn test_mixed_sources_are_detected_on_plain_structs() {
    let insert = SqlInsert {
        target: "users".to_string(),
        fields: vec!["id".to_string()],
        values: vec![sql::constant(1)],
        data_source: Some(Box::new(SqlSelect::new().add_from("other"))),
    };
    assert!(insert.has_mixed_sources());
    assert!(!SqlInsert::new("users").add_constant("id", 1).has_mixed_sources());

    let mut create = SqlCreate::new("t").add_integer("id", false);
    assert!(!create.has_mixed_sources());
    create.data_source = Some(Box::new(SqlSelect::new().add_from("other")));
    assert!(create.has_mixed_sources());
}

// =============================================================================
// UPDATE / CREATE
// =============================================================================

#[test]
fn test_update_with_correlated_source() {
    let update = SqlUpdate::new("Orders")
        .add_expression("total", sql::field("s", "total"))
        .set_from_table("OrderSums", Some("s"), sql::join("Orders", "id", "s", "order_id"));

    let from = update.from.as_ref().expect("correlated source");
    assert_eq!(from.source, FromSource::aliased("OrderSums", "s"));
    assert!(!update.is_empty());
}

#[test]
fn test_create_columns() {
    let create = SqlCreate::new("t")
        .temporary(true)
        .add_integer("id", true)
        .add_string("name", 50, false)
        .add_decimal("amount", 12, 2, false);

    assert!(create.temporary);
    assert_eq!(create.fields.len(), 3);
    assert_eq!(create.fields[1].precision, 50);
    assert!(create.fields[0].not_null);
    assert!(SqlCreate::new("t").is_empty());
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_query_json_shape() {
    let query: SqlQuery = SqlSelect::new()
        .add_from("Users")
        .set_where(sql::more_equal("", "age", 30))
        .into();

    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["kind"], "select");
    assert_eq!(json["statement"]["from"][0]["Source"]["Table"]["name"], "Users");

    let back: SqlQuery = serde_json::from_value(json).unwrap();
    assert_eq!(back, query);
}

#[test]
fn test_command_json_shape() {
    let command: SqlQuery = sql::db_tables(None, Some("dbo"), Some("Users")).into();
    let json = serde_json::to_value(&command).unwrap();
    assert_eq!(json["kind"], "command");
    assert_eq!(json["statement"]["keyword"], "DB_TABLES");
    assert_eq!(json["statement"]["params"]["dbSchema"]["Value"]["Text"], "dbo");
}

#[test]
fn test_condition_helpers_compose() {
    let cond = sql::or([
        sql::is_null("t", "deleted"),
        sql::not(sql::and([sql::equal("t", "a", 1)])),
    ]);
    match cond {
        Condition::Or(children) => {
            assert_eq!(children.len(), 2);
            assert!(matches!(children[1], Condition::Not(_)));
        }
        other => panic!("Expected OR, got {:?}", other),
    }

    let keys = SqlCommand::new(SqlKeyword::DbKeys).with("table", "users");
    assert_eq!(keys.params.len(), 1);
    assert_eq!(sql::name("a.b"), Expression::Name("a.b".to_string()));
}
