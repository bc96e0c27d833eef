// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Catalog introspection across engines
//!
//! Every engine must expose the same output column names, whatever catalog
//! views back the query.

use polysql_dialect::{GenericDialect, MsSqlDialect, Render, builder};
use polysql_ir::catalog::{
    FK_REF_TABLE, FLD_NAME, FLD_TYPE, KEY_NAME, ROW_COUNT, TBL_NAME, TRIGGER_NAME,
};
use polysql_ir::{SqlCommand, SqlEngine, SqlKeyword, sql};

fn render_all(command: &SqlCommand) -> Vec<(SqlEngine, String)> {
    SqlEngine::ALL
        .into_iter()
        .map(|engine| {
            let sql = command
                .render(builder(engine))
                .unwrap_or_else(|err| panic!("{engine}: {err}"));
            (engine, sql)
        })
        .collect()
}

fn assert_aliases(command: &SqlCommand, aliases: &[&str]) {
    for (engine, sql) in render_all(command) {
        let b = builder(engine);
        for alias in aliases {
            let quoted = format!(" AS {}", b.sql_quote(alias));
            assert!(sql.contains(&quoted), "{engine}: {sql} lacks {quoted}");
        }
    }
}

// =============================================================================
// DB_TABLES
// =============================================================================

#[test]
fn test_tables_generic() {
    let command = sql::db_tables(None, Some("dbo"), Some("Users"));

    assert_eq!(
        command.render(&GenericDialect).unwrap(),
        concat!(
            r#"SELECT "t"."table_name" AS "tblName", "t"."table_rows" AS "rowCount" "#,
            r#"FROM "information_schema"."tables" "t" "#,
            r#"WHERE "t"."table_schema" = 'dbo' AND "t"."table_name" = 'Users'"#
        )
    );
}

#[test]
fn test_tables_mssql() {
    let command = sql::db_tables(None, Some("dbo"), Some("Users"));
    let sql = command.render(&MsSqlDialect).unwrap();

    assert!(sql.starts_with("SELECT [o].[name] AS [tblName], SUM([p].[rows]) AS [rowCount] FROM [sys].[objects] [o]"), "{sql}");
    assert!(sql.contains("[s].[name] = 'dbo' AND [o].[name] = 'Users'"), "{sql}");
    assert!(sql.ends_with("GROUP BY [o].[name]"), "{sql}");
}

#[test]
fn test_tables_expose_same_columns_everywhere() {
    assert_aliases(
        &sql::db_tables(None, Some("dbo"), Some("Users")),
        &[TBL_NAME, ROW_COUNT],
    );
}

#[test]
fn test_absent_filters_are_omitted() {
    let sql = sql::db_tables(None, None, None)
        .render(&GenericDialect)
        .unwrap();
    assert!(!sql.contains("WHERE"), "{sql}");
}

// =============================================================================
// Other catalog queries
// =============================================================================

#[test]
fn test_fields_are_ordered_by_position() {
    let sql = sql::db_fields(Some("app"), Some("public"), Some("users"))
        .render(&GenericDialect)
        .unwrap();

    assert!(sql.contains(r#"FROM "information_schema"."columns" "c""#), "{sql}");
    assert!(
        sql.contains(concat!(
            r#"WHERE "c"."table_catalog" = 'app' AND "c"."table_schema" = 'public' "#,
            r#"AND "c"."table_name" = 'users'"#
        )),
        "{sql}"
    );
    assert!(sql.ends_with(r#"ORDER BY "c"."ordinal_position""#), "{sql}");

    assert_aliases(
        &sql::db_fields(None, None, Some("users")),
        &[TBL_NAME, FLD_NAME, FLD_TYPE],
    );
}

#[test]
fn test_keys_filter_by_type() {
    let sql = sql::db_keys(None, None, Some("users"), &[SqlKeyword::PrimaryKey])
        .render(&GenericDialect)
        .unwrap();

    assert!(
        sql.ends_with(r#"WHERE "k"."table_name" = 'users' AND "k"."constraint_type" = 'PRIMARY KEY'"#),
        "{sql}"
    );
}

#[test]
fn test_foreign_keys_join_referenced_constraint() {
    let command = sql::db_foreign_keys(None, None, Some("orders"), Some("users"));
    let sql = command.render(&GenericDialect).unwrap();

    assert!(
        sql.contains(concat!(
            r#"INNER JOIN "information_schema"."table_constraints" "r" "#,
            r#"ON "c"."unique_constraint_name" = "r"."constraint_name""#
        )),
        "{sql}"
    );
    assert!(sql.contains(r#""r"."table_name" = 'users'"#), "{sql}");

    assert_aliases(&command, &[TBL_NAME, KEY_NAME, FK_REF_TABLE]);
}

#[test]
fn test_triggers_expose_same_columns_everywhere() {
    assert_aliases(
        &sql::db_triggers(None, None, Some("users")),
        &[TBL_NAME, TRIGGER_NAME],
    );
}

#[test]
fn test_indexes_are_engine_specific() {
    let command = sql::db_indexes(None, None, Some("users"));

    for (engine, result) in SqlEngine::ALL
        .into_iter()
        .map(|engine| (engine, command.render(builder(engine))))
    {
        match engine {
            SqlEngine::Generic => assert!(result.unwrap_err().is_not_implemented()),
            _ => assert!(result.unwrap().contains(&builder(engine).sql_quote(KEY_NAME))),
        }
    }
}
