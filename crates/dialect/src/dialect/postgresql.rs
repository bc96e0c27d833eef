// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PostgreSQL dialect

use polysql_ir::catalog::{DB_NAME, DB_SCHEMA, KEY_NAME, ROW_COUNT, TBL_NAME};
use polysql_ir::{
    Params, SqlDataType, SqlEngine, SqlKeyword, SqlSelect, TriggerEvent, TriggerRelation,
    TriggerScope, TriggerTiming, sql,
};

use super::base;
use super::catalog;
use crate::render::quote_name;
use crate::{Args, RenderResult, SqlBuilder};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSqlDialect;

impl PostgreSqlDialect {
    fn tables(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let mut wh = vec![sql::equal("c", "relkind", "r")];
        wh.extend(catalog::filters(
            args,
            &[("dbSchema", "n", "nspname"), ("table", "c", "relname")],
        )?);

        let query = SqlSelect::new()
            .add_field("c", "relname", Some(TBL_NAME))
            .add_field("c", "reltuples", Some(ROW_COUNT))
            .add_from_as("pg_catalog.pg_class", "c")
            .add_from_inner(
                "pg_catalog.pg_namespace",
                Some("n"),
                sql::join("c", "relnamespace", "n", "oid"),
            )
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn indexes(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(
            args,
            &[("dbSchema", "i", "schemaname"), ("table", "i", "tablename")],
        )?;

        let query = SqlSelect::new()
            .add_field("i", "tablename", Some(TBL_NAME))
            .add_field("i", "indexname", Some(KEY_NAME))
            .add_from_as("pg_catalog.pg_indexes", "i")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    /// Trigger function plus the trigger that executes it
    fn create_trigger(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let trigger = args.trigger("trigger")?;
        let name = args.text("name")?;
        let function = quote_name(self, &format!("{name}_fn"));

        let result = match trigger.timing {
            TriggerTiming::After => "NULL",
            _ if trigger.events.contains(&TriggerEvent::Delete) => "OLD",
            _ => "NEW",
        };
        let scope = match trigger.scope {
            TriggerScope::Row => "ROW",
            TriggerScope::Statement => "STATEMENT",
        };

        Ok(format!(
            "CREATE OR REPLACE FUNCTION {function}() RETURNS trigger AS $$ BEGIN {} RETURN {result}; END; $$ LANGUAGE plpgsql; \
             CREATE TRIGGER {} {} {} ON {} FOR EACH {scope} EXECUTE PROCEDURE {function}()",
            base::trigger_body(self, trigger)?,
            quote_name(self, &name),
            trigger.timing.as_sql(),
            base::trigger_events(trigger, " OR "),
            args.ident("table")?
        ))
    }
}

impl SqlBuilder for PostgreSqlDialect {
    fn engine(&self) -> SqlEngine {
        SqlEngine::PostgreSql
    }

    fn sql_quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn sql_keyword(&self, keyword: SqlKeyword, params: &Params) -> RenderResult<String> {
        let args = Args::new(self, params, keyword);

        match keyword {
            SqlKeyword::CreateTrigger => self.create_trigger(&args),
            SqlKeyword::DbName => Ok(format!(
                "SELECT current_database() AS {}",
                self.sql_quote(DB_NAME)
            )),
            SqlKeyword::DbSchema => Ok(format!(
                "SELECT current_schema() AS {}",
                self.sql_quote(DB_SCHEMA)
            )),
            SqlKeyword::DbTables => self.tables(&args),
            SqlKeyword::DbIndexes => self.indexes(&args),
            SqlKeyword::SetParameter => Ok(format!(
                "SET {} = {}",
                args.text("prmName")?,
                args.sql("prmValue")?
            )),
            SqlKeyword::Like => Ok("ILIKE".to_string()),
            _ => base::sql_keyword(self, keyword, params),
        }
    }

    fn sql_type(&self, data_type: SqlDataType, precision: u32, scale: u32) -> String {
        match data_type {
            SqlDataType::Boolean => "NUMERIC(1)".to_string(),
            SqlDataType::Double => "DOUBLE PRECISION".to_string(),
            _ => base::sql_type(data_type, precision, scale),
        }
    }

    fn audit_trigger(
        &self,
        audit_table: &str,
        id_name: &str,
        fields: &[String],
    ) -> RenderResult<String> {
        base::row_trigger_audit(self, "OLD", audit_table, id_name, fields)
    }

    fn relation_trigger(&self, relations: &[TriggerRelation]) -> RenderResult<String> {
        base::row_trigger_relation(self, "OLD", relations)
    }
}
