// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Oracle dialect
//!
//! Oracle folds unquoted identifiers to upper case, so catalog queries name
//! the `ALL_*` views and their columns in upper case to survive quoting.

use polysql_ir::catalog::{
    DB_NAME, DB_SCHEMA, FK_REF_TABLE, FLD_LENGTH, FLD_NAME, FLD_NULL, FLD_PRECISION, FLD_SCALE,
    FLD_TYPE, KEY_NAME, KEY_TYPE, ROW_COUNT, SCHEMA_NAME, TBL_NAME, TRIGGER_NAME,
};
use polysql_ir::{
    Params, SqlDataType, SqlEngine, SqlFunction, SqlKeyword, SqlSelect, SqlUpdate,
    TriggerRelation, TriggerScope, sql,
};

use super::base;
use super::catalog;
use crate::render::Render;
use crate::{Args, RenderError, RenderResult, SqlBuilder};

#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

/// `CONSTRAINT_TYPE` code of a key kind in `ALL_CONSTRAINTS`
fn constraint_code(keyword: SqlKeyword) -> Option<&'static str> {
    match keyword {
        SqlKeyword::PrimaryKey => Some("P"),
        SqlKeyword::ForeignKey => Some("R"),
        SqlKeyword::Unique => Some("U"),
        SqlKeyword::Check => Some("C"),
        _ => None,
    }
}

impl OracleDialect {
    fn schemas(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(args, &[("dbSchema", "u", "USERNAME")])?;
        let query = SqlSelect::new()
            .add_field("u", "USERNAME", Some(SCHEMA_NAME))
            .add_from_as("ALL_USERS", "u")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn tables(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(
            args,
            &[("dbSchema", "t", "OWNER"), ("table", "t", "TABLE_NAME")],
        )?;
        let query = SqlSelect::new()
            .add_field("t", "TABLE_NAME", Some(TBL_NAME))
            .add_field("t", "NUM_ROWS", Some(ROW_COUNT))
            .add_from_as("ALL_TABLES", "t")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn fields(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(
            args,
            &[("dbSchema", "c", "OWNER"), ("table", "c", "TABLE_NAME")],
        )?;
        let query = SqlSelect::new()
            .add_field("c", "TABLE_NAME", Some(TBL_NAME))
            .add_field("c", "COLUMN_NAME", Some(FLD_NAME))
            .add_field("c", "NULLABLE", Some(FLD_NULL))
            .add_field("c", "DATA_TYPE", Some(FLD_TYPE))
            .add_field("c", "CHAR_LENGTH", Some(FLD_LENGTH))
            .add_field("c", "DATA_PRECISION", Some(FLD_PRECISION))
            .add_field("c", "DATA_SCALE", Some(FLD_SCALE))
            .add_from_as("ALL_TAB_COLUMNS", "c")
            .set_where(sql::and(wh))
            .add_order("c", "COLUMN_ID");
        self.get_select(&query)
    }

    fn keys(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let mut wh = catalog::filters(
            args,
            &[("dbSchema", "k", "OWNER"), ("table", "k", "TABLE_NAME")],
        )?;
        wh.push(catalog::key_type_filter(
            args,
            "k",
            "CONSTRAINT_TYPE",
            constraint_code,
        )?);
        let query = SqlSelect::new()
            .add_field("k", "TABLE_NAME", Some(TBL_NAME))
            .add_field("k", "CONSTRAINT_NAME", Some(KEY_NAME))
            .add_field("k", "CONSTRAINT_TYPE", Some(KEY_TYPE))
            .add_from_as("ALL_CONSTRAINTS", "k")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn foreign_keys(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let mut wh = vec![sql::equal("c", "CONSTRAINT_TYPE", "R")];
        wh.extend(catalog::filters(
            args,
            &[
                ("dbSchema", "c", "OWNER"),
                ("table", "c", "TABLE_NAME"),
                ("refTable", "r", "TABLE_NAME"),
            ],
        )?);
        let query = SqlSelect::new()
            .add_field("c", "TABLE_NAME", Some(TBL_NAME))
            .add_field("c", "CONSTRAINT_NAME", Some(KEY_NAME))
            .add_field("r", "TABLE_NAME", Some(FK_REF_TABLE))
            .add_from_as("ALL_CONSTRAINTS", "c")
            .add_from_inner(
                "ALL_CONSTRAINTS",
                Some("r"),
                sql::and([
                    sql::join("c", "R_OWNER", "r", "OWNER"),
                    sql::join("c", "R_CONSTRAINT_NAME", "r", "CONSTRAINT_NAME"),
                ]),
            )
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn indexes(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(
            args,
            &[("dbSchema", "i", "TABLE_OWNER"), ("table", "i", "TABLE_NAME")],
        )?;
        let query = SqlSelect::new()
            .add_field("i", "TABLE_NAME", Some(TBL_NAME))
            .add_field("i", "INDEX_NAME", Some(KEY_NAME))
            .add_from_as("ALL_INDEXES", "i")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn triggers(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(
            args,
            &[("dbSchema", "t", "TABLE_OWNER"), ("table", "t", "TABLE_NAME")],
        )?;
        let query = SqlSelect::new()
            .add_field("t", "TABLE_NAME", Some(TBL_NAME))
            .add_field("t", "TRIGGER_NAME", Some(TRIGGER_NAME))
            .add_from_as("ALL_TRIGGERS", "t")
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn create_trigger(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let trigger = args.trigger("trigger")?;
        let scope = match trigger.scope {
            TriggerScope::Row => " FOR EACH ROW",
            TriggerScope::Statement => "",
        };

        Ok(format!(
            "CREATE OR REPLACE TRIGGER {} {} {} ON {}{scope} BEGIN {} END;",
            args.ident("name")?,
            trigger.timing.as_sql(),
            base::trigger_events(trigger, " OR "),
            args.ident("table")?,
            base::trigger_body(self, trigger)?
        ))
    }
}

impl SqlBuilder for OracleDialect {
    fn engine(&self) -> SqlEngine {
        SqlEngine::Oracle
    }

    fn sql_quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    /// Row limiting clause of Oracle 12c and later
    fn get_select(&self, q: &SqlSelect) -> RenderResult<String> {
        let mut sql = base::select_unpaged(self, q)?;
        if q.offset > 0 {
            sql.push_str(&format!(" OFFSET {} ROWS", q.offset));
        }
        if q.limit > 0 {
            sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", q.limit));
        }
        Ok(sql)
    }

    /// Correlated UPDATE as `MERGE INTO ... ON (join) ... WHERE`
    fn get_update(&self, q: &SqlUpdate) -> RenderResult<String> {
        let Some(from) = &q.from else {
            return base::get_update(self, q);
        };
        if q.is_empty() {
            return Err(RenderError::empty("UPDATE"));
        }
        Ok(format!(
            "MERGE INTO {} USING {} ON ({}) WHEN MATCHED THEN UPDATE SET {}{}",
            base::target_ref(self, &q.target, q.alias.as_deref()),
            from.source.render(self)?,
            from.join.render(self)?,
            base::assignments(self, q)?,
            base::clause(self, "WHERE", q.where_clause.as_ref())?
        ))
    }

    fn sql_function(&self, function: SqlFunction, params: &Params) -> RenderResult<String> {
        match function {
            SqlFunction::BitAnd => {
                let args = Args::new(self, params, function);
                Ok(format!(
                    "BITAND({}, {})",
                    args.sql("expression")?,
                    args.sql("value")?
                ))
            }
            _ => base::sql_function(self, function, params),
        }
    }

    fn sql_keyword(&self, keyword: SqlKeyword, params: &Params) -> RenderResult<String> {
        let args = Args::new(self, params, keyword);

        match keyword {
            SqlKeyword::CreateTrigger => self.create_trigger(&args),
            SqlKeyword::DbName => Ok(format!(
                "SELECT sys_context('USERENV', 'DB_NAME') AS {} FROM dual",
                self.sql_quote(DB_NAME)
            )),
            SqlKeyword::DbSchema => Ok(format!(
                "SELECT sys_context('USERENV', 'CURRENT_SCHEMA') AS {} FROM dual",
                self.sql_quote(DB_SCHEMA)
            )),
            SqlKeyword::DbSchemas => self.schemas(&args),
            SqlKeyword::DbTables => self.tables(&args),
            SqlKeyword::DbFields => self.fields(&args),
            SqlKeyword::DbKeys => self.keys(&args),
            SqlKeyword::DbForeignKeys => self.foreign_keys(&args),
            SqlKeyword::DbIndexes => self.indexes(&args),
            SqlKeyword::DbTriggers => self.triggers(&args),
            SqlKeyword::SetParameter => Ok(format!(
                "ALTER SESSION SET {} = {}",
                args.text("prmName")?,
                args.sql("prmValue")?
            )),
            SqlKeyword::Temporary => Ok("GLOBAL TEMPORARY ".to_string()),
            _ => base::sql_keyword(self, keyword, params),
        }
    }

    fn sql_type(&self, data_type: SqlDataType, precision: u32, scale: u32) -> String {
        match data_type {
            SqlDataType::Boolean => "NUMBER(1)".to_string(),
            SqlDataType::Integer => "NUMBER(10)".to_string(),
            SqlDataType::Long | SqlDataType::Date | SqlDataType::DateTime => {
                "NUMBER(19)".to_string()
            }
            SqlDataType::Double => "BINARY_DOUBLE".to_string(),
            SqlDataType::Decimal => format!("NUMBER({precision}, {scale})"),
            SqlDataType::Char => format!("CHAR({precision})"),
            SqlDataType::String => format!("NVARCHAR2({precision})"),
            SqlDataType::Text => "NCLOB".to_string(),
        }
    }

    fn audit_trigger(
        &self,
        audit_table: &str,
        id_name: &str,
        fields: &[String],
    ) -> RenderResult<String> {
        base::row_trigger_audit(self, ":OLD", audit_table, id_name, fields)
    }

    fn relation_trigger(&self, relations: &[TriggerRelation]) -> RenderResult<String> {
        base::row_trigger_relation(self, ":OLD", relations)
    }
}
