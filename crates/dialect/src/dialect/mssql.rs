// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Microsoft SQL Server dialect
//!
//! SQL Server diverges from the base grammar in three structural places:
//!
//! - **Pagination**: no `LIMIT`/`OFFSET`; rows are capped with `TOP` and
//!   skipped through a `ROW_NUMBER()` window wrapped in an outer query
//! - **Correlated UPDATE**: rendered as `MERGE INTO ... WHEN MATCHED`, which
//!   must be terminated with `;`
//! - **CREATE TABLE AS SELECT**: rendered as `SELECT ... INTO target`
//!
//! Every synthetic alias comes from [`sql::unique_name`], so it can never
//! collide with a caller-chosen name.

use polysql_ir::catalog::{DB_NAME, DB_SCHEMA, KEY_NAME, ROW_COUNT, TBL_NAME, TRIGGER_NAME};
use polysql_ir::{
    Condition, Expression, Params, SqlCreate, SqlDataType, SqlDelete, SqlEngine, SqlFunction,
    SqlInsert, SqlKeyword, SqlSelect, SqlUpdate, TriggerRelation, TriggerTiming, Value, sql,
};

use super::base::{self, SelectHead};
use super::catalog;
use crate::render::{Render, quote_name};
use crate::{Args, RenderError, RenderResult, SqlBuilder};

/// Length used by `SUBSTRING` when the caller gives none
const SUBSTRING_MAX_LEN: u32 = 1_000_000;

#[derive(Debug, Clone, Copy, Default)]
pub struct MsSqlDialect;

impl MsSqlDialect {
    fn alias(&self) -> String {
        self.sql_quote(&sql::unique_name())
    }

    fn tables(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let mut wh = vec![
            sql::equal("o", "type", "U"),
            sql::equal("o", "is_ms_shipped", 0),
            sql::less("p", "index_id", 2),
        ];
        wh.extend(catalog::filters(
            args,
            &[("dbSchema", "s", "name"), ("table", "o", "name")],
        )?);

        let query = SqlSelect::new()
            .add_field("o", "name", Some(TBL_NAME))
            .add_sum("p", "rows", Some(ROW_COUNT))
            .add_from_as("sys.objects", "o")
            .add_from_inner(
                "sys.partitions",
                Some("p"),
                sql::join_using("o", "p", &["object_id"]),
            )
            .add_from_inner(
                "sys.schemas",
                Some("s"),
                sql::join_using("o", "s", &["schema_id"]),
            )
            .set_where(sql::and(wh))
            .add_group("o", "name");
        self.get_select(&query)
    }

    fn indexes(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let mut wh = vec![
            sql::not_null("i", "name"),
            sql::equal("o", "type", "U"),
            sql::equal("o", "is_ms_shipped", 0),
        ];
        wh.extend(catalog::filters(
            args,
            &[("dbSchema", "s", "name"), ("table", "o", "name")],
        )?);

        let query = SqlSelect::new()
            .add_field("o", "name", Some(TBL_NAME))
            .add_field("i", "name", Some(KEY_NAME))
            .add_from_as("sys.indexes", "i")
            .add_from_inner(
                "sys.objects",
                Some("o"),
                sql::join_using("i", "o", &["object_id"]),
            )
            .add_from_inner(
                "sys.schemas",
                Some("s"),
                sql::join_using("o", "s", &["schema_id"]),
            )
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn triggers(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let wh = catalog::filters(args, &[("dbSchema", "s", "name"), ("table", "o", "name")])?;

        let query = SqlSelect::new()
            .add_field("o", "name", Some(TBL_NAME))
            .add_field("t", "name", Some(TRIGGER_NAME))
            .add_from_as("sys.triggers", "t")
            .add_from_inner(
                "sys.objects",
                Some("o"),
                sql::join("t", "parent_id", "o", "object_id"),
            )
            .add_from_inner(
                "sys.schemas",
                Some("s"),
                sql::join_using("o", "s", &["schema_id"]),
            )
            .set_where(sql::and(wh));
        self.get_select(&query)
    }

    fn create_trigger(&self, args: &Args<'_, Self>) -> RenderResult<String> {
        let trigger = args.trigger("trigger")?;
        let timing = match trigger.timing {
            TriggerTiming::Before => {
                return Err(RenderError::not_implemented(
                    self.engine(),
                    "BEFORE trigger",
                ));
            }
            timing => timing.as_sql(),
        };

        Ok(format!(
            "CREATE TRIGGER {} ON {} {} {} AS BEGIN SET NOCOUNT ON; {} END;",
            args.ident("name")?,
            args.ident("table")?,
            timing,
            base::trigger_events(trigger, ", "),
            base::trigger_body(self, trigger)?
        ))
    }
}

impl SqlBuilder for MsSqlDialect {
    fn engine(&self) -> SqlEngine {
        SqlEngine::MsSql
    }

    fn sql_quote(&self, identifier: &str) -> String {
        format!("[{}]", identifier.replace(']', "]]"))
    }

    /// Emulates LIMIT/OFFSET with `TOP` and a `ROW_NUMBER()` window
    fn get_select(&self, q: &SqlSelect) -> RenderResult<String> {
        if q.limit == 0 && q.offset == 0 {
            return base::get_select(self, q);
        }
        let top = if q.limit > 0 {
            let top = q.offset.checked_add(q.limit).ok_or_else(|| {
                RenderError::invalid(
                    "SELECT",
                    format!("LIMIT {} past OFFSET {} overflows TOP", q.limit, q.offset),
                )
            })?;
            Some(top)
        } else {
            None
        };
        let order = base::order_clause(self, q)?;

        // The window carries the ordering, so ORDER BY is dropped below
        let numbering = if q.offset > 0 {
            let window = if order.is_empty() {
                "(SELECT 0)"
            } else {
                order.as_str()
            };
            let alias = self.alias();
            Some((format!("ROW_NUMBER() OVER (ORDER BY {window}) AS {alias}"), alias))
        } else {
            None
        };
        let lead = numbering.as_ref().map(|(column, _)| column.clone());

        let mut sql = if q.has_union() {
            let wrap = self.alias();
            let unioned = base::select_unions(self, q, &SelectHead::default())?;

            let mut sql = String::from("SELECT ");
            if let Some(top) = top {
                sql.push_str(&format!("TOP {top} "));
            }
            if let Some(lead) = &lead {
                sql.push_str(lead);
                sql.push_str(", ");
            }
            sql.push_str(&format!("{wrap}.* FROM ({unioned}) {wrap}"));
            sql
        } else {
            base::select_body(
                self,
                q,
                &SelectHead {
                    top,
                    lead,
                    into: None,
                },
            )?
        };

        match numbering {
            Some((_, row_number)) => {
                let outer = self.alias();
                sql = format!(
                    "SELECT {outer}.* FROM ({sql}) {outer} WHERE {outer}.{row_number} > {}",
                    q.offset
                );
            }
            None if !order.is_empty() => {
                sql.push_str(" ORDER BY ");
                sql.push_str(&order);
            }
            None => {}
        }
        Ok(sql)
    }

    fn get_update(&self, q: &SqlUpdate) -> RenderResult<String> {
        let Some(from) = &q.from else {
            return base::get_update(self, q);
        };
        if q.is_empty() {
            return Err(RenderError::empty("UPDATE"));
        }
        let mut on = vec![from.join.clone()];
        on.extend(q.where_clause.clone());

        Ok(format!(
            "MERGE INTO {} USING {} ON {} WHEN MATCHED THEN UPDATE SET {};",
            base::target_ref(self, &q.target, q.alias.as_deref()),
            from.source.render(self)?,
            Condition::And(on).render(self)?,
            base::assignments(self, q)?
        ))
    }

    fn get_create(&self, q: &SqlCreate) -> RenderResult<String> {
        let Some(source) = &q.data_source else {
            return base::get_create(self, q);
        };
        if q.is_empty() {
            return Err(RenderError::empty("CREATE"));
        }
        base::ensure_single_source(q.has_mixed_sources(), "CREATE")?;
        let into = quote_name(self, &q.target);

        if source.limit > 0 || source.offset > 0 || source.has_union() {
            let alias = self.alias();
            return Ok(format!(
                "SELECT * INTO {into} FROM ({}) {alias}",
                self.get_select(source)?
            ));
        }
        let head = SelectHead {
            into: Some(into),
            ..SelectHead::default()
        };
        let mut sql = base::select_body(self, source, &head)?;
        let order = base::order_clause(self, source)?;
        if !order.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        Ok(sql)
    }

    fn sql_function(&self, function: SqlFunction, params: &Params) -> RenderResult<String> {
        let args = Args::new(self, params, function);

        match function {
            SqlFunction::Concat => Ok(args.members()?.join(" + ")),
            SqlFunction::Length => Ok(format!("LEN({})", args.sql("expression")?)),
            SqlFunction::Substring => {
                let len = match args.opt_sql("len")? {
                    Some(len) => len,
                    None => SUBSTRING_MAX_LEN.to_string(),
                };
                Ok(format!(
                    "SUBSTRING({},{},{})",
                    args.sql("expression")?,
                    args.sql("pos")?,
                    len
                ))
            }
            SqlFunction::Left => Ok(format!(
                "LEFT({},{})",
                args.sql("expression")?,
                args.sql("len")?
            )),
            SqlFunction::Right => Ok(format!(
                "RIGHT({},{})",
                args.sql("expression")?,
                args.sql("len")?
            )),
            _ => base::sql_function(self, function, params),
        }
    }

    fn sql_keyword(&self, keyword: SqlKeyword, params: &Params) -> RenderResult<String> {
        let args = Args::new(self, params, keyword);

        match keyword {
            SqlKeyword::CreateIndex => {
                let mut sql = base::sql_keyword(self, keyword, params)?;
                let fields = args.names("fields")?;

                // Unique indexes ignore NULLs only when filtered explicitly
                if args.flag("isUnique")? && fields.len() <= 1 {
                    let field = match fields.first() {
                        Some(field) => quote_name(self, field),
                        None => args.ident("name")?,
                    };
                    sql.push_str(&format!(" WHERE {field} IS NOT NULL"));
                }
                Ok(sql)
            }
            SqlKeyword::CreateTrigger => self.create_trigger(&args),
            SqlKeyword::DbName => Ok(format!("SELECT db_name() AS {}", self.sql_quote(DB_NAME))),
            SqlKeyword::DbSchema => Ok(format!(
                "SELECT schema_name() AS {}",
                self.sql_quote(DB_SCHEMA)
            )),
            SqlKeyword::DbTables => self.tables(&args),
            SqlKeyword::DbIndexes => self.indexes(&args),
            SqlKeyword::DbTriggers => self.triggers(&args),
            SqlKeyword::RenameTable => Ok(format!(
                "EXEC sp_rename {}, {}",
                self.sql_transform(&Value::Text(args.text("nameFrom")?)),
                self.sql_transform(&Value::Text(args.text("nameTo")?))
            )),
            SqlKeyword::Temporary => Ok(String::new()),
            SqlKeyword::TemporaryName => Ok(format!("#{}", args.text("name")?)),
            _ => base::sql_keyword(self, keyword, params),
        }
    }

    fn sql_type(&self, data_type: SqlDataType, precision: u32, scale: u32) -> String {
        match data_type {
            SqlDataType::Double => "FLOAT".to_string(),
            SqlDataType::Text => "VARCHAR(MAX)".to_string(),
            _ => base::sql_type(data_type, precision, scale),
        }
    }

    /// Copies the previous version of every changed row from `deleted`
    fn audit_trigger(
        &self,
        audit_table: &str,
        id_name: &str,
        fields: &[String],
    ) -> RenderResult<String> {
        let columns: Vec<&str> = std::iter::once(id_name)
            .chain(fields.iter().map(String::as_str))
            .collect();

        let insert = SqlInsert::new(audit_table)
            .add_fields(columns.iter().copied())
            .set_data_source(
                SqlSelect::new()
                    .add_fields("deleted", columns.iter().copied())
                    .add_from("deleted"),
            );
        Ok(format!("{};", self.get_insert(&insert)?))
    }

    /// Deletes rows of related tables that referenced the deleted rows
    fn relation_trigger(&self, relations: &[TriggerRelation]) -> RenderResult<String> {
        let mut statements = Vec::with_capacity(relations.len());

        for relation in relations {
            let owners = SqlSelect::new()
                .add_fields("deleted", [relation.field.as_str()])
                .add_from("deleted");
            let delete = SqlDelete::new(relation.rel_table.as_str()).set_where(sql::in_query(
                Expression::field(relation.rel_table.as_str(), relation.rel_field.as_str()),
                owners,
            ));
            statements.push(format!("{};", self.get_delete(&delete)?));
        }
        Ok(statements.join(" "))
    }
}
