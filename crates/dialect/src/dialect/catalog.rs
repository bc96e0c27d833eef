// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Catalog introspection over `information_schema`
//!
//! Each query is built as a [`SqlSelect`] and rendered with the calling
//! builder, so quoting and literals follow the engine. Output columns always
//! use the aliases from [`polysql_ir::catalog`].

use polysql_ir::catalog::{
    FK_REF_TABLE, FLD_LENGTH, FLD_NAME, FLD_NULL, FLD_PRECISION, FLD_SCALE, FLD_TYPE,
    KEY_NAME, KEY_TYPE, ROW_COUNT, SCHEMA_NAME, TBL_NAME, TRIGGER_NAME,
};
use polysql_ir::{Condition, SqlKeyword, SqlSelect, sql};

use crate::{Args, RenderResult, SqlBuilder};

/// Equality filters on `source.column` for each present parameter
pub(crate) fn filters<B: SqlBuilder + ?Sized>(
    args: &Args<'_, B>,
    columns: &[(&str, &str, &str)],
) -> RenderResult<Vec<Condition>> {
    let mut conditions = Vec::new();
    for (param, source, column) in columns {
        if let Some(value) = args.opt_text(param)? {
            conditions.push(sql::equal(source, column, value));
        }
    }
    Ok(conditions)
}

pub fn schemas<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let wh = filters(
        args,
        &[
            ("dbName", "t", "catalog_name"),
            ("dbSchema", "t", "schema_name"),
        ],
    )?;
    let query = SqlSelect::new()
        .add_field("t", "schema_name", Some(SCHEMA_NAME))
        .add_from_as("information_schema.schemata", "t")
        .set_where(sql::and(wh));
    b.get_select(&query)
}

pub fn tables<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let wh = filters(
        args,
        &[
            ("dbName", "t", "table_catalog"),
            ("dbSchema", "t", "table_schema"),
            ("table", "t", "table_name"),
        ],
    )?;
    let query = SqlSelect::new()
        .add_field("t", "table_name", Some(TBL_NAME))
        .add_field("t", "table_rows", Some(ROW_COUNT))
        .add_from_as("information_schema.tables", "t")
        .set_where(sql::and(wh));
    b.get_select(&query)
}

pub fn fields<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let wh = filters(
        args,
        &[
            ("dbName", "c", "table_catalog"),
            ("dbSchema", "c", "table_schema"),
            ("table", "c", "table_name"),
        ],
    )?;
    let query = SqlSelect::new()
        .add_field("c", "table_name", Some(TBL_NAME))
        .add_field("c", "column_name", Some(FLD_NAME))
        .add_field("c", "is_nullable", Some(FLD_NULL))
        .add_field("c", "data_type", Some(FLD_TYPE))
        .add_field("c", "character_maximum_length", Some(FLD_LENGTH))
        .add_field("c", "numeric_precision", Some(FLD_PRECISION))
        .add_field("c", "numeric_scale", Some(FLD_SCALE))
        .add_from_as("information_schema.columns", "c")
        .set_where(sql::and(wh))
        .add_order("c", "ordinal_position");
    b.get_select(&query)
}

/// `constraint_type` value of a key kind in `information_schema`
fn constraint_type(keyword: SqlKeyword) -> Option<&'static str> {
    match keyword {
        SqlKeyword::PrimaryKey => Some("PRIMARY KEY"),
        SqlKeyword::ForeignKey => Some("FOREIGN KEY"),
        SqlKeyword::Unique => Some("UNIQUE"),
        SqlKeyword::Check => Some("CHECK"),
        _ => None,
    }
}

/// OR of key-type filters; key kinds the mapping does not know are skipped
pub(crate) fn key_type_filter<B: SqlBuilder + ?Sized>(
    args: &Args<'_, B>,
    source: &str,
    column: &str,
    mapping: impl Fn(SqlKeyword) -> Option<&'static str>,
) -> RenderResult<Condition> {
    let types = args
        .keywords("keyTypes")?
        .into_iter()
        .filter_map(mapping)
        .map(|tp| sql::equal(source, column, tp));
    Ok(sql::or(types))
}

pub fn keys<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let mut wh = filters(
        args,
        &[
            ("dbName", "k", "constraint_catalog"),
            ("dbSchema", "k", "constraint_schema"),
            ("table", "k", "table_name"),
        ],
    )?;
    wh.push(key_type_filter(args, "k", "constraint_type", constraint_type)?);

    let query = SqlSelect::new()
        .add_field("k", "table_name", Some(TBL_NAME))
        .add_field("k", "constraint_name", Some(KEY_NAME))
        .add_field("k", "constraint_type", Some(KEY_TYPE))
        .add_from_as("information_schema.table_constraints", "k")
        .set_where(sql::and(wh));
    b.get_select(&query)
}

pub fn foreign_keys<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let wh = filters(
        args,
        &[
            ("dbName", "c", "constraint_catalog"),
            ("dbName", "t", "table_catalog"),
            ("dbSchema", "c", "constraint_schema"),
            ("dbSchema", "t", "table_schema"),
            ("table", "t", "table_name"),
            ("refTable", "r", "table_name"),
        ],
    )?;
    let query = SqlSelect::new()
        .add_field("t", "table_name", Some(TBL_NAME))
        .add_field("c", "constraint_name", Some(KEY_NAME))
        .add_field("r", "table_name", Some(FK_REF_TABLE))
        .add_from_as("information_schema.referential_constraints", "c")
        .add_from_inner(
            "information_schema.table_constraints",
            Some("t"),
            sql::join_using("c", "t", &["constraint_name"]),
        )
        .add_from_inner(
            "information_schema.table_constraints",
            Some("r"),
            sql::join("c", "unique_constraint_name", "r", "constraint_name"),
        )
        .set_where(sql::and(wh));
    b.get_select(&query)
}

pub fn triggers<B: SqlBuilder + ?Sized>(b: &B, args: &Args<'_, B>) -> RenderResult<String> {
    let wh = filters(
        args,
        &[
            ("dbName", "t", "trigger_catalog"),
            ("dbName", "t", "event_object_catalog"),
            ("dbSchema", "t", "trigger_schema"),
            ("dbSchema", "t", "event_object_schema"),
            ("table", "t", "event_object_table"),
        ],
    )?;
    let query = SqlSelect::new()
        .add_field("t", "event_object_table", Some(TBL_NAME))
        .add_field("t", "trigger_name", Some(TRIGGER_NAME))
        .add_from_as("information_schema.triggers", "t")
        .set_where(sql::and(wh));
    b.get_select(&query)
}
