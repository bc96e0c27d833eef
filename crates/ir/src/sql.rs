// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Helper constructors
//!
//! Short-hand constructors for the nodes calling code builds most often:
//! field references, comparisons, joins, function calls, DDL commands and
//! catalog introspection commands.
//!
//! ```rust
//! use polysql_ir::{sql, SqlSelect};
//!
//! let query = SqlSelect::new()
//!     .add_fields("o", ["id", "total"])
//!     .add_from_as("orders", "o")
//!     .add_from_inner("customers", Some("c"), sql::join("o", "customer_id", "c", "id"))
//!     .set_where(sql::and([
//!         Some(sql::equal("c", "country", "LT")),
//!         None,
//!         Some(sql::not_null("o", "shipped")),
//!     ]));
//! assert!(!query.is_empty());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::expr::{Condition, Expression, Value};
use crate::metadata::SqlDataType;
use crate::params::Params;
use crate::query::{SqlCommand, SqlSelect};
use crate::trigger::TriggerSpec;
use crate::vocab::{Operator, SqlFunction, SqlKeyword};

static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns an identifier never returned before in this process
///
/// Used for synthetic aliases that must not collide with caller-chosen names.
pub fn unique_name() -> String {
    let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("uq_{n}")
}

// ============================================================================
// Expressions
// ============================================================================

pub fn field(source: impl Into<String>, name: impl Into<String>) -> Expression {
    Expression::field(source, name)
}

pub fn name(name: impl Into<String>) -> Expression {
    Expression::name(name)
}

pub fn constant(value: impl Into<Value>) -> Expression {
    Expression::constant(value)
}

/// Raw SQL fragment, inserted verbatim
pub fn expression(sql: impl Into<String>) -> Expression {
    Expression::raw(sql)
}

// ============================================================================
// Conditions
// ============================================================================

pub fn compare(expression: Expression, operator: Operator, value: Expression) -> Condition {
    Condition::compare(operator, expression, value)
}

pub fn equal(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Eq, value)
}

pub fn not_equal(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Ne, value)
}

pub fn less(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Lt, value)
}

pub fn less_equal(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Le, value)
}

pub fn more(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Gt, value)
}

pub fn more_equal(source: &str, field: &str, value: impl Into<Value>) -> Condition {
    compare_field(source, field, Operator::Ge, value)
}

fn compare_field(source: &str, field: &str, operator: Operator, value: impl Into<Value>) -> Condition {
    Condition::compare(operator, field_or_name(source, field), Expression::constant(value))
}

fn field_or_name(source: &str, field: &str) -> Expression {
    if source.is_empty() {
        Expression::name(field)
    } else {
        Expression::field(source, field)
    }
}

pub fn is_null(source: &str, field: &str) -> Condition {
    Condition::unary(Operator::IsNull, field_or_name(source, field))
}

pub fn not_null(source: &str, field: &str) -> Condition {
    Condition::unary(Operator::NotNull, field_or_name(source, field))
}

pub fn starts_with(expression: Expression, value: &str) -> Condition {
    Condition::compare(Operator::Starts, expression, Expression::constant(value))
}

pub fn ends_with(expression: Expression, value: &str) -> Condition {
    Condition::compare(Operator::Ends, expression, Expression::constant(value))
}

pub fn contains(expression: Expression, value: &str) -> Condition {
    Condition::compare(Operator::Contains, expression, Expression::constant(value))
}

/// Wildcard match with `*` for any run and `?` for one character
pub fn matches(expression: Expression, pattern: &str) -> Condition {
    Condition::compare(Operator::Matches, expression, Expression::constant(pattern))
}

/// Membership test; an empty list never matches and renders as `1 = 0`
pub fn in_list<I, V>(expression: Expression, values: I) -> Condition
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let values = values.into_iter().map(Expression::constant).collect();
    Condition::compare(Operator::In, expression, Expression::List(values))
}

pub fn in_query(expression: Expression, query: SqlSelect) -> Condition {
    Condition::compare(Operator::In, expression, Expression::from(query))
}

/// Equality of two source-qualified fields
pub fn join(source: &str, field: &str, ref_source: &str, ref_field: &str) -> Condition {
    Condition::compare(
        Operator::Eq,
        Expression::field(source, field),
        Expression::field(ref_source, ref_field),
    )
}

/// Equality of identically named fields of two sources
pub fn join_using(source: &str, ref_source: &str, fields: &[&str]) -> Condition {
    and(fields.iter().map(|f| join(source, f, ref_source, f)))
}

/// AND of the present children
pub fn and<I, C>(conditions: I) -> Condition
where
    I: IntoIterator<Item = C>,
    C: Into<Option<Condition>>,
{
    Condition::And(conditions.into_iter().filter_map(Into::into).collect())
}

/// OR of the present children
pub fn or<I, C>(conditions: I) -> Condition
where
    I: IntoIterator<Item = C>,
    C: Into<Option<Condition>>,
{
    Condition::Or(conditions.into_iter().filter_map(Into::into).collect())
}

pub fn not(condition: Condition) -> Condition {
    Condition::Not(Box::new(condition))
}

// ============================================================================
// Functions
// ============================================================================

pub fn sql_if(condition: Condition, then: Expression, otherwise: Expression) -> Expression {
    let params = Params::new()
        .with("condition", condition)
        .with("ifTrue", then)
        .with("ifFalse", otherwise);
    Expression::function(SqlFunction::If, params)
}

pub fn sql_case(
    expression: Expression,
    arms: impl IntoIterator<Item = (Expression, Expression)>,
    otherwise: Option<Expression>,
) -> Expression {
    let mut params = Params::new().with("expression", expression);
    for (i, (case, value)) in arms.into_iter().enumerate() {
        params.insert(format!("case{i}"), case);
        params.insert(format!("value{i}"), value);
    }
    let params = params.with_opt("caseElse", otherwise);
    Expression::function(SqlFunction::Case, params)
}

pub fn cast(expression: Expression, data_type: SqlDataType, precision: u32, scale: u32) -> Expression {
    let params = Params::new()
        .with("expression", expression)
        .with("type", data_type)
        .with("precision", precision)
        .with("scale", scale);
    Expression::function(SqlFunction::Cast, params)
}

pub fn bit_and(expression: Expression, value: impl Into<Value>) -> Expression {
    let params = Params::new()
        .with("expression", expression)
        .with("value", Expression::constant(value));
    Expression::function(SqlFunction::BitAnd, params)
}

pub fn aggregate(function: SqlFunction, expression: Expression) -> Expression {
    Expression::function(function, Params::new().with("expression", expression))
}

pub fn count_all() -> Expression {
    Expression::function(SqlFunction::Count, Params::new())
}

pub fn length(expression: Expression) -> Expression {
    Expression::function(SqlFunction::Length, Params::new().with("expression", expression))
}

pub fn substring(expression: Expression, pos: i64, len: Option<i64>) -> Expression {
    let params = Params::new()
        .with("expression", expression)
        .with("pos", pos)
        .with_opt("len", len);
    Expression::function(SqlFunction::Substring, params)
}

pub fn left(expression: Expression, len: i64) -> Expression {
    let params = Params::new().with("expression", expression).with("len", len);
    Expression::function(SqlFunction::Left, params)
}

pub fn right(expression: Expression, len: i64) -> Expression {
    let params = Params::new().with("expression", expression).with("len", len);
    Expression::function(SqlFunction::Right, params)
}

fn variadic(function: SqlFunction, members: impl IntoIterator<Item = Expression>) -> Expression {
    Expression::function(function, Params::new().with_members(members))
}

pub fn concat(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Concat, members)
}

pub fn nvl(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Nvl, members)
}

pub fn plus(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Plus, members)
}

pub fn minus(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Minus, members)
}

pub fn multiply(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Multiply, members)
}

pub fn divide(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Divide, members)
}

/// Concatenation of raw fragments with no separator
pub fn bulk(members: impl IntoIterator<Item = Expression>) -> Expression {
    variadic(SqlFunction::Bulk, members)
}

// ============================================================================
// DDL commands
// ============================================================================

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

pub fn create_schema(schema: &str) -> SqlCommand {
    SqlCommand::new(SqlKeyword::CreateSchema).with("schema", schema)
}

/// `CREATE [UNIQUE] INDEX`; an empty field list indexes the column named like the index
pub fn create_index(table: &str, name: &str, fields: &[&str], unique: bool) -> SqlCommand {
    SqlCommand::new(SqlKeyword::CreateIndex)
        .with("table", table)
        .with("name", name)
        .with("fields", names(fields))
        .with("isUnique", unique)
}

fn add_constraint(table: &str, name: &str, kind: SqlKeyword) -> SqlCommand {
    SqlCommand::new(SqlKeyword::AddConstraint)
        .with("table", table)
        .with("name", name)
        .with("type", kind)
}

pub fn create_primary_key(table: &str, name: &str, fields: &[&str]) -> SqlCommand {
    add_constraint(table, name, SqlKeyword::PrimaryKey).with("fields", names(fields))
}

/// Foreign key; `cascade` is [`SqlKeyword::Delete`] or [`SqlKeyword::SetNull`]
pub fn create_foreign_key(
    table: &str,
    name: &str,
    field: &str,
    ref_table: &str,
    ref_field: &str,
    cascade: Option<SqlKeyword>,
) -> SqlCommand {
    add_constraint(table, name, SqlKeyword::ForeignKey)
        .with("fields", names(&[field]))
        .with("refTable", ref_table)
        .with("refFields", names(&[ref_field]))
        .with_opt("cascade", cascade)
}

pub fn create_unique(table: &str, name: &str, fields: &[&str]) -> SqlCommand {
    add_constraint(table, name, SqlKeyword::Unique).with("fields", names(fields))
}

pub fn create_check(table: &str, name: &str, condition: Condition) -> SqlCommand {
    add_constraint(table, name, SqlKeyword::Check).with("expression", condition)
}

pub fn create_trigger(name: &str, table: &str, trigger: TriggerSpec) -> SqlCommand {
    SqlCommand::new(SqlKeyword::CreateTrigger)
        .with("name", name)
        .with("table", table)
        .with("trigger", trigger)
}

pub fn drop_table(table: &str) -> SqlCommand {
    SqlCommand::new(SqlKeyword::DropTable).with("table", table)
}

pub fn drop_foreign_key(table: &str, name: &str) -> SqlCommand {
    SqlCommand::new(SqlKeyword::DropForeignKey)
        .with("table", table)
        .with("name", name)
}

pub fn rename_table(from: &str, to: &str) -> SqlCommand {
    SqlCommand::new(SqlKeyword::RenameTable)
        .with("nameFrom", from)
        .with("nameTo", to)
}

pub fn set_parameter(name: &str, value: impl Into<Value>) -> SqlCommand {
    let value: Value = value.into();
    SqlCommand::new(SqlKeyword::SetParameter)
        .with("prmName", name)
        .with("prmValue", value)
}

/// Engine-specific name of a temporary table
pub fn temporary_name(name: &str) -> SqlCommand {
    SqlCommand::new(SqlKeyword::TemporaryName).with("name", name)
}

// ============================================================================
// Catalog introspection
// ============================================================================

pub fn db_name() -> SqlCommand {
    SqlCommand::new(SqlKeyword::DbName)
}

pub fn db_schema() -> SqlCommand {
    SqlCommand::new(SqlKeyword::DbSchema)
}

fn catalog(keyword: SqlKeyword, db_name: Option<&str>, db_schema: Option<&str>) -> SqlCommand {
    SqlCommand::new(keyword)
        .with_opt("dbName", db_name)
        .with_opt("dbSchema", db_schema)
}

pub fn db_schemas(db_name: Option<&str>, schema: Option<&str>) -> SqlCommand {
    catalog(SqlKeyword::DbSchemas, db_name, schema)
}

pub fn db_tables(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
    catalog(SqlKeyword::DbTables, db_name, db_schema).with_opt("table", table)
}

pub fn db_fields(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
    catalog(SqlKeyword::DbFields, db_name, db_schema).with_opt("table", table)
}

/// Keys of the given kinds ([`SqlKeyword::PrimaryKey`], [`SqlKeyword::ForeignKey`], [`SqlKeyword::Unique`])
pub fn db_keys(
    db_name: Option<&str>,
    db_schema: Option<&str>,
    table: Option<&str>,
    key_types: &[SqlKeyword],
) -> SqlCommand {
    catalog(SqlKeyword::DbKeys, db_name, db_schema)
        .with_opt("table", table)
        .with("keyTypes", key_types.to_vec())
}

pub fn db_foreign_keys(
    db_name: Option<&str>,
    db_schema: Option<&str>,
    table: Option<&str>,
    ref_table: Option<&str>,
) -> SqlCommand {
    catalog(SqlKeyword::DbForeignKeys, db_name, db_schema)
        .with_opt("table", table)
        .with_opt("refTable", ref_table)
}

pub fn db_indexes(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
    catalog(SqlKeyword::DbIndexes, db_name, db_schema).with_opt("table", table)
}

pub fn db_triggers(db_name: Option<&str>, db_schema: Option<&str>, table: Option<&str>) -> SqlCommand {
    catalog(SqlKeyword::DbTriggers, db_name, db_schema).with_opt("table", table)
}
