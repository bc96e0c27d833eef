// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Statement IR
//!
//! This module contains the statement builders rendered by a dialect.
//!
//! ## Design
//!
//! Each statement is an accumulator with ordered clause lists, filled through
//! chained builder calls and handed once to a renderer:
//!
//! ```rust
//! use polysql_ir::{sql, SqlSelect};
//!
//! let query = SqlSelect::new()
//!     .add_fields("u", ["id", "name"])
//!     .add_from_as("users", "u")
//!     .set_where(sql::more_equal("u", "age", 30))
//!     .add_order("u", "name")
//!     .set_limit(10)
//!     .set_offset(20);
//!
//! assert!(!query.is_empty());
//! ```
//!
//! Shape is checked at two points:
//!
//! - Mutually exclusive clauses (INSERT values vs. data source, CREATE
//!   columns vs. data source) are rejected by the builder call that would
//!   combine them, with a panic naming the conflict
//! - Missing mandatory clauses (target, FROM) make [`is_empty`] true, and the
//!   renderer refuses to render an empty statement
//!
//! [`is_empty`]: SqlSelect::is_empty
//!
//! ## Statements
//!
//! ```sql
//! SELECT [DISTINCT] fields FROM sources [WHERE] [GROUP BY] [HAVING] [UNION] [ORDER BY]
//! INSERT INTO target (fields) VALUES (...) | SELECT ...
//! UPDATE target SET field=value, ... [FROM source] [WHERE]
//! DELETE FROM target WHERE ...
//! CREATE [TEMPORARY] TABLE target (columns) | AS SELECT ...
//! ```
//!
//! [`SqlCommand`] covers everything else: DDL and catalog introspection
//! expressed as a [`SqlKeyword`] plus its parameters.

use serde::{Deserialize, Serialize};

use crate::expr::{Condition, Expression, FromItem, FromSource, JoinType, Value};
use crate::metadata::{SqlDataType, SqlField};
use crate::params::{ParamValue, Params};
use crate::vocab::{SqlFunction, SqlKeyword};

/// Item in a SELECT projection list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Expression,
    pub alias: Option<String>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// Source alias; ignored when the select has unions
    pub source: Option<String>,
    pub field: String,
    pub direction: SortDirection,
}

/// SELECT statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlSelect {
    /// SELECT DISTINCT
    pub distinct: bool,

    /// Projection list; empty means `*`
    pub fields: Vec<SelectItem>,

    /// FROM list
    pub from: Vec<FromItem>,

    pub where_clause: Option<Condition>,
    pub group_by: Vec<Expression>,
    pub having: Option<Condition>,
    pub order_by: Vec<OrderBy>,

    /// Selects appended with UNION
    pub unions: Vec<SqlSelect>,

    /// UNION ALL instead of UNION
    pub union_all: bool,

    /// Maximum number of rows; 0 means unlimited
    pub limit: u64,

    /// Rows to skip; 0 means none
    pub offset: u64,
}

impl SqlSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(
        self,
        source: impl Into<String>,
        field: impl Into<String>,
        alias: Option<&str>,
    ) -> Self {
        self.add_item(Expression::field(source, field), alias)
    }

    pub fn add_fields<I, S>(mut self, source: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            self = self.add_item(Expression::field(source, field), None);
        }
        self
    }

    /// Adds `source.*`
    pub fn add_all_fields(self, source: impl Into<String>) -> Self {
        self.add_item(Expression::AllFields(Some(source.into())), None)
    }

    pub fn add_expr(self, expr: Expression, alias: Option<&str>) -> Self {
        self.add_item(expr, alias)
    }

    pub fn add_constant(self, value: impl Into<Value>, alias: &str) -> Self {
        self.add_item(Expression::constant(value), Some(alias))
    }

    pub fn add_aggregate(
        self,
        function: SqlFunction,
        expr: Expression,
        alias: Option<&str>,
    ) -> Self {
        let params = Params::new().with("expression", expr);
        self.add_item(Expression::function(function, params), alias)
    }

    pub fn add_sum(self, source: &str, field: &str, alias: Option<&str>) -> Self {
        self.add_aggregate(SqlFunction::Sum, Expression::field(source, field), alias)
    }

    pub fn add_min(self, source: &str, field: &str, alias: Option<&str>) -> Self {
        self.add_aggregate(SqlFunction::Min, Expression::field(source, field), alias)
    }

    pub fn add_max(self, source: &str, field: &str, alias: Option<&str>) -> Self {
        self.add_aggregate(SqlFunction::Max, Expression::field(source, field), alias)
    }

    /// Adds `COUNT(*)`
    pub fn add_count(self, alias: Option<&str>) -> Self {
        self.add_item(Expression::function(SqlFunction::Count, Params::new()), alias)
    }

    fn add_item(mut self, expr: Expression, alias: Option<&str>) -> Self {
        self.fields.push(SelectItem {
            expr,
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn add_from(self, table: impl Into<String>) -> Self {
        self.add_source(FromSource::table(table))
    }

    pub fn add_from_as(self, table: impl Into<String>, alias: impl Into<String>) -> Self {
        self.add_source(FromSource::aliased(table, alias))
    }

    pub fn add_from_query(self, query: SqlSelect, alias: impl Into<String>) -> Self {
        self.add_source(FromSource::query(query, alias))
    }

    pub fn add_source(mut self, source: FromSource) -> Self {
        self.from.push(FromItem::Source(source));
        self
    }

    pub fn add_from_inner(self, table: &str, alias: Option<&str>, on: Condition) -> Self {
        self.add_join(JoinType::Inner, table_source(table, alias), on)
    }

    pub fn add_from_left(self, table: &str, alias: Option<&str>, on: Condition) -> Self {
        self.add_join(JoinType::Left, table_source(table, alias), on)
    }

    pub fn add_from_right(self, table: &str, alias: Option<&str>, on: Condition) -> Self {
        self.add_join(JoinType::Right, table_source(table, alias), on)
    }

    pub fn add_from_full(self, table: &str, alias: Option<&str>, on: Condition) -> Self {
        self.add_join(JoinType::Full, table_source(table, alias), on)
    }

    pub fn add_join(mut self, join_type: JoinType, source: FromSource, on: Condition) -> Self {
        self.from.push(FromItem::Join {
            join_type,
            source,
            on,
        });
        self
    }

    /// Replaces the WHERE condition; `None` clears it
    pub fn set_where(mut self, condition: impl Into<Option<Condition>>) -> Self {
        self.where_clause = condition.into();
        self
    }

    /// ANDs a condition onto the existing WHERE clause
    pub fn and_where(mut self, condition: Condition) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => Condition::And(vec![existing, condition]),
            None => condition,
        });
        self
    }

    pub fn add_group(mut self, source: &str, field: &str) -> Self {
        self.group_by.push(Expression::field(source, field));
        self
    }

    pub fn add_group_expr(mut self, expr: Expression) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn set_having(mut self, condition: impl Into<Option<Condition>>) -> Self {
        self.having = condition.into();
        self
    }

    pub fn add_order(self, source: &str, field: &str) -> Self {
        self.push_order(Some(source), field, SortDirection::Asc)
    }

    pub fn add_order_desc(self, source: &str, field: &str) -> Self {
        self.push_order(Some(source), field, SortDirection::Desc)
    }

    /// Orders by a bare column name or output alias
    pub fn add_order_name(self, field: &str, direction: SortDirection) -> Self {
        self.push_order(None, field, direction)
    }

    fn push_order(mut self, source: Option<&str>, field: &str, direction: SortDirection) -> Self {
        self.order_by.push(OrderBy {
            source: source.filter(|s| !s.is_empty()).map(str::to_string),
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn add_union(mut self, query: SqlSelect) -> Self {
        self.unions.push(query);
        self
    }

    pub fn set_union_all_mode(mut self, union_all: bool) -> Self {
        self.union_all = union_all;
        self
    }

    pub fn set_distinct_mode(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn set_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn set_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn has_union(&self) -> bool {
        !self.unions.is_empty()
    }

    /// A select without any FROM source cannot be rendered
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }
}

fn table_source(table: &str, alias: Option<&str>) -> FromSource {
    match alias {
        Some(alias) => FromSource::aliased(table, alias),
        None => FromSource::table(table),
    }
}

/// INSERT statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlInsert {
    pub target: String,
    pub fields: Vec<String>,
    pub values: Vec<Expression>,
    pub data_source: Option<Box<SqlSelect>>,
}

impl SqlInsert {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Adds a field with a literal value
    ///
    /// # Panics
    ///
    /// Panics when a data source is already set.
    pub fn add_constant(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_expression(field, Expression::constant(value))
    }

    /// Adds a field with an expression value
    ///
    /// # Panics
    ///
    /// Panics when a data source is already set.
    pub fn add_expression(mut self, field: impl Into<String>, value: Expression) -> Self {
        assert!(
            self.data_source.is_none(),
            "INSERT INTO {}: explicit values cannot be combined with a data source",
            self.target
        );
        self.fields.push(field.into());
        self.values.push(value);
        self
    }

    /// Adds target fields filled positionally by the data source
    pub fn add_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Inserts the rows produced by a select
    ///
    /// # Panics
    ///
    /// Panics when explicit values were already added.
    pub fn set_data_source(mut self, query: SqlSelect) -> Self {
        assert!(
            self.values.is_empty(),
            "INSERT INTO {}: a data source cannot be combined with explicit values",
            self.target
        );
        self.data_source = Some(Box::new(query));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
            || self.fields.is_empty()
            || (self.values.is_empty() && self.data_source.is_none())
    }

    /// Explicit values and a data source set together, which no engine can render
    pub fn has_mixed_sources(&self) -> bool {
        !self.values.is_empty() && self.data_source.is_some()
    }
}

/// Correlated source of an UPDATE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFrom {
    pub source: FromSource,
    pub join: Condition,
}

/// UPDATE statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlUpdate {
    pub target: String,
    pub alias: Option<String>,
    /// Assignments in insertion order; re-assigning a field replaces its value
    pub assignments: Vec<(String, Expression)>,
    pub where_clause: Option<Condition>,
    pub from: Option<UpdateFrom>,
}

impl SqlUpdate {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn add_constant(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_expression(field, Expression::constant(value))
    }

    pub fn add_expression(mut self, field: impl Into<String>, value: Expression) -> Self {
        let field = field.into();
        match self.assignments.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.assignments.push((field, value)),
        }
        self
    }

    pub fn set_where(mut self, condition: impl Into<Option<Condition>>) -> Self {
        self.where_clause = condition.into();
        self
    }

    /// Correlates the update with another source joined by `join`
    pub fn set_from(mut self, source: FromSource, join: Condition) -> Self {
        self.from = Some(UpdateFrom { source, join });
        self
    }

    pub fn set_from_table(self, table: &str, alias: Option<&str>, join: Condition) -> Self {
        self.set_from(table_source(table, alias), join)
    }

    pub fn set_from_query(self, query: SqlSelect, alias: &str, join: Condition) -> Self {
        self.set_from(FromSource::query(query, alias), join)
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty() || self.assignments.is_empty()
    }
}

/// DELETE statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlDelete {
    pub target: String,
    pub alias: Option<String>,
    pub where_clause: Option<Condition>,
}

impl SqlDelete {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn set_where(mut self, condition: impl Into<Option<Condition>>) -> Self {
        self.where_clause = condition.into();
        self
    }

    /// Deleting without a WHERE condition is never rendered
    pub fn is_empty(&self) -> bool {
        self.target.is_empty() || self.where_clause.as_ref().is_none_or(Condition::is_empty)
    }
}

/// CREATE TABLE statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SqlCreate {
    pub target: String,
    pub temporary: bool,
    pub fields: Vec<SqlField>,
    pub data_source: Option<Box<SqlSelect>>,
}

impl SqlCreate {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    /// Adds a column definition
    ///
    /// # Panics
    ///
    /// Panics when a data source is already set.
    pub fn add_field(mut self, field: SqlField) -> Self {
        assert!(
            self.data_source.is_none(),
            "CREATE TABLE {}: column definitions cannot be combined with a data source",
            self.target
        );
        self.fields.push(field);
        self
    }

    pub fn add_boolean(self, name: &str, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::Boolean, 0, 0, not_null)
    }

    pub fn add_integer(self, name: &str, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::Integer, 0, 0, not_null)
    }

    pub fn add_long(self, name: &str, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::Long, 0, 0, not_null)
    }

    pub fn add_decimal(self, name: &str, precision: u32, scale: u32, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::Decimal, precision, scale, not_null)
    }

    pub fn add_string(self, name: &str, precision: u32, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::String, precision, 0, not_null)
    }

    pub fn add_text(self, name: &str, not_null: bool) -> Self {
        self.add_typed(name, SqlDataType::Text, 0, 0, not_null)
    }

    fn add_typed(
        self,
        name: &str,
        data_type: SqlDataType,
        precision: u32,
        scale: u32,
        not_null: bool,
    ) -> Self {
        let mut field = SqlField::new(name, data_type)
            .with_precision(precision)
            .with_scale(scale);
        field.not_null = not_null;
        self.add_field(field)
    }

    /// Creates the table from the rows of a select
    ///
    /// # Panics
    ///
    /// Panics when column definitions were already added.
    pub fn set_data_source(mut self, query: SqlSelect) -> Self {
        assert!(
            self.fields.is_empty(),
            "CREATE TABLE {}: a data source cannot be combined with column definitions",
            self.target
        );
        self.data_source = Some(Box::new(query));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty() || (self.fields.is_empty() && self.data_source.is_none())
    }

    /// Column definitions and a data source set together
    pub fn has_mixed_sources(&self) -> bool {
        !self.fields.is_empty() && self.data_source.is_some()
    }
}

/// Keyword-driven command (DDL, catalog introspection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlCommand {
    pub keyword: SqlKeyword,
    pub params: Params,
}

impl SqlCommand {
    pub fn new(keyword: SqlKeyword) -> Self {
        Self {
            keyword,
            params: Params::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn with_opt<V: Into<ParamValue>>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.params.insert(name, value);
        }
        self
    }
}

/// Any renderable statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "statement", rename_all = "lowercase")]
pub enum SqlQuery {
    Select(SqlSelect),
    Insert(SqlInsert),
    Update(SqlUpdate),
    Delete(SqlDelete),
    Create(SqlCreate),
    Command(SqlCommand),
}

impl SqlQuery {
    /// Statement keyword, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SqlQuery::Select(_) => "SELECT",
            SqlQuery::Insert(_) => "INSERT",
            SqlQuery::Update(_) => "UPDATE",
            SqlQuery::Delete(_) => "DELETE",
            SqlQuery::Create(_) => "CREATE",
            SqlQuery::Command(_) => "COMMAND",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SqlQuery::Select(q) => q.is_empty(),
            SqlQuery::Insert(q) => q.is_empty(),
            SqlQuery::Update(q) => q.is_empty(),
            SqlQuery::Delete(q) => q.is_empty(),
            SqlQuery::Create(q) => q.is_empty(),
            SqlQuery::Command(_) => false,
        }
    }
}

impl From<SqlSelect> for SqlQuery {
    fn from(query: SqlSelect) -> Self {
        SqlQuery::Select(query)
    }
}

impl From<SqlInsert> for SqlQuery {
    fn from(query: SqlInsert) -> Self {
        SqlQuery::Insert(query)
    }
}

impl From<SqlUpdate> for SqlQuery {
    fn from(query: SqlUpdate) -> Self {
        SqlQuery::Update(query)
    }
}

impl From<SqlDelete> for SqlQuery {
    fn from(query: SqlDelete) -> Self {
        SqlQuery::Delete(query)
    }
}

impl From<SqlCreate> for SqlQuery {
    fn from(query: SqlCreate) -> Self {
        SqlQuery::Create(query)
    }
}

impl From<SqlCommand> for SqlQuery {
    fn from(command: SqlCommand) -> Self {
        SqlQuery::Command(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Operator;

    fn age_filter() -> Condition {
        Condition::compare(
            Operator::Ge,
            Expression::name("age"),
            Expression::constant(30),
        )
    }

    #[test]
    fn test_select_without_from_is_empty() {
        assert!(SqlSelect::new().add_fields("t", ["id"]).is_empty());
        assert!(!SqlSelect::new().add_from("t").is_empty());
    }

    #[test]
    fn test_and_where_accumulates() {
        let query = SqlSelect::new()
            .add_from("t")
            .and_where(age_filter())
            .and_where(age_filter());
        assert!(matches!(query.where_clause, Some(Condition::And(ref c)) if c.len() == 2));
    }

    #[test]
    fn test_empty_order_source_is_dropped() {
        let query = SqlSelect::new().add_from("t").add_order("", "name");
        assert_eq!(query.order_by[0].source, None);
    }

    #[test]
    fn test_update_reassignment_keeps_position() {
        let update = SqlUpdate::new("t")
            .add_constant("a", 1)
            .add_constant("b", 2)
            .add_constant("a", 3);
        assert_eq!(update.assignments.len(), 2);
        assert_eq!(update.assignments[0].0, "a");
        assert_eq!(update.assignments[0].1, Expression::constant(3));
    }

    #[test]
    fn test_delete_requires_where() {
        assert!(SqlDelete::new("t").is_empty());
        assert!(SqlDelete::new("t").set_where(Condition::all()).is_empty());
        assert!(!SqlDelete::new("t").set_where(age_filter()).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot be combined with column definitions")]
    fn test_create_rejects_source_after_fields() {
        let _ = SqlCreate::new("t")
            .add_integer("id", true)
            .set_data_source(SqlSelect::new().add_from("s"));
    }

    #[test]
    fn test_query_kind() {
        let query: SqlQuery = SqlDelete::new("t").into();
        assert_eq!(query.kind(), "DELETE");
        assert!(query.is_empty());
    }
}
