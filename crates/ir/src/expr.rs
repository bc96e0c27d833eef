// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Expressions, Conditions and Sources
//!
//! This module holds the dialect-agnostic AST that statements are built from.
//!
//! ## Design
//!
//! Three node families make up the tree:
//!
//! - [`Expression`]: value-producing nodes (field references, literal
//!   constants, function calls, sub-selects, raw fragments)
//! - [`Condition`]: boolean predicate trees (comparisons plus AND/OR/NOT)
//! - [`FromItem`]: FROM-clause sources (tables, aliased sub-selects, joins)
//!
//! Nodes carry no rendering logic. A dialect renderer walks them and decides
//! every piece of syntax, so the same tree renders differently per engine:
//!
//! ```sql
//! -- generic
//! t.name LIKE 'Ab|_c%' ESCAPE '|'
//! -- SQL Server
//! [t].[name] LIKE 'Ab|_c%' ESCAPE '|'
//! ```
//!
//! ## Compound conditions
//!
//! [`Condition::And`] and [`Condition::Or`] may hold any number of children,
//! including none. An empty compound is the absorbing element and renders as
//! empty text; nested children of the same kind are flattened on render.

use serde::{Deserialize, Serialize};

use crate::params::Params;
use crate::query::SqlSelect;
use crate::vocab::{Operator, SqlFunction};

/// Literal values inlined into rendered SQL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns the text payload, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Value-producing AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Source-qualified field reference (`source.name`)
    Field { source: String, name: String },

    /// Bare (possibly dotted) identifier
    Name(String),

    /// `*` or `source.*`
    AllFields(Option<String>),

    /// Literal constant
    Constant(Value),

    /// Portable function call, resolved by the dialect
    Function {
        function: SqlFunction,
        params: Params,
    },

    /// Sub-select used as a value; always rendered parenthesized
    Query(Box<SqlSelect>),

    /// Parenthesized list of values (IN operand)
    List(Vec<Expression>),

    /// Raw SQL fragment inserted verbatim
    Raw(String),
}

impl Expression {
    pub fn field(source: impl Into<String>, name: impl Into<String>) -> Self {
        Expression::Field {
            source: source.into(),
            name: name.into(),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Expression::Name(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    pub fn function(function: SqlFunction, params: Params) -> Self {
        Expression::Function { function, params }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expression::Raw(sql.into())
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Constant(value)
    }
}

impl From<SqlSelect> for Expression {
    fn from(query: SqlSelect) -> Self {
        Expression::Query(Box::new(query))
    }
}

/// Boolean predicate tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Leaf comparison; `value` is absent for IS NULL / IS NOT NULL
    Comparison {
        operator: Operator,
        expression: Expression,
        value: Option<Expression>,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    pub fn compare(operator: Operator, expression: Expression, value: Expression) -> Self {
        Condition::Comparison {
            operator,
            expression,
            value: Some(value),
        }
    }

    pub fn unary(operator: Operator, expression: Expression) -> Self {
        Condition::Comparison {
            operator,
            expression,
            value: None,
        }
    }

    /// Empty AND compound, to be filled with [`Condition::push`]
    pub fn all() -> Self {
        Condition::And(Vec::new())
    }

    /// Empty OR compound, to be filled with [`Condition::push`]
    pub fn any() -> Self {
        Condition::Or(Vec::new())
    }

    /// Appends a child to a compound condition.
    ///
    /// On a leaf or NOT node the receiver becomes the first child of a new
    /// AND compound.
    pub fn push(self, child: Condition) -> Self {
        match self {
            Condition::And(mut children) => {
                children.push(child);
                Condition::And(children)
            }
            Condition::Or(mut children) => {
                children.push(child);
                Condition::Or(children)
            }
            other => Condition::And(vec![other, child]),
        }
    }

    /// Whether this node is a compound with no children at any depth
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::And(children) | Condition::Or(children) => {
                children.iter().all(Condition::is_empty)
            }
            Condition::Not(inner) => inner.is_empty(),
            Condition::Comparison { .. } => false,
        }
    }
}

/// Join kinds supported in FROM lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
        }
    }
}

/// A single source a FROM item reads from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromSource {
    Table { name: String, alias: Option<String> },
    Query { query: Box<SqlSelect>, alias: String },
}

impl FromSource {
    pub fn table(name: impl Into<String>) -> Self {
        FromSource::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        FromSource::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn query(query: SqlSelect, alias: impl Into<String>) -> Self {
        FromSource::Query {
            query: Box::new(query),
            alias: alias.into(),
        }
    }
}

/// Entry of a FROM list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromItem {
    /// Plain source; subsequent plain sources are comma-separated
    Source(FromSource),

    /// Joined source with its own predicate
    Join {
        join_type: JoinType,
        source: FromSource,
        on: Condition,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("x"), Value::Text("x".to_string()));
        assert_eq!(Value::from(5), Value::Int(5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(true)), Value::Bool(true));
    }

    #[test]
    fn test_condition_push_builds_compound() {
        let a = Condition::unary(Operator::IsNull, Expression::name("a"));
        let b = Condition::unary(Operator::NotNull, Expression::name("b"));

        match a.clone().push(b.clone()) {
            Condition::And(children) => assert_eq!(children, vec![a.clone(), b.clone()]),
            other => panic!("Expected AND compound, got {:?}", other),
        }

        match Condition::any().push(a.clone()) {
            Condition::Or(children) => assert_eq!(children.len(), 1),
            other => panic!("Expected OR compound, got {:?}", other),
        }
    }

    #[test]
    fn test_condition_is_empty() {
        assert!(Condition::all().is_empty());
        assert!(Condition::And(vec![Condition::any(), Condition::all()]).is_empty());
        assert!(
            !Condition::all()
                .push(Condition::unary(Operator::IsNull, Expression::name("a")))
                .is_empty()
        );
    }
}
