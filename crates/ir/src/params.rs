// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Parameter maps
//!
//! Function calls and keyword commands carry their operands in a named
//! parameter map rather than in per-operation structs, so that every dialect
//! reads the same operand names for the same operation.
//!
//! ## Naming conventions
//!
//! - Variadic operands are positional: `member0`, `member1`, ...
//! - CASE arms are `case0`/`value0`, `case1`/`value1`, ... with `expression`
//!   and an optional `caseElse`
//! - Identifier parameters (`table`, `name`, `fields`, ...) hold raw names;
//!   the consuming hook quotes them
//!
//! Values may be unrendered AST nodes; the renderer resolves them lazily when
//! a hook reads them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expr::{Condition, Expression, Value};
use crate::metadata::SqlDataType;
use crate::query::SqlSelect;
use crate::trigger::TriggerSpec;
use crate::vocab::SqlKeyword;

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Already rendered SQL, used verbatim
    Sql(String),
    /// Literal constant or raw name
    Value(Value),
    /// List of raw identifier names
    Names(Vec<String>),
    Keyword(SqlKeyword),
    Keywords(Vec<SqlKeyword>),
    DataType(SqlDataType),
    Expression(Expression),
    Condition(Condition),
    Query(Box<SqlSelect>),
    Trigger(Box<TriggerSpec>),
}

impl From<Expression> for ParamValue {
    fn from(value: Expression) -> Self {
        ParamValue::Expression(value)
    }
}

impl From<Condition> for ParamValue {
    fn from(value: Condition) -> Self {
        ParamValue::Condition(value)
    }
}

impl From<SqlSelect> for ParamValue {
    fn from(value: SqlSelect) -> Self {
        ParamValue::Query(Box::new(value))
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Value(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Value(Value::Text(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Value(Value::Bool(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Value(Value::Int(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Value(Value::from(value))
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::Names(value)
    }
}

impl From<SqlKeyword> for ParamValue {
    fn from(value: SqlKeyword) -> Self {
        ParamValue::Keyword(value)
    }
}

impl From<Vec<SqlKeyword>> for ParamValue {
    fn from(value: Vec<SqlKeyword>) -> Self {
        ParamValue::Keywords(value)
    }
}

impl From<SqlDataType> for ParamValue {
    fn from(value: SqlDataType) -> Self {
        ParamValue::DataType(value)
    }
}

impl From<TriggerSpec> for ParamValue {
    fn from(value: TriggerSpec) -> Self {
        ParamValue::Trigger(Box::new(value))
    }
}

/// Named operands of a function call or keyword command
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value under the same name
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a parameter only when a value is present
    pub fn with_opt<V: Into<ParamValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Appends positional `memberN` parameters after the existing ones
    pub fn with_members<I, V>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        let start = self.member_count();
        for (i, member) in members.into_iter().enumerate() {
            self.insert(member_key(start + i), member);
        }
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of consecutive `memberN` parameters starting at `member0`
    pub fn member_count(&self) -> usize {
        (0..).take_while(|i| self.0.contains_key(&member_key(*i))).count()
    }

    /// Number of consecutive `caseN` arms starting at `case0`
    pub fn case_count(&self) -> usize {
        (0..)
            .take_while(|i| self.0.contains_key(&format!("case{i}")))
            .count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Name of the positional parameter at `index`
pub fn member_key(index: usize) -> String {
    format!("member{index}")
}
