// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Typed access to function and keyword parameters
//!
//! Hooks receive a [`Params`] map whose values may still be unrendered AST
//! nodes. [`Args`] resolves them on demand with the calling builder and turns
//! missing or mistyped parameters into [`RenderError`]s naming the operation.

use std::fmt::Display;

use polysql_ir::params::member_key;
use polysql_ir::{ParamValue, Params, SqlDataType, SqlKeyword, TriggerSpec, Value};

use crate::render::{Render, quote_name};
use crate::{RenderError, RenderResult, SqlBuilder};

pub struct Args<'a, B: SqlBuilder + ?Sized> {
    builder: &'a B,
    params: &'a Params,
    context: String,
}

impl<'a, B: SqlBuilder + ?Sized> Args<'a, B> {
    /// Wraps `params` for the operation named by `context`
    pub fn new(builder: &'a B, params: &'a Params, context: impl Display) -> Self {
        Self {
            builder,
            params,
            context: context.to_string(),
        }
    }

    pub fn params(&self) -> &'a Params {
        self.params
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains(name)
    }

    fn get(&self, name: &str) -> RenderResult<&'a ParamValue> {
        self.params
            .get(name)
            .ok_or_else(|| RenderError::MissingParameter {
                name: name.to_string(),
                context: self.context.clone(),
            })
    }

    fn unexpected(&self, name: &str, expected: &str) -> RenderError {
        RenderError::UnexpectedParameter {
            name: name.to_string(),
            context: self.context.clone(),
            expected: expected.to_string(),
        }
    }

    /// Renders a parameter as SQL text
    pub fn sql(&self, name: &str) -> RenderResult<String> {
        let value = self.get(name)?;
        self.resolve(name, value)
    }

    pub fn opt_sql(&self, name: &str) -> RenderResult<Option<String>> {
        match self.params.get(name) {
            Some(value) => self.resolve(name, value).map(Some),
            None => Ok(None),
        }
    }

    fn resolve(&self, name: &str, value: &ParamValue) -> RenderResult<String> {
        let b = self.builder;
        match value {
            ParamValue::Sql(sql) => Ok(sql.clone()),
            ParamValue::Value(value) => Ok(b.sql_transform(value)),
            ParamValue::Names(names) => Ok(self.quote_all(names)),
            ParamValue::Keyword(keyword) => b.sql_keyword(*keyword, &Params::new()),
            ParamValue::DataType(data_type) => Ok(b.sql_type(*data_type, 0, 0)),
            ParamValue::Expression(expr) => expr.render(b),
            ParamValue::Condition(cond) => cond.render(b),
            ParamValue::Query(query) => Ok(format!("({})", b.get_select(query)?)),
            ParamValue::Keywords(_) | ParamValue::Trigger(_) => {
                Err(self.unexpected(name, "renderable SQL"))
            }
        }
    }

    fn quote_all(&self, names: &[String]) -> String {
        names
            .iter()
            .map(|name| quote_name(self.builder, name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Reads a raw identifier and quotes it; pre-rendered SQL is kept as is
    pub fn ident(&self, name: &str) -> RenderResult<String> {
        match self.get(name)? {
            ParamValue::Value(Value::Text(raw)) => Ok(quote_name(self.builder, raw)),
            ParamValue::Sql(sql) => Ok(sql.clone()),
            ParamValue::Expression(expr) => expr.render(self.builder),
            _ => Err(self.unexpected(name, "an identifier")),
        }
    }

    /// Reads a list of raw identifiers, quoted and comma separated
    pub fn idents(&self, name: &str) -> RenderResult<String> {
        match self.get(name)? {
            ParamValue::Names(names) => Ok(self.quote_all(names)),
            ParamValue::Value(Value::Text(raw)) => Ok(quote_name(self.builder, raw)),
            ParamValue::Sql(sql) => Ok(sql.clone()),
            _ => Err(self.unexpected(name, "a list of identifiers")),
        }
    }

    /// Reads a list of raw identifiers without quoting them
    pub fn names(&self, name: &str) -> RenderResult<Vec<String>> {
        match self.params.get(name) {
            None => Ok(Vec::new()),
            Some(ParamValue::Names(names)) => Ok(names.clone()),
            Some(ParamValue::Value(Value::Text(raw))) => Ok(vec![raw.clone()]),
            Some(_) => Err(self.unexpected(name, "a list of identifiers")),
        }
    }

    /// Reads raw text without quoting or escaping
    pub fn text(&self, name: &str) -> RenderResult<String> {
        match self.get(name)? {
            ParamValue::Value(Value::Text(text)) | ParamValue::Sql(text) => Ok(text.clone()),
            ParamValue::Value(Value::Int(n)) => Ok(n.to_string()),
            _ => Err(self.unexpected(name, "text")),
        }
    }

    /// Like [`Args::text`], treating a missing or blank value as absent
    pub fn opt_text(&self, name: &str) -> RenderResult<Option<String>> {
        if !self.params.contains(name) {
            return Ok(None);
        }
        let text = self.text(name)?;
        Ok((!text.trim().is_empty()).then_some(text))
    }

    pub fn value(&self, name: &str) -> RenderResult<&'a Value> {
        match self.get(name)? {
            ParamValue::Value(value) => Ok(value),
            ParamValue::Expression(polysql_ir::Expression::Constant(value)) => Ok(value),
            _ => Err(self.unexpected(name, "a literal value")),
        }
    }

    /// Boolean switch; a missing parameter reads as `false`
    pub fn flag(&self, name: &str) -> RenderResult<bool> {
        match self.params.get(name) {
            None | Some(ParamValue::Value(Value::Null)) => Ok(false),
            Some(ParamValue::Value(Value::Bool(flag))) => Ok(*flag),
            Some(ParamValue::Value(Value::Int(n))) => Ok(*n != 0),
            Some(_) => Err(self.unexpected(name, "a boolean")),
        }
    }

    /// Non-negative size; a missing parameter reads as `0`
    pub fn uint(&self, name: &str) -> RenderResult<u32> {
        match self.params.get(name) {
            None => Ok(0),
            Some(ParamValue::Value(Value::Int(n))) => {
                u32::try_from(*n).map_err(|_| self.unexpected(name, "a non-negative integer"))
            }
            Some(_) => Err(self.unexpected(name, "a non-negative integer")),
        }
    }

    pub fn keyword(&self, name: &str) -> RenderResult<SqlKeyword> {
        match self.get(name)? {
            ParamValue::Keyword(keyword) => Ok(*keyword),
            _ => Err(self.unexpected(name, "a keyword")),
        }
    }

    pub fn opt_keyword(&self, name: &str) -> RenderResult<Option<SqlKeyword>> {
        if self.params.contains(name) {
            self.keyword(name).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Keyword list; a missing parameter reads as empty
    pub fn keywords(&self, name: &str) -> RenderResult<Vec<SqlKeyword>> {
        match self.params.get(name) {
            None => Ok(Vec::new()),
            Some(ParamValue::Keywords(keywords)) => Ok(keywords.clone()),
            Some(ParamValue::Keyword(keyword)) => Ok(vec![*keyword]),
            Some(_) => Err(self.unexpected(name, "a list of keywords")),
        }
    }

    pub fn data_type(&self, name: &str) -> RenderResult<SqlDataType> {
        match self.get(name)? {
            ParamValue::DataType(data_type) => Ok(*data_type),
            _ => Err(self.unexpected(name, "a data type")),
        }
    }

    pub fn trigger(&self, name: &str) -> RenderResult<&'a TriggerSpec> {
        match self.get(name)? {
            ParamValue::Trigger(trigger) => Ok(trigger),
            _ => Err(self.unexpected(name, "a trigger definition")),
        }
    }

    /// Renders the positional `memberN` parameters; at least one is required
    pub fn members(&self) -> RenderResult<Vec<String>> {
        let count = self.params.member_count();
        if count == 0 {
            return Err(RenderError::MissingParameter {
                name: member_key(0),
                context: self.context.clone(),
            });
        }
        (0..count).map(|i| self.sql(&member_key(i))).collect()
    }
}
