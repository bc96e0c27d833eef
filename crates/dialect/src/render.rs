// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Rendering of AST and statement nodes
//!
//! Every node implements [`Render`]. Leaf nodes assemble their own text and
//! call back into the builder at each syntax decision point (quoting,
//! literals, functions, comparisons); statements dispatch straight to the
//! builder's statement hooks.

use polysql_ir::{
    Condition, Expression, FromSource, Operator, ParamValue, Params, SqlCommand, SqlCreate,
    SqlDelete, SqlInsert, SqlQuery, SqlSelect, SqlUpdate, Value,
};

use crate::{RenderResult, SqlBuilder};

/// A node that can be rendered by any [`SqlBuilder`]
pub trait Render {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String>;
}

/// Quotes a possibly dotted name part by part
///
/// `dbo.Users` becomes `[dbo].[Users]` on SQL Server and `"dbo"."Users"`
/// on PostgreSQL.
pub fn quote_name<B: SqlBuilder + ?Sized>(builder: &B, name: &str) -> String {
    name.split('.')
        .map(|part| builder.sql_quote(part))
        .collect::<Vec<_>>()
        .join(".")
}

impl Render for Expression {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        match self {
            Expression::Field { source, name } => {
                if source.is_empty() {
                    Ok(builder.sql_quote(name))
                } else {
                    Ok(format!(
                        "{}.{}",
                        quote_name(builder, source),
                        builder.sql_quote(name)
                    ))
                }
            }
            Expression::Name(name) => Ok(quote_name(builder, name)),
            Expression::AllFields(None) => Ok("*".to_string()),
            Expression::AllFields(Some(source)) => Ok(format!("{}.*", quote_name(builder, source))),
            Expression::Constant(value) => Ok(builder.sql_transform(value)),
            Expression::Function { function, params } => builder.sql_function(*function, params),
            Expression::Query(query) => Ok(format!("({})", builder.get_select(query)?)),
            Expression::List(items) => {
                let rendered = items
                    .iter()
                    .map(|item| item.render(builder))
                    .collect::<RenderResult<Vec<_>>>()?;
                Ok(format!("({})", rendered.join(", ")))
            }
            Expression::Raw(sql) => Ok(sql.clone()),
        }
    }
}

impl Render for Condition {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        match self {
            Condition::Comparison {
                operator,
                expression,
                value,
            } => render_comparison(builder, *operator, expression, value.as_ref()),
            Condition::And(children) => Ok(junction(builder, children, true)?.join(" AND ")),
            Condition::Or(children) => Ok(junction(builder, children, false)?.join(" OR ")),
            Condition::Not(inner) => {
                let inner = inner.render(builder)?;
                if inner.is_empty() {
                    Ok(String::new())
                } else {
                    Ok(format!("NOT ({inner})"))
                }
            }
        }
    }
}

fn render_comparison<B: SqlBuilder + ?Sized>(
    builder: &B,
    operator: Operator,
    expression: &Expression,
    value: Option<&Expression>,
) -> RenderResult<String> {
    // Nothing is a member of an empty list
    if operator == Operator::In && matches!(value, Some(Expression::List(items)) if items.is_empty()) {
        return Ok("1 = 0".to_string());
    }

    let mut params = Params::new().with("expression", ParamValue::Sql(expression.render(builder)?));

    if let Some(value) = value {
        let value = match value {
            // Pattern literals stay unrendered so the hook can escape them
            Expression::Constant(Value::Text(text)) if operator.is_pattern() => {
                ParamValue::Value(Value::Text(text.clone()))
            }
            Expression::List(_) | Expression::Query(_) => ParamValue::Sql(value.render(builder)?),
            other if operator == Operator::In => {
                ParamValue::Sql(format!("({})", other.render(builder)?))
            }
            other => ParamValue::Sql(other.render(builder)?),
        };
        params.insert("value", value);
    }
    builder.sql_condition(operator, &params)
}

/// Collects the non-empty parts of an AND (`is_and`) or OR junction
///
/// Same-kind children are flattened into the parent; opposite-kind children
/// with more than one part are parenthesized.
fn junction<B: SqlBuilder + ?Sized>(
    builder: &B,
    children: &[Condition],
    is_and: bool,
) -> RenderResult<Vec<String>> {
    let mut parts = Vec::with_capacity(children.len());

    for child in children {
        match child {
            Condition::And(nested) if is_and => parts.extend(junction(builder, nested, true)?),
            Condition::Or(nested) if !is_and => parts.extend(junction(builder, nested, false)?),
            Condition::And(nested) | Condition::Or(nested) => {
                let nested_is_and = !is_and;
                let inner = junction(builder, nested, nested_is_and)?;
                let separator = if nested_is_and { " AND " } else { " OR " };

                match inner.len() {
                    0 => {}
                    1 => parts.extend(inner),
                    _ => parts.push(format!("({})", inner.join(separator))),
                }
            }
            other => {
                let text = other.render(builder)?;
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
    }
    Ok(parts)
}

impl Render for FromSource {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        match self {
            FromSource::Table { name, alias } => {
                let mut sql = quote_name(builder, name);
                if let Some(alias) = alias {
                    sql.push(' ');
                    sql.push_str(&builder.sql_quote(alias));
                }
                Ok(sql)
            }
            FromSource::Query { query, alias } => Ok(format!(
                "({}) {}",
                builder.get_select(query)?,
                builder.sql_quote(alias)
            )),
        }
    }
}

impl Render for SqlSelect {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_select(self)
    }
}

impl Render for SqlInsert {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_insert(self)
    }
}

impl Render for SqlUpdate {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_update(self)
    }
}

impl Render for SqlDelete {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_delete(self)
    }
}

impl Render for SqlCreate {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_create(self)
    }
}

impl Render for SqlCommand {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_command(self)
    }
}

impl Render for SqlQuery {
    fn render<B: SqlBuilder + ?Sized>(&self, builder: &B) -> RenderResult<String> {
        builder.get_query(self)
    }
}
