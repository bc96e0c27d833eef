// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Base ANSI grammar shared by all dialects
//!
//! Each public function here is the default body of the [`SqlBuilder`] hook
//! with the same name. Dialects that override a hook call back into these
//! functions for the cases where their engine agrees with the base grammar.
//!
//! The smaller building blocks (`select_body`, `order_clause`, `from_list`,
//! `assignments`, ...) are public as well, so a dialect can rearrange
//! clauses without re-implementing them.

use polysql_ir::{
    Condition, Expression, FromItem, Operator, ParamValue, Params, SortDirection, SqlCreate,
    SqlDataType, SqlDelete, SqlFunction, SqlInsert, SqlKeyword, SqlQuery, SqlSelect, SqlUpdate,
    TriggerBody, TriggerRelation, TriggerSpec, Value,
};
use tracing::{debug, trace, warn};

use super::catalog;
use crate::render::{Render, quote_name};
use crate::{Args, RenderError, RenderResult, SqlBuilder};

/// Escape character of every LIKE pattern
pub const LIKE_ESCAPE: char = '|';

// ============================================================================
// Statements
// ============================================================================

pub fn get_query<B: SqlBuilder + ?Sized>(b: &B, query: &SqlQuery) -> RenderResult<String> {
    debug!(engine = %b.engine(), kind = query.kind(), "Rendering statement");

    let result = match query {
        SqlQuery::Select(q) => b.get_select(q),
        SqlQuery::Insert(q) => b.get_insert(q),
        SqlQuery::Update(q) => b.get_update(q),
        SqlQuery::Delete(q) => b.get_delete(q),
        SqlQuery::Create(q) => b.get_create(q),
        SqlQuery::Command(c) => b.get_command(c),
    };

    match &result {
        Ok(sql) => trace!(engine = %b.engine(), sql = %sql, "Rendered statement"),
        Err(err) if err.is_not_implemented() => {
            warn!(engine = %b.engine(), error = %err, "Statement not supported by engine")
        }
        Err(err) => warn!(engine = %b.engine(), error = %err, "Failed to render statement"),
    }
    result
}

/// Extra pieces a dialect may splice into the SELECT head
#[derive(Debug, Clone, Default)]
pub struct SelectHead {
    /// `TOP n` row cap
    pub top: Option<u64>,
    /// Column placed before the projected fields
    pub lead: Option<String>,
    /// `SELECT ... INTO target` destination, already quoted
    pub into: Option<String>,
}

fn ensure(empty: bool, statement: &str) -> RenderResult<()> {
    if empty {
        Err(RenderError::empty(statement))
    } else {
        Ok(())
    }
}

/// Rejects INSERT or CREATE statements holding both explicit rows and a data source
pub fn ensure_single_source(mixed: bool, statement: &str) -> RenderResult<()> {
    if mixed {
        Err(RenderError::invalid(
            statement,
            "explicit rows cannot be combined with a data source",
        ))
    } else {
        Ok(())
    }
}

/// Renders ` KEYWORD cond`, or nothing when the condition is absent or empty
pub fn clause<B: SqlBuilder + ?Sized>(
    b: &B,
    keyword: &str,
    condition: Option<&Condition>,
) -> RenderResult<String> {
    let Some(condition) = condition else {
        return Ok(String::new());
    };
    let sql = condition.render(b)?;
    if sql.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!(" {keyword} {sql}"))
    }
}

/// Projected field list; an empty list renders `*`
pub fn select_fields<B: SqlBuilder + ?Sized>(b: &B, q: &SqlSelect) -> RenderResult<String> {
    if q.fields.is_empty() {
        return Ok("*".to_string());
    }
    let mut items = Vec::with_capacity(q.fields.len());
    for item in &q.fields {
        let mut sql = item.expr.render(b)?;
        if let Some(alias) = &item.alias {
            sql.push_str(" AS ");
            sql.push_str(&b.sql_quote(alias));
        }
        items.push(sql);
    }
    Ok(items.join(", "))
}

pub fn from_list<B: SqlBuilder + ?Sized>(b: &B, q: &SqlSelect) -> RenderResult<String> {
    let mut sql = String::new();

    for (i, item) in q.from.iter().enumerate() {
        match item {
            FromItem::Source(source) => {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&source.render(b)?);
            }
            FromItem::Join {
                join_type,
                source,
                on,
            } => {
                if i == 0 {
                    return Err(RenderError::invalid(
                        "SELECT",
                        "FROM list cannot start with a join",
                    ));
                }
                let on = on.render(b)?;
                if on.is_empty() {
                    return Err(RenderError::invalid("SELECT", "join without a condition"));
                }
                sql.push_str(&format!(" {} {} ON {}", join_type.as_sql(), source.render(b)?, on));
            }
        }
    }
    Ok(sql)
}

/// `SELECT ... FROM ... [WHERE] [GROUP BY] [HAVING]` without unions or ordering
pub fn select_body<B: SqlBuilder + ?Sized>(
    b: &B,
    q: &SqlSelect,
    head: &SelectHead,
) -> RenderResult<String> {
    ensure(q.is_empty(), "SELECT")?;

    let mut sql = String::from("SELECT ");
    if q.distinct {
        sql.push_str("DISTINCT ");
    }
    if let Some(top) = head.top {
        sql.push_str(&format!("TOP {top} "));
    }
    if let Some(lead) = &head.lead {
        sql.push_str(lead);
        sql.push_str(", ");
    }
    sql.push_str(&select_fields(b, q)?);

    if let Some(into) = &head.into {
        sql.push_str(" INTO ");
        sql.push_str(into);
    }
    sql.push_str(" FROM ");
    sql.push_str(&from_list(b, q)?);
    sql.push_str(&clause(b, "WHERE", q.where_clause.as_ref())?);

    if !q.group_by.is_empty() {
        let groups = q
            .group_by
            .iter()
            .map(|expr| expr.render(b))
            .collect::<RenderResult<Vec<_>>>()?;
        sql.push_str(" GROUP BY ");
        sql.push_str(&groups.join(", "));
    }
    sql.push_str(&clause(b, "HAVING", q.having.as_ref())?);
    Ok(sql)
}

/// [`select_body`] followed by the UNION members
pub fn select_unions<B: SqlBuilder + ?Sized>(
    b: &B,
    q: &SqlSelect,
    head: &SelectHead,
) -> RenderResult<String> {
    let mut sql = select_body(b, q, head)?;
    let union = if q.union_all { " UNION ALL " } else { " UNION " };

    for member in &q.unions {
        sql.push_str(union);
        sql.push('(');
        sql.push_str(&b.get_select(member)?);
        sql.push(')');
    }
    Ok(sql)
}

/// ORDER BY entries without the keyword; empty when there is no ordering
///
/// Entries without a source, and every entry of a union, order by the bare
/// output name.
pub fn order_clause<B: SqlBuilder + ?Sized>(b: &B, q: &SqlSelect) -> RenderResult<String> {
    let mut entries = Vec::with_capacity(q.order_by.len());

    for order in &q.order_by {
        let expr = match &order.source {
            Some(source) if !q.has_union() => Expression::field(source.as_str(), order.field.as_str()),
            _ => Expression::name(order.field.as_str()),
        };
        let mut sql = expr.render(b)?;
        if order.direction == SortDirection::Desc {
            sql.push_str(" DESC");
        }
        entries.push(sql);
    }
    Ok(entries.join(", "))
}

/// Full SELECT with unions and ordering but no pagination
pub fn select_unpaged<B: SqlBuilder + ?Sized>(b: &B, q: &SqlSelect) -> RenderResult<String> {
    let mut sql = select_unions(b, q, &SelectHead::default())?;
    let order = order_clause(b, q)?;
    if !order.is_empty() {
        sql.push_str(" ORDER BY ");
        sql.push_str(&order);
    }
    Ok(sql)
}

pub fn get_select<B: SqlBuilder + ?Sized>(b: &B, q: &SqlSelect) -> RenderResult<String> {
    let mut sql = select_unpaged(b, q)?;
    if q.limit > 0 {
        sql.push_str(&format!(" LIMIT {}", q.limit));
    }
    if q.offset > 0 {
        sql.push_str(&format!(" OFFSET {}", q.offset));
    }
    Ok(sql)
}

pub fn get_insert<B: SqlBuilder + ?Sized>(b: &B, q: &SqlInsert) -> RenderResult<String> {
    ensure(q.is_empty(), "INSERT")?;
    ensure_single_source(q.has_mixed_sources(), "INSERT")?;

    let fields = q
        .fields
        .iter()
        .map(|field| quote_name(b, field))
        .collect::<Vec<_>>()
        .join(", ");
    let head = format!("INSERT INTO {} ({})", quote_name(b, &q.target), fields);

    match &q.data_source {
        Some(source) => Ok(format!("{head} {}", b.get_select(source)?)),
        None => {
            let values = q
                .values
                .iter()
                .map(|value| value.render(b))
                .collect::<RenderResult<Vec<_>>>()?;
            Ok(format!("{head} VALUES ({})", values.join(", ")))
        }
    }
}

/// `field=value` list of an UPDATE
pub fn assignments<B: SqlBuilder + ?Sized>(b: &B, q: &SqlUpdate) -> RenderResult<String> {
    let mut items = Vec::with_capacity(q.assignments.len());
    for (field, value) in &q.assignments {
        items.push(format!("{}={}", quote_name(b, field), value.render(b)?));
    }
    Ok(items.join(", "))
}

/// Quoted target of an UPDATE or DELETE with its optional alias
pub fn target_ref<B: SqlBuilder + ?Sized>(b: &B, target: &str, alias: Option<&str>) -> String {
    match alias {
        Some(alias) => format!("{} {}", quote_name(b, target), b.sql_quote(alias)),
        None => quote_name(b, target),
    }
}

/// Correlated UPDATE: `UPDATE t SET ... FROM src WHERE join AND where`
pub fn get_update<B: SqlBuilder + ?Sized>(b: &B, q: &SqlUpdate) -> RenderResult<String> {
    ensure(q.is_empty(), "UPDATE")?;

    let mut sql = format!(
        "UPDATE {} SET {}",
        target_ref(b, &q.target, q.alias.as_deref()),
        assignments(b, q)?
    );

    match &q.from {
        Some(from) => {
            sql.push_str(" FROM ");
            sql.push_str(&from.source.render(b)?);

            let mut filter = vec![from.join.clone()];
            filter.extend(q.where_clause.clone());
            sql.push_str(&clause(b, "WHERE", Some(&Condition::And(filter)))?);
        }
        None => sql.push_str(&clause(b, "WHERE", q.where_clause.as_ref())?),
    }
    Ok(sql)
}

pub fn get_delete<B: SqlBuilder + ?Sized>(b: &B, q: &SqlDelete) -> RenderResult<String> {
    ensure(q.is_empty(), "DELETE")?;

    Ok(format!(
        "DELETE FROM {}{}",
        target_ref(b, &q.target, q.alias.as_deref()),
        clause(b, "WHERE", q.where_clause.as_ref())?
    ))
}

/// Column definitions of a CREATE TABLE
pub fn column_list<B: SqlBuilder + ?Sized>(b: &B, q: &SqlCreate) -> String {
    q.fields
        .iter()
        .map(|field| {
            let mut sql = format!(
                "{} {}",
                b.sql_quote(&field.name),
                b.sql_type(field.data_type, field.precision, field.scale)
            );
            if field.not_null {
                sql.push_str(" NOT NULL");
            }
            sql
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn get_create<B: SqlBuilder + ?Sized>(b: &B, q: &SqlCreate) -> RenderResult<String> {
    ensure(q.is_empty(), "CREATE")?;
    ensure_single_source(q.has_mixed_sources(), "CREATE")?;

    let mut sql = String::from("CREATE ");
    if q.temporary {
        sql.push_str(&b.sql_keyword(SqlKeyword::Temporary, &Params::new())?);
    }
    sql.push_str("TABLE ");
    sql.push_str(&quote_name(b, &q.target));

    match &q.data_source {
        Some(source) => {
            sql.push_str(" AS ");
            sql.push_str(&b.get_select(source)?);
        }
        None => {
            sql.push_str(" (");
            sql.push_str(&column_list(b, q));
            sql.push(')');
        }
    }
    Ok(sql)
}

// ============================================================================
// Conditions
// ============================================================================

/// Escapes LIKE metacharacters and inserts the wildcards of a pattern operator
pub fn like_pattern(operator: Operator, text: &str) -> String {
    let escaped = text
        .replace(LIKE_ESCAPE, "||")
        .replace('%', "|%")
        .replace('_', "|_");

    match operator {
        Operator::Starts => format!("{escaped}%"),
        Operator::Ends => format!("%{escaped}"),
        Operator::Contains => format!("%{escaped}%"),
        Operator::Matches => escaped
            .replace(Operator::CHAR_ANY, "%")
            .replace(Operator::CHAR_ONE, "_"),
        _ => escaped,
    }
}

pub fn sql_condition<B: SqlBuilder + ?Sized>(
    b: &B,
    operator: Operator,
    params: &Params,
) -> RenderResult<String> {
    let context = format!("{operator:?} condition");
    let args = Args::new(b, params, &context);
    let expression = args.sql("expression")?;

    match operator {
        Operator::IsNull => Ok(format!("{expression} IS NULL")),
        Operator::NotNull => Ok(format!("{expression} IS NOT NULL")),
        Operator::In => Ok(format!("{expression} IN {}", args.sql("value")?)),
        Operator::Eq | Operator::Ne | Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => {
            let token = operator
                .token()
                .ok_or_else(|| RenderError::not_implemented(b.engine(), context.as_str()))?;
            Ok(format!("{expression} {token} {}", args.sql("value")?))
        }
        Operator::Starts | Operator::Ends | Operator::Contains | Operator::Matches => {
            let pattern = match params.get("value") {
                Some(ParamValue::Value(Value::Text(text))) => {
                    b.sql_transform(&Value::Text(like_pattern(operator, text)))
                }
                _ => args.sql("value")?,
            };
            let like = b.sql_keyword(SqlKeyword::Like, &Params::new())?;
            Ok(format!("{expression} {like} {pattern} ESCAPE '{LIKE_ESCAPE}'"))
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

pub fn sql_function<B: SqlBuilder + ?Sized>(
    b: &B,
    function: SqlFunction,
    params: &Params,
) -> RenderResult<String> {
    let args = Args::new(b, params, function);

    match function {
        SqlFunction::BitAnd => Ok(format!(
            "({} & {})",
            args.sql("expression")?,
            args.sql("value")?
        )),
        SqlFunction::If => Ok(format!(
            "CASE WHEN {} THEN {} ELSE {} END",
            args.sql("condition")?,
            args.sql("ifTrue")?,
            args.sql("ifFalse")?
        )),
        SqlFunction::Case => {
            let mut sql = format!("CASE {}", args.sql("expression")?);
            for i in 0..params.case_count() {
                sql.push_str(&format!(
                    " WHEN {} THEN {}",
                    args.sql(&format!("case{i}"))?,
                    args.sql(&format!("value{i}"))?
                ));
            }
            if let Some(otherwise) = args.opt_sql("caseElse")? {
                sql.push_str(" ELSE ");
                sql.push_str(&otherwise);
            }
            sql.push_str(" END");
            Ok(sql)
        }
        SqlFunction::Cast => Ok(format!(
            "CAST({} AS {})",
            args.sql("expression")?,
            b.sql_type(
                args.data_type("type")?,
                args.uint("precision")?,
                args.uint("scale")?
            )
        )),
        SqlFunction::Min
        | SqlFunction::Max
        | SqlFunction::Sum
        | SqlFunction::Avg
        | SqlFunction::Count => {
            let expression = args
                .opt_sql("expression")?
                .filter(|expr| !expr.is_empty())
                .unwrap_or_else(|| "*".to_string());
            Ok(format!("{}({expression})", aggregate_name(b, function)?))
        }
        SqlFunction::SumDistinct | SqlFunction::AvgDistinct | SqlFunction::CountDistinct => Ok(
            format!(
                "{}(DISTINCT {})",
                aggregate_name(b, function)?,
                args.sql("expression")?
            ),
        ),
        SqlFunction::Plus | SqlFunction::Minus | SqlFunction::Multiply | SqlFunction::Divide => {
            let operator = function.arithmetic_operator().unwrap_or(" + ");
            Ok(format!("({})", args.members()?.join(operator)))
        }
        SqlFunction::Bulk => Ok(args.members()?.concat()),
        SqlFunction::Nvl => Ok(format!("COALESCE({})", args.members()?.join(", "))),
        SqlFunction::Concat => Ok(args.members()?.join(" || ")),
        SqlFunction::Length => Ok(format!("LENGTH({})", args.sql("expression")?)),
        SqlFunction::Substring => {
            let mut sql = format!("SUBSTR({},{}", args.sql("expression")?, args.sql("pos")?);
            if let Some(len) = args.opt_sql("len")? {
                sql.push(',');
                sql.push_str(&len);
            }
            sql.push(')');
            Ok(sql)
        }
        SqlFunction::Left => {
            let params = params.clone().with("pos", 1_i64);
            b.sql_function(SqlFunction::Substring, &params)
        }
        SqlFunction::Right => {
            let length = b.sql_function(SqlFunction::Length, params)?;
            let pos = format!("{length} - {} + 1", args.sql("len")?);
            let params = params.clone().with("pos", ParamValue::Sql(pos));
            b.sql_function(SqlFunction::Substring, &params)
        }
    }
}

fn aggregate_name<B: SqlBuilder + ?Sized>(
    b: &B,
    function: SqlFunction,
) -> RenderResult<&'static str> {
    function
        .aggregate_name()
        .ok_or_else(|| RenderError::not_implemented(b.engine(), function.to_string()))
}

// ============================================================================
// Keywords
// ============================================================================

/// Indexed columns; an index without columns covers the column named like it
fn index_fields<B: SqlBuilder + ?Sized>(args: &Args<'_, B>) -> RenderResult<String> {
    if args.names("fields")?.is_empty() {
        args.ident("name")
    } else {
        args.idents("fields")
    }
}

pub fn sql_keyword<B: SqlBuilder + ?Sized>(
    b: &B,
    keyword: SqlKeyword,
    params: &Params,
) -> RenderResult<String> {
    let args = Args::new(b, params, keyword);

    match keyword {
        SqlKeyword::CreateSchema => Ok(format!("CREATE SCHEMA {}", args.ident("schema")?)),
        SqlKeyword::CreateIndex => Ok(format!(
            "CREATE {}INDEX {} ON {} ({})",
            if args.flag("isUnique")? { "UNIQUE " } else { "" },
            args.ident("name")?,
            args.ident("table")?,
            index_fields(&args)?
        )),
        SqlKeyword::AddConstraint => Ok(format!(
            "ALTER TABLE {} ADD CONSTRAINT {} {}",
            args.ident("table")?,
            args.ident("name")?,
            b.sql_keyword(args.keyword("type")?, params)?
        )),
        SqlKeyword::PrimaryKey => Ok(format!("PRIMARY KEY ({})", args.idents("fields")?)),
        SqlKeyword::ForeignKey => {
            let mut sql = format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                args.idents("fields")?,
                args.ident("refTable")?,
                args.idents("refFields")?
            );
            if let Some(cascade) = args.opt_keyword("cascade")? {
                sql.push_str(" ON DELETE ");
                sql.push_str(&b.sql_keyword(cascade, params)?);
            }
            Ok(sql)
        }
        SqlKeyword::Unique => Ok(format!("UNIQUE ({})", args.idents("fields")?)),
        SqlKeyword::Check => Ok(format!("CHECK ({})", args.sql("expression")?)),
        SqlKeyword::DbName | SqlKeyword::DbSchema => Ok(String::new()),
        SqlKeyword::DbSchemas => catalog::schemas(b, &args),
        SqlKeyword::DbTables => catalog::tables(b, &args),
        SqlKeyword::DbFields => catalog::fields(b, &args),
        SqlKeyword::DbKeys => catalog::keys(b, &args),
        SqlKeyword::DbForeignKeys => catalog::foreign_keys(b, &args),
        SqlKeyword::DbTriggers => catalog::triggers(b, &args),
        SqlKeyword::CreateTrigger | SqlKeyword::DbIndexes | SqlKeyword::SetParameter => {
            Err(RenderError::not_implemented(b.engine(), keyword.to_string()))
        }
        SqlKeyword::DropTable => Ok(format!("DROP TABLE {}", args.ident("table")?)),
        SqlKeyword::DropForeignKey => Ok(format!(
            "ALTER TABLE {} DROP CONSTRAINT {}",
            args.ident("table")?,
            args.ident("name")?
        )),
        SqlKeyword::RenameTable => Ok(format!(
            "ALTER TABLE {} RENAME TO {}",
            args.ident("nameFrom")?,
            args.ident("nameTo")?
        )),
        SqlKeyword::Temporary => Ok("TEMPORARY ".to_string()),
        SqlKeyword::TemporaryName => args.text("name"),
        SqlKeyword::Delete => Ok("CASCADE".to_string()),
        SqlKeyword::SetNull => Ok("SET NULL".to_string()),
        SqlKeyword::Like => Ok("LIKE".to_string()),
    }
}

/// Body text of a trigger definition
pub fn trigger_body<B: SqlBuilder + ?Sized>(b: &B, trigger: &TriggerSpec) -> RenderResult<String> {
    match &trigger.body {
        TriggerBody::Audit {
            audit_table,
            id_name,
            fields,
        } => b.audit_trigger(audit_table, id_name, fields),
        TriggerBody::Relation(relations) => b.relation_trigger(relations),
        TriggerBody::Custom(body) => Ok(body.clone()),
    }
}

/// Column of the pre-change row, e.g. `OLD."id"` or `:OLD."id"`
fn old_row_field<B: SqlBuilder + ?Sized>(b: &B, old_row: &str, field: &str) -> Expression {
    Expression::raw(format!("{old_row}.{}", b.sql_quote(field)))
}

/// Audit body for row-level triggers that see the old row as `old_row`
pub fn row_trigger_audit<B: SqlBuilder + ?Sized>(
    b: &B,
    old_row: &str,
    audit_table: &str,
    id_name: &str,
    fields: &[String],
) -> RenderResult<String> {
    let mut insert =
        SqlInsert::new(audit_table).add_expression(id_name, old_row_field(b, old_row, id_name));
    for field in fields {
        insert = insert.add_expression(field.as_str(), old_row_field(b, old_row, field));
    }
    Ok(format!("{};", b.get_insert(&insert)?))
}

/// Cascading delete body for row-level triggers that see the old row as `old_row`
pub fn row_trigger_relation<B: SqlBuilder + ?Sized>(
    b: &B,
    old_row: &str,
    relations: &[TriggerRelation],
) -> RenderResult<String> {
    let mut statements = Vec::with_capacity(relations.len());

    for relation in relations {
        let delete = SqlDelete::new(relation.rel_table.as_str()).set_where(Condition::compare(
            Operator::Eq,
            Expression::field(relation.rel_table.as_str(), relation.rel_field.as_str()),
            old_row_field(b, old_row, &relation.field),
        ));
        statements.push(format!("{};", b.get_delete(&delete)?));
    }
    Ok(statements.join(" "))
}

/// Comma separated trigger events, e.g. `INSERT, UPDATE`
pub fn trigger_events(trigger: &TriggerSpec, separator: &str) -> String {
    trigger
        .events
        .iter()
        .map(|event| event.as_sql())
        .collect::<Vec<_>>()
        .join(separator)
}

// ============================================================================
// Types and literals
// ============================================================================

pub fn sql_type(data_type: SqlDataType, precision: u32, scale: u32) -> String {
    match data_type {
        SqlDataType::Boolean => "BIT".to_string(),
        SqlDataType::Integer => "INTEGER".to_string(),
        SqlDataType::Long | SqlDataType::Date | SqlDataType::DateTime => "BIGINT".to_string(),
        SqlDataType::Double => "DOUBLE".to_string(),
        SqlDataType::Decimal => format!("NUMERIC({precision}, {scale})"),
        SqlDataType::Char => format!("CHAR({precision})"),
        SqlDataType::String => format!("VARCHAR({precision})"),
        SqlDataType::Text => "TEXT".to_string(),
    }
}

pub fn sql_transform(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => (if *flag { "1" } else { "0" }).to_string(),
        Value::Int(n) => n.to_string(),
        // Display already drops trailing zeros
        Value::Float(x) if x.is_finite() => x.to_string(),
        Value::Float(_) => "null".to_string(),
        Value::Text(text) => format!("'{}'", text.replace('\'', "''")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenericDialect;
    use polysql_ir::sql;

    #[test]
    fn test_like_pattern_escapes_and_anchors() {
        assert_eq!(like_pattern(Operator::Starts, "Ab_c%"), "Ab|_c|%%");
        assert_eq!(like_pattern(Operator::Ends, "a|b"), "%a||b");
        assert_eq!(like_pattern(Operator::Contains, "x"), "%x%");
        assert_eq!(like_pattern(Operator::Matches, "a*b?_"), "a%b_|_");
    }

    #[test]
    fn test_sql_transform_literals() {
        assert_eq!(sql_transform(&Value::Null), "null");
        assert_eq!(sql_transform(&Value::Bool(true)), "1");
        assert_eq!(sql_transform(&Value::Float(2.50)), "2.5");
        assert_eq!(sql_transform(&Value::Float(3.0)), "3");
        assert_eq!(sql_transform(&Value::Float(f64::NAN)), "null");
        assert_eq!(sql_transform(&Value::from("it's")), "'it''s'");
    }

    #[test]
    fn test_right_rewrites_to_substring() {
        let sql = sql::right(sql::name("code"), 3)
            .render(&GenericDialect)
            .unwrap();
        assert_eq!(sql, r#"SUBSTR("code",LENGTH("code") - 3 + 1,3)"#);

        let sql = sql::left(sql::name("code"), 2).render(&GenericDialect).unwrap();
        assert_eq!(sql, r#"SUBSTR("code",1,2)"#);
    }

    #[test]
    fn test_case_without_else() {
        let expr = sql::sql_case(
            sql::name("kind"),
            [(sql::constant(1), sql::constant("one"))],
            None,
        );
        assert_eq!(
            expr.render(&GenericDialect).unwrap(),
            r#"CASE "kind" WHEN 1 THEN 'one' END"#
        );
    }

    #[test]
    fn test_select_rejects_leading_join() {
        let query = SqlSelect::new().add_from_inner("t", None, sql::join("t", "a", "u", "a"));
        let err = get_select(&GenericDialect, &query).unwrap_err();
        assert!(matches!(err, RenderError::InvalidStatement { .. }));
    }

    #[test]
    fn test_row_trigger_bodies_use_old_row_prefix() {
        let relations = [TriggerRelation::new("id", "orders", "user_id")];
        assert_eq!(
            row_trigger_relation(&GenericDialect, "OLD", &relations).unwrap(),
            r#"DELETE FROM "orders" WHERE "orders"."user_id" = OLD."id";"#
        );

        let audit =
            row_trigger_audit(&GenericDialect, ":OLD", "audit", "id", &["name".to_string()])
                .unwrap();
        assert_eq!(
            audit,
            r#"INSERT INTO "audit" ("id", "name") VALUES (:OLD."id", :OLD."name");"#
        );
    }

    #[test]
    fn test_missing_member_is_reported() {
        let expr = Expression::function(SqlFunction::Concat, Params::new());
        let err = expr.render(&GenericDialect).unwrap_err();
        assert!(matches!(err, RenderError::MissingParameter { ref name, .. } if name == "member0"));
    }
}
