// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # PolySQL - Dialect Renderer
//!
//! This crate renders `polysql-ir` statements into literal SQL text for a
//! specific engine.
//!
//! ## Overview
//!
//! The renderer is a template method expressed as a trait:
//!
//! - [`SqlBuilder`] walks the statement IR top-down with the base ANSI
//!   grammar from [`dialect::base`]
//! - Every syntax decision point is a hook method with a default body
//! - Each engine is a unit struct that overrides only the hooks where its
//!   syntax diverges, and calls back into [`dialect::base`] for the rest
//!
//! ```text
//! SqlQuery IR → SqlBuilder::get_query → get_select / get_insert / ...
//!                                          ↳ sql_function / sql_keyword / sql_condition
//!                                          ↳ sql_type / sql_quote / sql_transform
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use polysql_dialect::{builder, Render};
//! use polysql_ir::{sql, SortDirection, SqlEngine, SqlSelect};
//!
//! let query = SqlSelect::new()
//!     .add_from("Users")
//!     .set_where(sql::more_equal("", "age", 30))
//!     .add_order_name("name", SortDirection::Asc)
//!     .set_limit(10)
//!     .set_offset(20);
//!
//! let generic = query.render(builder(SqlEngine::Generic)).unwrap();
//! assert_eq!(
//!     generic,
//!     r#"SELECT * FROM "Users" WHERE "age" >= 30 ORDER BY "name" LIMIT 10 OFFSET 20"#
//! );
//!
//! let mssql = query.render(builder(SqlEngine::MsSql)).unwrap();
//! assert!(mssql.contains("TOP 30"));
//! ```
//!
//! ## Error Handling
//!
//! Rendering returns [`RenderResult`]. An empty statement, a missing
//! parameter or an operation the engine cannot express is reported as a
//! [`RenderError`]; the renderer never substitutes a plausible-looking
//! translation.
//!
//! ## Concurrency
//!
//! Dialects are stateless and `Send + Sync`. One `'static` instance per
//! engine is shared by the whole process through [`builder`].

pub mod args;
pub mod config;
pub mod dialect;
pub mod error;
pub mod registry;
pub mod render;

pub use args::Args;
pub use config::{BuilderConfig, ConfigError};
pub use dialect::{GenericDialect, MsSqlDialect, OracleDialect, PostgreSqlDialect};
pub use error::{RenderError, RenderResult};
pub use registry::{builder, default_builder, default_engine, set_default_engine};
pub use render::{Render, quote_name};

use dialect::base;
use polysql_ir::{
    Operator, Params, SqlCommand, SqlCreate, SqlDataType, SqlDelete, SqlEngine, SqlFunction,
    SqlInsert, SqlKeyword, SqlQuery, SqlSelect, SqlUpdate, TriggerRelation, Value,
};

/// Core trait for rendering statements into engine-specific SQL
///
/// Implementors must supply [`engine`](SqlBuilder::engine) and
/// [`sql_quote`](SqlBuilder::sql_quote). Every other method has a default
/// body implementing the base grammar; an engine overrides a hook only
/// where its syntax differs, and may delegate the remaining cases back to
/// the matching function in [`dialect::base`].
///
/// # Example
///
/// ```rust
/// use polysql_dialect::{dialect::base, Args, RenderResult, SqlBuilder};
/// use polysql_ir::{Params, SqlEngine, SqlFunction};
///
/// struct Backticks;
///
/// impl SqlBuilder for Backticks {
///     fn engine(&self) -> SqlEngine {
///         SqlEngine::Generic
///     }
///
///     fn sql_quote(&self, identifier: &str) -> String {
///         format!("`{identifier}`")
///     }
///
///     fn sql_function(&self, function: SqlFunction, params: &Params) -> RenderResult<String> {
///         match function {
///             SqlFunction::Length => {
///                 let args = Args::new(self, params, function);
///                 Ok(format!("CHAR_LENGTH({})", args.sql("expression")?))
///             }
///             _ => base::sql_function(self, function, params),
///         }
///     }
/// }
/// ```
pub trait SqlBuilder: Send + Sync {
    /// The engine this builder renders for
    fn engine(&self) -> SqlEngine;

    /// Quotes a single identifier part
    fn sql_quote(&self, identifier: &str) -> String;

    /// Renders any statement
    ///
    /// This is the main entry point. It dispatches to the statement hooks
    /// below and logs the outcome.
    fn get_query(&self, query: &SqlQuery) -> RenderResult<String> {
        base::get_query(self, query)
    }

    fn get_select(&self, query: &SqlSelect) -> RenderResult<String> {
        base::get_select(self, query)
    }

    fn get_insert(&self, query: &SqlInsert) -> RenderResult<String> {
        base::get_insert(self, query)
    }

    fn get_update(&self, query: &SqlUpdate) -> RenderResult<String> {
        base::get_update(self, query)
    }

    fn get_delete(&self, query: &SqlDelete) -> RenderResult<String> {
        base::get_delete(self, query)
    }

    fn get_create(&self, query: &SqlCreate) -> RenderResult<String> {
        base::get_create(self, query)
    }

    fn get_command(&self, command: &SqlCommand) -> RenderResult<String> {
        self.sql_keyword(command.keyword, &command.params)
    }

    /// Renders a portable function call
    fn sql_function(&self, function: SqlFunction, params: &Params) -> RenderResult<String> {
        base::sql_function(self, function, params)
    }

    /// Renders a DDL, catalog or modifier keyword
    fn sql_keyword(&self, keyword: SqlKeyword, params: &Params) -> RenderResult<String> {
        base::sql_keyword(self, keyword, params)
    }

    /// Renders a leaf comparison
    ///
    /// `params` holds the rendered `expression` and, for binary operators,
    /// the rendered `value`.
    fn sql_condition(&self, operator: Operator, params: &Params) -> RenderResult<String> {
        base::sql_condition(self, operator, params)
    }

    /// Maps a portable column type to the engine's type name
    fn sql_type(&self, data_type: SqlDataType, precision: u32, scale: u32) -> String {
        base::sql_type(data_type, precision, scale)
    }

    /// Renders a literal value inline
    fn sql_transform(&self, value: &Value) -> String {
        base::sql_transform(value)
    }

    /// Body of a trigger copying previous row versions into `audit_table`
    fn audit_trigger(
        &self,
        _audit_table: &str,
        _id_name: &str,
        _fields: &[String],
    ) -> RenderResult<String> {
        Err(RenderError::not_implemented(self.engine(), "audit trigger"))
    }

    /// Body of a trigger deleting dependent rows of related tables
    fn relation_trigger(&self, _relations: &[TriggerRelation]) -> RenderResult<String> {
        Err(RenderError::not_implemented(self.engine(), "relation trigger"))
    }
}
