// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Engine Support
//!
//! This module identifies the SQL engines a statement can be rendered for.
//!
//! ## Engines
//!
//! - **Generic**: ANSI grammar with double-quoted identifiers and `LIMIT`/`OFFSET`
//! - **MsSql**: SQL Server, bracket quoting, `TOP`/`ROW_NUMBER()` pagination,
//!   `MERGE` for correlated updates
//! - **PostgreSql**: double-quote quoting, native `LIMIT`/`OFFSET`,
//!   `UPDATE ... FROM`
//! - **Oracle**: double-quote quoting, `OFFSET ... FETCH NEXT`, `MERGE`
//!
//! ## Detection
//!
//! Connection layers usually know either the product name reported by the
//! driver or the connection string. Both can be mapped to an engine:
//!
//! ```rust
//! use polysql_ir::SqlEngine;
//!
//! assert_eq!(SqlEngine::detect("Microsoft SQL Server"), Some(SqlEngine::MsSql));
//! assert_eq!(
//!     SqlEngine::from_dsn("postgres://localhost/app"),
//!     Some(SqlEngine::PostgreSql)
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported SQL engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlEngine {
    /// ANSI grammar
    #[default]
    Generic,
    /// Microsoft SQL Server
    MsSql,
    /// PostgreSQL
    PostgreSql,
    /// Oracle Database
    Oracle,
}

impl SqlEngine {
    pub const ALL: [SqlEngine; 4] = [
        SqlEngine::Generic,
        SqlEngine::MsSql,
        SqlEngine::PostgreSql,
        SqlEngine::Oracle,
    ];

    /// Short configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlEngine::Generic => "generic",
            SqlEngine::MsSql => "mssql",
            SqlEngine::PostgreSql => "postgresql",
            SqlEngine::Oracle => "oracle",
        }
    }

    /// Maps a database product name, as reported by a driver, to an engine
    pub fn detect(product_name: &str) -> Option<SqlEngine> {
        let product = product_name.trim().to_ascii_lowercase();

        if product.contains("sql server") || product.contains("microsoft") {
            Some(SqlEngine::MsSql)
        } else if product.contains("postgres") {
            Some(SqlEngine::PostgreSql)
        } else if product.contains("oracle") {
            Some(SqlEngine::Oracle)
        } else {
            None
        }
    }

    /// Infers the engine from a connection string scheme
    pub fn from_dsn(dsn: &str) -> Option<SqlEngine> {
        let dsn = dsn.trim().to_ascii_lowercase();
        let scheme = dsn.strip_prefix("jdbc:").unwrap_or(&dsn);

        if ["sqlserver:", "mssql:"].iter().any(|p| scheme.starts_with(p)) {
            Some(SqlEngine::MsSql)
        } else if ["postgres:", "postgresql:"].iter().any(|p| scheme.starts_with(p)) {
            Some(SqlEngine::PostgreSql)
        } else if scheme.starts_with("oracle:") {
            Some(SqlEngine::Oracle)
        } else {
            None
        }
    }
}

impl fmt::Display for SqlEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown engine name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown SQL engine: {0}")]
pub struct UnknownEngine(pub String);

impl FromStr for SqlEngine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(SqlEngine::Generic),
            "mssql" | "sqlserver" => Ok(SqlEngine::MsSql),
            "postgresql" | "postgres" | "pgsql" => Ok(SqlEngine::PostgreSql),
            "oracle" => Ok(SqlEngine::Oracle),
            _ => Err(UnknownEngine(s.to_string())),
        }
    }
}
