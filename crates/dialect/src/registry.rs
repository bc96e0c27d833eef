// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Builder Registry
//!
//! Maps each [`SqlEngine`] to a shared builder instance and keeps the
//! process-wide default engine.
//!
//! Dialects carry no state, so one `'static` value per engine is enough and
//! lookups never allocate. The default engine starts as
//! [`SqlEngine::Generic`] and is changed through [`set_default_engine`],
//! usually once at startup by [`crate::BuilderConfig::install`].

use std::sync::RwLock;

use polysql_ir::SqlEngine;
use tracing::info;

use crate::SqlBuilder;
use crate::dialect::{GenericDialect, MsSqlDialect, OracleDialect, PostgreSqlDialect};

static GENERIC: GenericDialect = GenericDialect;
static MSSQL: MsSqlDialect = MsSqlDialect;
static POSTGRESQL: PostgreSqlDialect = PostgreSqlDialect;
static ORACLE: OracleDialect = OracleDialect;

static DEFAULT_ENGINE: RwLock<SqlEngine> = RwLock::new(SqlEngine::Generic);

/// Returns the shared builder of an engine
pub fn builder(engine: SqlEngine) -> &'static dyn SqlBuilder {
    match engine {
        SqlEngine::Generic => &GENERIC,
        SqlEngine::MsSql => &MSSQL,
        SqlEngine::PostgreSql => &POSTGRESQL,
        SqlEngine::Oracle => &ORACLE,
    }
}

/// Engine used when a caller does not name one
pub fn default_engine() -> SqlEngine {
    // SqlEngine is Copy, so a poisoned lock still holds a valid value
    match DEFAULT_ENGINE.read() {
        Ok(guard) => *guard,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Builder of the default engine
pub fn default_builder() -> &'static dyn SqlBuilder {
    builder(default_engine())
}

/// Changes the process-wide default engine
pub fn set_default_engine(engine: SqlEngine) {
    let mut guard = match DEFAULT_ENGINE.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if *guard != engine {
        info!(from = %*guard, to = %engine, "Default SQL engine changed");
    }
    *guard = engine;
}
