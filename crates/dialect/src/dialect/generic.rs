// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Generic ANSI dialect

use polysql_ir::SqlEngine;

use crate::SqlBuilder;

/// Renders the base grammar unchanged, with ANSI double-quoted identifiers
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

impl SqlBuilder for GenericDialect {
    fn engine(&self) -> SqlEngine {
        SqlEngine::Generic
    }

    fn sql_quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }
}
