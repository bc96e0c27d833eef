// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Engine-specific rendering
//!
//! [`base`] holds the shared ANSI grammar; every other module is one engine
//! overriding the hooks where its syntax diverges.

pub mod base;
pub mod catalog;

mod generic;
mod mssql;
mod oracle;
mod postgresql;

pub use generic::GenericDialect;
pub use mssql::MsSqlDialect;
pub use oracle::OracleDialect;
pub use postgresql::PostgreSqlDialect;
