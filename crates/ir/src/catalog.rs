// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog output columns
//!
//! Every introspection keyword (`DB_TABLES`, `DB_FIELDS`, ...) projects its
//! result onto these aliases, whichever catalog views the engine reads from.
//! Callers read result sets by these names and stay engine-agnostic.
//!
//! ```sql
//! -- generic
//! SELECT t.table_name AS tblName, t.table_rows AS rowCount FROM information_schema.tables t
//! -- SQL Server
//! SELECT [o].[name] AS [tblName], SUM([p].[rows]) AS [rowCount] FROM [sys].[objects] [o] ...
//! ```

pub const TBL_NAME: &str = "tblName";
pub const ROW_COUNT: &str = "rowCount";

pub const FLD_NAME: &str = "fldName";
pub const FLD_NULL: &str = "fldNull";
pub const FLD_TYPE: &str = "fldType";
pub const FLD_LENGTH: &str = "fldLength";
pub const FLD_PRECISION: &str = "fldPrecision";
pub const FLD_SCALE: &str = "fldScale";

pub const KEY_NAME: &str = "keyName";
pub const KEY_TYPE: &str = "keyType";
pub const FK_REF_TABLE: &str = "fkRefTable";

pub const TRIGGER_NAME: &str = "triggerName";

pub const DB_NAME: &str = "dbName";
pub const DB_SCHEMA: &str = "dbSchema";
pub const SCHEMA_NAME: &str = "schemaName";
