// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Column metadata for table creation
//!
//! Portable data types and the column definitions `CREATE TABLE` statements
//! are built from. Engine-specific type names are chosen by the dialect's
//! type mapper.

use serde::{Deserialize, Serialize};

/// Portable column types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlDataType {
    Boolean,
    Integer,
    Long,
    Double,
    /// Fixed-point number using precision and scale
    Decimal,
    /// Fixed-length string using precision
    Char,
    /// Variable-length string using precision
    String,
    /// Unbounded text
    Text,
    /// Stored as epoch days
    Date,
    /// Stored as epoch milliseconds
    DateTime,
}

/// Column definition of a `CREATE TABLE` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlField {
    pub name: String,
    pub data_type: SqlDataType,
    pub precision: u32,
    pub scale: u32,
    pub not_null: bool,
}

impl SqlField {
    pub fn new(name: impl Into<String>, data_type: SqlDataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            precision: 0,
            scale: 0,
            not_null: false,
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }
}
