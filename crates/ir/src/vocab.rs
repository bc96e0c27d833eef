// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Portable Vocabulary
//!
//! Closed enumerations naming every operation a dialect must render.
//!
//! ## Design
//!
//! Each value is a stable identifier whose SQL is looked up by the dialect
//! renderer, never computed by the caller. The enums are deliberately not
//! `#[non_exhaustive]`: dialect crates match on them exhaustively, so adding
//! a value is a compile error until every dialect handles it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators for leaf conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    IsNull,
    NotNull,
    /// Prefix match, compiled to LIKE
    Starts,
    /// Suffix match, compiled to LIKE
    Ends,
    /// Substring match, compiled to LIKE
    Contains,
    /// Wildcard match using [`Operator::CHAR_ANY`] and [`Operator::CHAR_ONE`]
    Matches,
}

impl Operator {
    /// Wildcard for any run of characters in MATCHES patterns
    pub const CHAR_ANY: char = '*';
    /// Wildcard for exactly one character in MATCHES patterns
    pub const CHAR_ONE: char = '?';

    /// SQL token for plain comparison operators
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Operator::Eq => Some("="),
            Operator::Ne => Some("<>"),
            Operator::Lt => Some("<"),
            Operator::Gt => Some(">"),
            Operator::Le => Some("<="),
            Operator::Ge => Some(">="),
            _ => None,
        }
    }

    /// Whether the operator compiles to a LIKE pattern
    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            Operator::Starts | Operator::Ends | Operator::Contains | Operator::Matches
        )
    }

    /// Whether the operator takes no right-hand operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::NotNull)
    }
}

/// Portable functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlFunction {
    BitAnd,
    If,
    Case,
    Cast,
    Min,
    Max,
    Sum,
    Avg,
    Count,
    SumDistinct,
    AvgDistinct,
    CountDistinct,
    Plus,
    Minus,
    Multiply,
    Divide,
    /// Concatenates member fragments without an operator
    Bulk,
    Nvl,
    Concat,
    Length,
    Substring,
    Left,
    Right,
}

impl SqlFunction {
    /// SQL name of aggregate functions, `None` for everything else
    pub fn aggregate_name(&self) -> Option<&'static str> {
        match self {
            SqlFunction::Min => Some("MIN"),
            SqlFunction::Max => Some("MAX"),
            SqlFunction::Sum | SqlFunction::SumDistinct => Some("SUM"),
            SqlFunction::Avg | SqlFunction::AvgDistinct => Some("AVG"),
            SqlFunction::Count | SqlFunction::CountDistinct => Some("COUNT"),
            _ => None,
        }
    }

    /// Infix operator of arithmetic functions
    pub fn arithmetic_operator(&self) -> Option<&'static str> {
        match self {
            SqlFunction::Plus => Some(" + "),
            SqlFunction::Minus => Some(" - "),
            SqlFunction::Multiply => Some(" * "),
            SqlFunction::Divide => Some(" / "),
            _ => None,
        }
    }
}

impl fmt::Display for SqlFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// DDL, catalog and modifier keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SqlKeyword {
    CreateSchema,
    CreateIndex,
    AddConstraint,
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
    CreateTrigger,
    DbName,
    DbSchema,
    DbSchemas,
    DbTables,
    DbFields,
    DbKeys,
    DbForeignKeys,
    DbIndexes,
    DbTriggers,
    DropTable,
    DropForeignKey,
    RenameTable,
    SetParameter,
    Temporary,
    TemporaryName,
    /// `ON DELETE CASCADE` action
    Delete,
    /// `ON DELETE SET NULL` action
    SetNull,
    Like,
}

impl fmt::Display for SqlKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
