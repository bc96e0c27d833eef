// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Error types for statement rendering
//!
//! Rendering is pure text assembly, so every error here is a programming
//! error in the statement that was handed over or a feature the selected
//! engine cannot express. None of them is retried.

use polysql_ir::SqlEngine;
use serde::Serialize;

/// Result type alias for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a statement
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq, Serialize)]
pub enum RenderError {
    /// The statement lacks a mandatory clause (target, FROM, values, WHERE)
    #[error("Cannot render an empty {statement} statement")]
    EmptyStatement { statement: String },

    /// The statement clauses are present but cannot be combined
    #[error("Invalid {statement} statement: {reason}")]
    InvalidStatement { statement: String, reason: String },

    /// A function or keyword was built without a parameter its rule reads
    #[error("Missing parameter '{name}' for {context}")]
    MissingParameter { name: String, context: String },

    /// A parameter holds a value of the wrong kind
    #[error("Parameter '{name}' for {context} must be {expected}")]
    UnexpectedParameter {
        name: String,
        context: String,
        expected: String,
    },

    /// The engine has no translation for the requested operation
    #[error("{feature} is not implemented for the {engine} engine")]
    NotImplemented { engine: SqlEngine, feature: String },
}

impl RenderError {
    pub fn empty(statement: &str) -> Self {
        RenderError::EmptyStatement {
            statement: statement.to_string(),
        }
    }

    pub fn invalid(statement: &str, reason: impl Into<String>) -> Self {
        RenderError::InvalidStatement {
            statement: statement.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_implemented(engine: SqlEngine, feature: impl Into<String>) -> Self {
        RenderError::NotImplemented {
            engine,
            feature: feature.into(),
        }
    }

    /// Whether the error reports a missing engine capability rather than a
    /// malformed statement
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, RenderError::NotImplemented { .. })
    }
}
