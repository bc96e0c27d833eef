// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # PolySQL - Intermediate Representation
//!
//! This crate provides the engine-agnostic representation of SQL statements.
//! The IR is designed to:
//! - Be dialect-agnostic (rendered by `polysql-dialect` for each engine)
//! - Name every portable operation through closed enumerations
//! - Be built with chained builder calls and rendered once
//! - Serialize with serde, so statements can cross process boundaries

pub mod catalog;
pub mod engine;
pub mod expr;
pub mod metadata;
pub mod params;
pub mod query;
pub mod sql;
pub mod trigger;
pub mod vocab;

// Re-export commonly used types
pub use engine::{SqlEngine, UnknownEngine};
pub use expr::{Condition, Expression, FromItem, FromSource, JoinType, Value};
pub use metadata::{SqlDataType, SqlField};
pub use params::{ParamValue, Params};
pub use query::{
    OrderBy, SelectItem, SortDirection, SqlCommand, SqlCreate, SqlDelete, SqlInsert, SqlQuery,
    SqlSelect, SqlUpdate, UpdateFrom,
};
pub use trigger::{
    TriggerBody, TriggerEvent, TriggerRelation, TriggerScope, TriggerSpec, TriggerTiming,
};
pub use vocab::{Operator, SqlFunction, SqlKeyword};
