// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Trigger definitions carried by the `CREATE_TRIGGER` keyword

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
            TriggerTiming::InsteadOf => "INSTEAD OF",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerEvent {
    Insert,
    Update,
    Delete,
}

impl TriggerEvent {
    pub fn as_sql(&self) -> &'static str {
        match self {
            TriggerEvent::Insert => "INSERT",
            TriggerEvent::Update => "UPDATE",
            TriggerEvent::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerScope {
    Row,
    Statement,
}

/// A dependent row to remove when the owning row is deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerRelation {
    /// Field of the triggering table
    pub field: String,
    /// Table holding the dependent rows
    pub rel_table: String,
    /// Field of `rel_table` referencing `field`
    pub rel_field: String,
}

impl TriggerRelation {
    pub fn new(
        field: impl Into<String>,
        rel_table: impl Into<String>,
        rel_field: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rel_table: rel_table.into(),
            rel_field: rel_field.into(),
        }
    }
}

/// What the trigger does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerBody {
    /// Copies the previous version of changed rows into an audit table
    Audit {
        audit_table: String,
        id_name: String,
        fields: Vec<String>,
    },
    /// Deletes dependent rows in related tables
    Relation(Vec<TriggerRelation>),
    /// Engine-specific body text used verbatim
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    pub timing: TriggerTiming,
    pub events: Vec<TriggerEvent>,
    pub scope: TriggerScope,
    pub body: TriggerBody,
}

impl TriggerSpec {
    pub fn new(timing: TriggerTiming, events: Vec<TriggerEvent>, body: TriggerBody) -> Self {
        Self {
            timing,
            events,
            scope: TriggerScope::Row,
            body,
        }
    }

    pub fn with_scope(mut self, scope: TriggerScope) -> Self {
        self.scope = scope;
        self
    }
}
