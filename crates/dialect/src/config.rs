// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Builder Configuration
//!
//! Selects the engine used by [`crate::default_builder`].
//!
//! The engine can be given directly, or detected from the database product
//! name reported by a driver, or inferred from a connection string.
//!
//! ## Settings payload
//!
//! ```json
//! {
//!   "polysql": {
//!     "engine": "mssql",
//!     "productName": "Microsoft SQL Server",
//!     "dsn": "jdbc:sqlserver://db:1433"
//!   }
//! }
//! ```
//!
//! `engine` wins over `productName`, which wins over `dsn`.
//!
//! ## Environment
//!
//! - `POLYSQL_ENGINE`: engine name (`generic`, `mssql`, `postgresql`, `oracle`)
//! - `POLYSQL_DSN`: connection string, used to infer the engine when
//!   `POLYSQL_ENGINE` is unset

use polysql_ir::{SqlEngine, UnknownEngine};
use serde_json::Value;
use tracing::debug;

use crate::registry::set_default_engine;

/// Environment variable naming the engine
pub const ENV_ENGINE: &str = "POLYSQL_ENGINE";

/// Environment variable holding a connection string
pub const ENV_DSN: &str = "POLYSQL_DSN";

/// Key of the settings object read by [`BuilderConfig::from_settings`]
pub const SETTINGS_KEY: &str = "polysql";

/// Engine selection for the process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuilderConfig {
    /// Engine to render for
    pub engine: SqlEngine,

    /// Connection string the engine was taken from, if any
    pub dsn: Option<String>,
}

impl BuilderConfig {
    pub fn new(engine: SqlEngine) -> Self {
        Self { engine, dsn: None }
    }

    /// Attaches a connection string
    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    /// Builds the configuration from a connection string alone
    pub fn from_dsn(dsn: &str) -> Result<Self, ConfigError> {
        let engine = SqlEngine::from_dsn(dsn).ok_or_else(|| ConfigError::InvalidDsn {
            dsn: dsn.to_string(),
            reason: "unrecognized scheme".to_string(),
        })?;
        Ok(Self::new(engine).with_dsn(dsn))
    }

    /// Validate the configuration
    ///
    /// A connection string must carry a scheme, and when the scheme names an
    /// engine it has to agree with [`engine`](Self::engine).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(dsn) = &self.dsn else {
            return Ok(());
        };

        if dsn.trim().is_empty() || !dsn.contains(':') {
            return Err(ConfigError::InvalidDsn {
                dsn: dsn.clone(),
                reason: "missing scheme (e.g. postgres://, jdbc:sqlserver://)".to_string(),
            });
        }

        match SqlEngine::from_dsn(dsn) {
            Some(engine) if engine != self.engine => Err(ConfigError::InvalidDsn {
                dsn: dsn.clone(),
                reason: format!("connection is for {engine}, configured engine is {}", self.engine),
            }),
            _ => Ok(()),
        }
    }

    /// Parse the configuration from a JSON settings payload
    ///
    /// Expects a `"polysql"` object, see the module documentation.
    pub fn from_settings(settings: &Value) -> Result<Self, ConfigError> {
        let section = settings
            .get(SETTINGS_KEY)
            .ok_or_else(|| ConfigError::Settings(format!("missing \"{SETTINGS_KEY}\" object")))?;
        if !section.is_object() {
            return Err(ConfigError::Settings(format!(
                "\"{SETTINGS_KEY}\" must be an object"
            )));
        }

        let engine = string_field(section, "engine")?;
        let product = string_field(section, "productName")?;
        let dsn = string_field(section, "dsn")?;

        let engine = if let Some(name) = engine {
            name.parse::<SqlEngine>()?
        } else if let Some(product) = product {
            SqlEngine::detect(product)
                .ok_or_else(|| ConfigError::UnknownEngine(UnknownEngine(product.to_string())))?
        } else if let Some(dsn) = dsn {
            return Self::from_dsn(dsn);
        } else {
            return Err(ConfigError::MissingEngine);
        };

        let config = Self {
            engine,
            dsn: dsn.map(str::to_string),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads `POLYSQL_ENGINE` and `POLYSQL_DSN` from the environment
    ///
    /// With neither variable set the default configuration is returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let config = match (non_blank(ENV_ENGINE), non_blank(ENV_DSN)) {
            (Some(engine), dsn) => Self {
                engine: engine.parse()?,
                dsn,
            },
            (None, Some(dsn)) => Self::from_dsn(&dsn)?,
            (None, None) => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Makes the configured engine the process-wide default
    pub fn install(&self) -> Result<SqlEngine, ConfigError> {
        self.validate()?;
        debug!(engine = %self.engine, dsn = ?self.dsn, "Installing builder configuration");
        set_default_engine(self.engine);
        Ok(self.engine)
    }
}

fn string_field<'a>(section: &'a Value, key: &str) -> Result<Option<&'a str>, ConfigError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(ConfigError::Settings(format!(
            "\"{key}\" must be a string, got {other}"
        ))),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Engine name or product name not recognized
    #[error(transparent)]
    UnknownEngine(#[from] UnknownEngine),

    /// Settings name no engine at all
    #[error("No SQL engine configured (set engine, productName or dsn)")]
    MissingEngine,

    /// Connection string unusable or inconsistent with the engine
    #[error("Invalid connection string '{dsn}': {reason}")]
    InvalidDsn { dsn: String, reason: String },

    /// Settings payload has the wrong shape
    #[error("Invalid settings: {0}")]
    Settings(String),
}
