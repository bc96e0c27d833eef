// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # PolySQL CLI
//!
//! Renders JSON-encoded statements for a chosen engine.
//!
//! ```text
//! polysql render --engine mssql query.json
//! echo '{"kind":"command","statement":{"keyword":"DB_NAME","params":{}}}' | polysql render -e postgresql
//! polysql engines
//! ```
//!
//! The input is either one serialized `SqlQuery` or a JSON array of them;
//! each rendered statement is printed on its own line.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polysql_dialect::{BuilderConfig, SqlBuilder, builder, default_builder};
use polysql_ir::{SqlEngine, SqlQuery};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(author, version, about = "Render portable SQL statements for a database engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render statements read from FILE, or stdin when omitted
    Render {
        /// Target engine; defaults to POLYSQL_ENGINE / POLYSQL_DSN
        #[arg(short, long, conflicts_with = "all")]
        engine: Option<SqlEngine>,

        /// Render for every supported engine
        #[arg(long)]
        all: bool,

        /// JSON file holding a statement or an array of statements
        file: Option<PathBuf>,
    },

    /// List supported engine names
    Engines,
}

/// Executes a parsed command line, returning the lines to print
pub fn run(cli: Cli) -> Result<Vec<String>> {
    match cli.command {
        Commands::Render { engine, all, file } => {
            let input = read_input(file.as_deref())?;
            let queries = parse_queries(&input)?;

            if all {
                let mut lines = Vec::new();
                for engine in SqlEngine::ALL {
                    for sql in render_queries(builder(engine), &queries)? {
                        lines.push(format!("{engine}: {sql}"));
                    }
                }
                return Ok(lines);
            }

            let b = match engine {
                Some(engine) => builder(engine),
                None => {
                    BuilderConfig::from_env()
                        .context("Invalid engine configuration in environment")?
                        .install()?;
                    default_builder()
                }
            };
            render_queries(b, &queries)
        }
        Commands::Engines => Ok(SqlEngine::ALL.iter().map(|e| e.to_string()).collect()),
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read statements from stdin")?;
            Ok(input)
        }
    }
}

/// Parses one statement or an array of statements
pub fn parse_queries(input: &str) -> Result<Vec<SqlQuery>> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;

    let queries = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item)
                    .with_context(|| format!("Statement {} is not a valid query", i + 1))
            })
            .collect::<Result<Vec<SqlQuery>>>()?,
        single => vec![serde_json::from_value(single).context("Input is not a valid query")?],
    };
    debug!(count = queries.len(), "Parsed statements");
    Ok(queries)
}

/// Renders every statement with the given builder
pub fn render_queries(b: &dyn SqlBuilder, queries: &[SqlQuery]) -> Result<Vec<String>> {
    queries
        .iter()
        .enumerate()
        .map(|(i, query)| {
            b.get_query(query).with_context(|| {
                format!(
                    "Failed to render {} statement {} for {}",
                    query.kind(),
                    i + 1,
                    b.engine()
                )
            })
        })
        .collect()
}
