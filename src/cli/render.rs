//! Render notation queries as DQL, SQL, or both

use std::str::FromStr;

use super::{CliError, query_to_json};
use crate::parse_query;

/// Which rendering the render command prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Normalized notation
    Dql,
    /// SQL SELECT statement
    #[default]
    Sql,
    /// Notation followed by SQL
    Both,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dql" | "notation" => Ok(Self::Dql),
            "sql" => Ok(Self::Sql),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown format '{}' (expected dql, sql or both)", other)),
        }
    }
}

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// The notation query, e.g. `sales[by(region)]`
    pub query: Option<String>,
    /// Output rendering
    pub format: OutputFormat,
    /// Emit a JSON object instead of plain text
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a render operation
#[derive(Debug)]
pub enum RenderResult {
    /// Plain text lines
    Text(String),
    /// JSON description of the query
    Json(serde_json::Value),
}

impl RenderResult {
    /// Text to print for this result.
    pub fn to_output(&self, pretty: bool) -> Result<String, CliError> {
        match self {
            RenderResult::Text(text) => Ok(text.clone()),
            RenderResult::Json(value) if pretty => Ok(serde_json::to_string_pretty(value)?),
            RenderResult::Json(value) => Ok(serde_json::to_string(value)?),
        }
    }
}

/// Execute a render operation
pub fn execute_render(options: &RenderOptions) -> Result<RenderResult, CliError> {
    let text = options.query.as_deref().ok_or(CliError::NoInput)?;
    let text = text.trim();
    if text.is_empty() {
        return Err(CliError::NoInput);
    }

    let query = parse_query(text)?;
    tracing::debug!(table = query.table(), directives = query.len(), "parsed query");

    if options.json {
        return Ok(RenderResult::Json(query_to_json(&query)));
    }

    let output = match options.format {
        OutputFormat::Dql => query.dql(),
        OutputFormat::Sql => query.sql(),
        OutputFormat::Both => format!("{}\n{}", query.dql(), query.sql()),
    };
    Ok(RenderResult::Text(output))
}
