//! CLI support for dataquery
//!
//! Provides programmatic access to the `dataquery` command so other tools
//! can embed it without shelling out.

mod convert;
mod docs;
mod render;

pub use convert::query_to_json;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use render::{OutputFormat, RenderOptions, RenderResult, execute_render};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Notation could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No query provided
    #[error("No query provided. Pass a query argument or pipe one to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'dataquery docs' to see available categories.")]
    UnknownCategory(String),
}
