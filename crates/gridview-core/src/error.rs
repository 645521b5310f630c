//! Error types for Gridview core.

use gridview_engine::engine::RefError;
use thiserror::Error;

/// Errors that can occur while loading a workbook or compiling a report
#[derive(Error, Debug)]
pub enum GridviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid workbook: {0}")]
    Workbook(String),

    #[error("Bad cell reference in sheet '{sheet}'")]
    Reference {
        sheet: String,
        #[source]
        source: RefError,
    },

    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("Sheet '{sheet}' spans {cells} cells, more than a report can hold")]
    GridTooLarge { sheet: String, cells: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GridviewError>;
