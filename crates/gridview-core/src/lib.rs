//! gridview-core - Workbook model, loaders and HTML report compiler.

pub mod config;
pub mod error;
pub mod report;
pub mod storage;
pub mod workbook;

pub use config::ReportConfig;
pub use error::{GridviewError, Result};
pub use report::HtmlReport;
pub use workbook::{Sheet, Workbook};

pub use gridview_engine::engine::{Area, CellRef, CellValue, FormulaRenderer, Node};
