//! Loader for workbook JSON produced by the parser/evaluator stages.
//!
//! ```json
//! {
//!   "title": "Model",
//!   "sheets": {
//!     "Sheet1": {
//!       "values":   { "A1": ["number", "1"] },
//!       "formulae": { "A1": ["arithmetic", ["number", "1"]] }
//!     }
//!   }
//! }
//! ```
//!
//! A formula array whose first element is a string is a tagged node; any other
//! array is an untagged sequence. Scalars are leaves.

use crate::error::{GridviewError, Result};
use crate::workbook::{Sheet, Workbook};
use gridview_engine::engine::{CellValue, Node, ValueKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const MAX_WORKBOOK_FILE_BYTES: u64 = 256 * 1_048_576; // 256 MiB

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkbookFile {
    title: Option<String>,
    sheets: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SheetFile {
    #[serde(default)]
    values: Map<String, Value>,
    #[serde(default)]
    formulae: Map<String, Value>,
}

/// Read a workbook JSON file.
pub fn parse_workbook(path: &Path) -> Result<Workbook> {
    let meta = fs::metadata(path)?;
    if meta.len() > MAX_WORKBOOK_FILE_BYTES {
        return Err(GridviewError::Workbook(format!(
            "Refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_WORKBOOK_FILE_BYTES
        )));
    }
    let content = fs::read_to_string(path)?;
    parse_workbook_content(&content)
}

/// Parse workbook JSON from a string.
pub fn parse_workbook_content(content: &str) -> Result<Workbook> {
    let file: WorkbookFile = serde_json::from_str(content)?;
    let mut workbook = Workbook::new();
    workbook.title = file.title;

    for (name, sheet_value) in file.sheets {
        let sheet_file: SheetFile = serde_json::from_value(sheet_value)?;
        let mut sheet = Sheet::new(name.as_str());

        for (reference, value) in &sheet_file.values {
            let value = value_from_json(value).map_err(|message| {
                GridviewError::Workbook(format!("sheet '{name}' value {reference}: {message}"))
            })?;
            sheet.insert_value(reference, value);
        }

        for (reference, formula) in &sheet_file.formulae {
            let node = node_from_json(formula).map_err(|message| {
                GridviewError::Workbook(format!("sheet '{name}' formula {reference}: {message}"))
            })?;
            sheet.insert_formula(reference, node);
        }

        workbook.push_sheet(sheet);
    }

    Ok(workbook)
}

/// Convert a JSON formula tree into a [`Node`].
pub fn node_from_json(value: &Value) -> std::result::Result<Node, String> {
    match value {
        Value::Array(items) => match items.split_first() {
            Some((Value::String(tag), args)) => Ok(Node::tagged(
                tag.as_str(),
                args.iter().map(node_from_json).collect::<std::result::Result<Vec<_>, _>>()?,
            )),
            _ => Ok(Node::Sequence(
                items.iter().map(node_from_json).collect::<std::result::Result<Vec<_>, _>>()?,
            )),
        },
        Value::Object(_) => Err("objects are not valid formula nodes".to_string()),
        scalar => Ok(Node::Leaf(scalar_text(scalar))),
    }
}

/// Convert a `[kind, literal]` pair into a [`CellValue`].
pub fn value_from_json(value: &Value) -> std::result::Result<CellValue, String> {
    match value.as_array().map(Vec::as_slice) {
        Some([Value::String(kind), literal]) if !literal.is_array() && !literal.is_object() => {
            Ok(CellValue::new(ValueKind::from_name(kind), scalar_text(literal)))
        }
        _ => Err(format!("expected [kind, literal], got {value}")),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
