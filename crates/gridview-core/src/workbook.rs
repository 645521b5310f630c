//! In-memory workbook snapshot: evaluated values and formula trees per sheet.

use gridview_engine::engine::{CellRef, CellValue, Node, strip_absolute};
use std::collections::HashMap;

/// One sheet's values and formulae, keyed by cell reference.
///
/// Keys that parse as references are stored in canonical form, so `$a$1`,
/// `A01` and `A1` address the same cell. Other keys are kept as given
/// (trimmed and upper-cased) and only rejected once the sheet's dimensions
/// are computed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    values: HashMap<String, CellValue>,
    formulae: HashMap<String, Node>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Sheet {
        Sheet {
            name: name.into(),
            ..Sheet::default()
        }
    }

    pub fn insert_value(&mut self, reference: &str, value: CellValue) {
        self.values.insert(normalize_key(reference), value);
    }

    pub fn insert_formula(&mut self, reference: &str, formula: Node) {
        self.formulae.insert(normalize_key(reference), formula);
    }

    pub fn value(&self, cell: &CellRef) -> Option<&CellValue> {
        self.values.get(&cell.to_string())
    }

    pub fn formula(&self, cell: &CellRef) -> Option<&Node> {
        self.formulae.get(&cell.to_string())
    }

    /// References of every cell that has a value.
    pub fn value_keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn formula_count(&self) -> usize {
        self.formulae.len()
    }
}

fn normalize_key(reference: &str) -> String {
    CellRef::parse(reference)
        .map(|cell| cell.to_string())
        .unwrap_or_else(|_| strip_absolute(reference.trim()).to_ascii_uppercase())
}

/// All sheets of a workbook, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbook {
    pub title: Option<String>,
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Workbook {
        Workbook::default()
    }

    /// Add a sheet, replacing any existing sheet of the same name in place.
    pub fn push_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.name == sheet.name) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}
