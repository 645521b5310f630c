//! Parser for worksheet dimension lists (`sheet<TAB>area`, one per line).
//!
//! The areas are hints recorded by the workbook reader. They decide which
//! sheets appear in the navigation strip and in what order, but a report
//! always recomputes a sheet's extent from its data.

use crate::error::{GridviewError, Result};
use std::fs;
use std::path::Path;

/// Sheet names with their recorded area hints, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dimensions {
    entries: Vec<(String, String)>,
}

impl Dimensions {
    pub fn new() -> Dimensions {
        Dimensions::default()
    }

    /// Record a sheet. A repeated name keeps its first position and takes
    /// the newer hint.
    pub fn insert(&mut self, sheet: impl Into<String>, area: impl Into<String>) {
        let (sheet, area) = (sheet.into(), area.into());
        match self.entries.iter_mut().find(|(name, _)| *name == sheet) {
            Some(entry) => entry.1 = area,
            None => self.entries.push((sheet, area)),
        }
    }

    pub fn hint(&self, sheet: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, area)| area.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a dimensions file.
pub fn parse_dimensions(path: &Path) -> Result<Dimensions> {
    let content = fs::read_to_string(path)?;
    parse_dimensions_content(&content)
}

/// Parse dimensions from a string.
pub fn parse_dimensions_content(content: &str) -> Result<Dimensions> {
    let mut dimensions = Dimensions::new();

    for (line_num, line) in content.lines().enumerate() {
        // Skip empty lines and comments
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let Some((sheet, area)) = line.split_once('\t') else {
            return Err(GridviewError::Parse {
                line: line_num + 1,
                message: "Expected 'SHEET<TAB>AREA' format".to_string(),
            });
        };

        let sheet = sheet.trim();
        if sheet.is_empty() {
            return Err(GridviewError::Parse {
                line: line_num + 1,
                message: "Missing sheet name".to_string(),
            });
        }

        dimensions.insert(sheet, area.trim());
    }

    Ok(dimensions)
}
