//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "$B$2", "AA100") and 1-based column/row numbers. Absolute
//! markers (`$`) are accepted anywhere and ignored for arithmetic.
//!
//! # Examples
//!
//! ```ignore
//! let cell: CellRef = "$B$3".parse().unwrap();
//! assert_eq!(cell.col, 2);
//! assert_eq!(cell.row, 3);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors raised while parsing a cell reference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefError {
    #[error("Invalid cell reference: {0:?}")]
    Invalid(String),

    #[error("Cell reference out of range: {0:?}")]
    OutOfRange(String),
}

/// A reference to a cell by column and row numbers (1-based).
///
/// Field order matters: the derived ordering compares the row first, then the
/// column, which is the order cells are laid out in a report.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(col: u32, row: u32) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a reference such as `A1`, `$B$12` or `ab7`.
    pub fn parse(reference: &str) -> Result<CellRef, RefError> {
        let (letters, row) = split_reference(reference)?;
        let col = column_number(&letters)?;
        Ok(CellRef::new(col, row))
    }

    /// Column letters of this reference (`A`, `AB`, ...).
    pub fn column_letters(&self) -> String {
        column_letters(self.col)
    }
}

impl FromStr for CellRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellRef::parse(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell reference regex must compile")
    })
}

/// Split a reference into its upper-cased column letters and row number.
pub fn split_reference(reference: &str) -> Result<(String, u32), RefError> {
    let stripped = strip_absolute(reference.trim());
    let caps = reference_re()
        .captures(&stripped)
        .ok_or_else(|| RefError::Invalid(reference.to_string()))?;

    let row = caps["numbers"]
        .parse::<u32>()
        .map_err(|_| RefError::OutOfRange(reference.to_string()))?;
    if row == 0 {
        return Err(RefError::Invalid(reference.to_string()));
    }

    Ok((caps["letters"].to_ascii_uppercase(), row))
}

/// Convert column letters to a 1-based column number (A -> 1, Z -> 26, AA -> 27).
pub fn column_number(letters: &str) -> Result<u32, RefError> {
    if letters.is_empty() {
        return Err(RefError::Invalid(letters.to_string()));
    }
    let mut acc = 0u32;
    for c in letters.bytes() {
        if !c.is_ascii_alphabetic() {
            return Err(RefError::Invalid(letters.to_string()));
        }
        let digit = (c.to_ascii_uppercase() - b'A') as u32 + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| RefError::OutOfRange(letters.to_string()))?;
    }
    Ok(acc)
}

/// Convert a 1-based column number to letters (1 -> A, 26 -> Z, 27 -> AA).
/// Column 0 has no letters and yields an empty string.
pub fn column_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Remove absolute-reference markers, e.g. `$A$1` -> `A1`, `$A$1:B$2` -> `A1:B2`.
pub fn strip_absolute(reference: &str) -> String {
    reference.replace('$', "")
}
