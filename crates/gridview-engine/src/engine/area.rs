//! Rectangular areas and their row-major grid layout.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::cell_ref::{CellRef, RefError, column_letters};

/// Upper bound on the number of cells a single grid may enumerate.
pub const MAX_GRID_CELLS: u64 = 10_000_000;

/// A rectangle of cells, `start` being the top-left and `finish` the
/// bottom-right corner. Only built through [`Area::new`], so `start` never
/// lies below or right of `finish`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct Area {
    start: CellRef,
    finish: CellRef,
}

/// One data row of a grid: its row number followed by its cells in column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRow {
    pub row: u32,
    pub cells: Vec<CellRef>,
}

/// Header labels plus data rows for an [`Area`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: Vec<String>,
    pub rows: Vec<GridRow>,
}

impl Area {
    /// Build an area from two corners, in any order.
    pub fn new(a: CellRef, b: CellRef) -> Area {
        Area {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            finish: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// Parse `A1:C10` (or a single reference `B2`). Absolute markers are ignored.
    pub fn parse(area: &str) -> Result<Area, RefError> {
        let area = area.trim();
        match area.split_once(':') {
            Some((start, finish)) => Ok(Area::new(start.parse()?, finish.parse()?)),
            None => {
                let cell: CellRef = area.parse()?;
                Ok(Area::new(cell, cell))
            }
        }
    }

    /// The smallest area anchored at `A1` that covers every reference.
    ///
    /// The bottom-right corner takes the largest row and the largest column
    /// independently, so it need not be one of the given references.
    /// Returns `None` when there are no references.
    pub fn bounding<'a, I>(refs: I) -> Option<Area>
    where
        I: IntoIterator<Item = &'a CellRef>,
    {
        let refs: Vec<&CellRef> = refs.into_iter().collect();
        let max_row = refs.iter().max()?.row;
        let max_col = refs.iter().max_by_key(|r| r.col)?.col;
        Some(Area::new(CellRef::new(1, 1), CellRef::new(max_col, max_row)))
    }

    /// Parse every reference and compute their [`Area::bounding`] rectangle.
    /// A single malformed reference fails the whole computation.
    pub fn bounding_keys<'a, I>(keys: I) -> Result<Option<Area>, RefError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let refs = keys
            .into_iter()
            .map(CellRef::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Area::bounding(&refs))
    }

    pub fn start(&self) -> CellRef {
        self.start
    }

    pub fn finish(&self) -> CellRef {
        self.finish
    }

    pub fn width(&self) -> u32 {
        self.finish.col - self.start.col + 1
    }

    pub fn height(&self) -> u32 {
        self.finish.row - self.start.row + 1
    }

    pub fn cell_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Enumerate the area row-major: a header of column labels and one
    /// [`GridRow`] per row, each cell appearing exactly once.
    pub fn grid(&self) -> GridLayout {
        let columns = (self.start.col..=self.finish.col)
            .map(column_letters)
            .collect();
        let rows = (self.start.row..=self.finish.row)
            .map(|row| GridRow {
                row,
                cells: (self.start.col..=self.finish.col)
                    .map(|col| CellRef::new(col, row))
                    .collect(),
            })
            .collect();
        GridLayout { columns, rows }
    }
}

impl FromStr for Area {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::parse(s)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(names: &[&str]) -> Vec<CellRef> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    #[test]
    fn test_bounding_takes_row_and_column_independently() {
        let area = Area::bounding(&refs(&["A1", "B1", "A10", "C5"])).unwrap();
        assert_eq!(area.to_string(), "A1:C10");
    }

    #[test]
    fn test_bounding_is_anchored_at_a1() {
        let area = Area::bounding(&refs(&["D4", "$E$2"])).unwrap();
        assert_eq!(area.start(), CellRef::new(1, 1));
        assert_eq!(area.finish(), CellRef::new(5, 4));
        assert_eq!(area.to_string(), "A1:E4");
    }

    #[test]
    fn test_bounding_of_nothing_is_none() {
        assert_eq!(Area::bounding(&[]), None);
    }

    #[test]
    fn test_bounding_keys_propagates_bad_reference() {
        let err = Area::bounding_keys(["A1", "oops", "B2"]).unwrap_err();
        assert_eq!(err, RefError::Invalid("oops".to_string()));
    }

    #[test]
    fn test_parse_area_and_single_cell() {
        assert_eq!(Area::parse("$A$1:C10").unwrap().to_string(), "A1:C10");
        assert_eq!(Area::parse("B2").unwrap().to_string(), "B2:B2");
        assert_eq!(Area::parse(" A1:B2\n").unwrap().to_string(), "A1:B2");
        assert!(Area::parse("A1:").is_err());
    }

    #[test]
    fn test_backwards_area_is_normalised() {
        let area = Area::parse("C3:A1").unwrap();
        assert_eq!(area.to_string(), "A1:C3");
        assert_eq!(area.cell_count(), 9);
    }

    #[test]
    fn test_grid_is_row_major_and_complete() {
        let grid = Area::parse("A1:C2").unwrap().grid();
        assert_eq!(grid.columns, vec!["A", "B", "C"]);
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0].row, 1);
        assert_eq!(grid.rows[1].row, 2);

        let flat: Vec<String> = grid
            .rows
            .iter()
            .flat_map(|r| r.cells.iter().map(|c| c.to_string()))
            .collect();
        assert_eq!(flat, vec!["A1", "B1", "C1", "A2", "B2", "C2"]);
    }

    #[test]
    fn test_grid_of_offset_area() {
        let grid = Area::parse("Y9:AA10").unwrap().grid();
        assert_eq!(grid.columns, vec!["Y", "Z", "AA"]);
        assert_eq!(grid.rows[0].cells[2].to_string(), "AA9");
        assert_eq!(grid.rows[1].row, 10);
    }

    #[test]
    fn test_corners_are_ordered_whichever_way_given() {
        let area = Area::new(CellRef::new(3, 1), CellRef::new(1, 4));
        assert_eq!(area.start(), CellRef::new(1, 1));
        assert_eq!(area.finish(), CellRef::new(3, 4));
        assert_eq!((area.width(), area.height()), (3, 4));
    }
}
