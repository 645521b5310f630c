//! Formula rendering and grid arithmetic.
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation <-> column/row numbers)
//! - [`Area`], [`GridLayout`] - Bounding areas and row-major grid enumeration
//! - [`Node`] - Formula syntax tree
//! - [`FormulaRenderer`] - Syntax tree to linked HTML
//! - [`format_value`] - Format evaluated values for display

mod area;
mod cell_ref;
mod format;
mod node;
mod render;

pub use area::{Area, GridLayout, GridRow, MAX_GRID_CELLS};
pub use cell_ref::{CellRef, RefError, column_letters, column_number, split_reference, strip_absolute};
pub use format::{CellValue, ValueKind, format_rounded, format_value};
pub use node::Node;
pub use render::{FormulaRenderer, Tag, page_href};
