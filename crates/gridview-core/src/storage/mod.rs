//! Input loaders.

mod dimensions;
mod json;

pub use dimensions::{Dimensions, parse_dimensions, parse_dimensions_content};
pub use json::{node_from_json, parse_workbook, parse_workbook_content, value_from_json};
