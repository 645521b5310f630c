//! gridview_engine - Formula rendering and cell reference arithmetic.

pub mod engine;
