//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellPos`] / [`CellRect`] - A cell's location and rectangular ranges
//! - [`CellStore`] - Row-major storage for one sheet

mod position;
mod store;
mod value;

pub use position::{column_index, column_name, CellPos, CellRect};
pub use store::CellStore;
pub use value::{CellKind, CellValue, SharedString, SortKey};
