//! # tabgrid-core
//!
//! Core data structures for the tabgrid spreadsheet grid engine.
//!
//! This crate provides the leaf types the engine is built from:
//! - [`CellValue`] - Tagged cell values (text, number, boolean, empty)
//! - [`CellPos`] and [`CellRect`] - Cell addressing and rectangles
//! - [`CellStore`] - The 2-D cell store of one sheet, with ragged rows read as padded
//! - [`DimensionTable`] - Column width / row height overrides
//! - [`GridConfig`] - Default and minimum track sizes, pane layout
//!
//! ## Example
//!
//! ```rust
//! use tabgrid_core::{CellStore, CellValue, DimensionTable};
//!
//! let mut store = CellStore::from_rows(vec![vec!["Name".into(), "Qty".into()]]);
//! store.set(1, 1, CellValue::Number(3.0));
//!
//! assert_eq!(store.row_count(), 2);
//! assert_eq!(store.get(1, 0), &CellValue::Empty);
//!
//! let mut dims = DimensionTable::new();
//! assert_eq!(dims.resize_column(0, -10_000.0), 50.0);
//! ```

pub mod cell;
pub mod config;
pub mod dimension;
pub mod error;

// Re-exports for convenience
pub use cell::{
    column_index, column_name, CellKind, CellPos, CellRect, CellStore, CellValue, SharedString,
    SortKey,
};
pub use config::{
    GridConfig, COLUMN_HEADER_HEIGHT, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, MIN_COLUMN_WIDTH,
    MIN_ROW_HEIGHT, ROW_HEADER_WIDTH,
};
pub use dimension::{Axis, DimensionTable};
pub use error::{Error, Result};
