//! # tabgrid
//!
//! A renderer-agnostic spreadsheet grid engine.
//!
//! The engine turns decoded workbooks into an interactive grid state machine. A UI layer
//! issues commands against a [`SheetController`] and draws the [`Snapshot`] each command
//! returns.
//!
//! ## Features
//!
//! - Rectangular range selection with pointer drag and keyboard navigation
//! - In-place cell editing with commit/cancel
//! - Column width / row height overrides and frozen-pane offsets
//! - Case-insensitive search with match-to-match navigation
//! - Stable column sort that toggles direction
//! - Row and column insert/delete that keep dependent state consistent
//! - Tab-separated copy and numeric selection statistics
//!
//! File decoding is left to a [`WorkbookDecoder`] supplied by the caller.
//!
//! ## Example
//!
//! ```rust
//! use tabgrid::prelude::*;
//!
//! let mut grid = SheetController::new();
//! grid.load_sheet(
//!     "Scores",
//!     vec![
//!         vec!["name".into(), "score".into()],
//!         vec!["Ann".into(), 91.into()],
//!         vec!["Bob".into(), 78.into()],
//!     ],
//! )
//! .unwrap();
//!
//! grid.select_begin(1, 0, false).unwrap();
//! grid.select_extend(2, 1).unwrap();
//! grid.select_end().unwrap();
//!
//! assert_eq!(grid.copy_selection().unwrap().text, "Ann\t91\nBob\t78");
//! assert_eq!(grid.selection_stats().unwrap().map(|s| s.sum), Some(169.0));
//! ```

pub mod clipboard;
pub mod controller;
pub mod edit;
pub mod layout;
pub mod mutation;
pub mod prelude;
pub mod search;
pub mod selection;
pub mod sheet;
pub mod snapshot;
pub mod sort;
pub mod source;
pub mod stats;

pub use clipboard::{serialize_rect, CopyReport};
pub use controller::SheetController;
pub use edit::{EditSession, EditState, StartOutcome};
pub use layout::{column_labels, FrozenPanes};
pub use mutation::{MutationOutcome, Refusal};
pub use search::{find_matches, SearchResults};
pub use selection::{GridBounds, PointerState, Selection, SelectionModel};
pub use sheet::Sheet;
pub use snapshot::{LoadState, Notice, Snapshot};
pub use sort::{next_direction, sort_store, SortDirection, SortState};
pub use source::{RawSheet, RawWorkbook, WorkbookDecoder};
pub use stats::{detect_column_kind, ColumnKind, SelectionStats};

// Re-export core types
pub use tabgrid_core::{
    column_index, column_name, Axis, CellKind, CellPos, CellRect, CellStore, CellValue,
    DimensionTable, Error, GridConfig, Result, SharedString, SortKey,
};
