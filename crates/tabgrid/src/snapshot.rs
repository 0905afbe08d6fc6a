//! Immutable render state
//!
//! Every controller command returns a [`Snapshot`]. Cells and sizes are shared with the
//! controller through [`Arc`]; later mutations copy on write, so a snapshot never changes
//! once taken.

use std::fmt;
use std::sync::Arc;

use tabgrid_core::{Axis, CellPos, CellRect, CellStore, CellValue, DimensionTable};

use crate::edit::EditSession;
use crate::layout::FrozenPanes;
use crate::mutation::Refusal;
use crate::search::SearchResults;
use crate::selection::{PointerState, Selection};
use crate::sort::{SortDirection, SortState};

/// Workbook loading lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    /// Nothing loaded yet
    #[default]
    Empty,
    /// A decode is in flight; mutating commands are rejected
    Loading,
    /// A sheet is active
    Ready,
    /// The last load failed; the previous sheet (if any) stays active
    Failed(String),
}

/// Feedback about the command that produced a snapshot
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notice {
    Loaded { sheets: usize },
    SheetSwitched(String),
    LoadFailed(String),
    RowInserted(usize),
    RowDeleted(usize),
    ColumnInserted(usize),
    ColumnDeleted(usize),
    Resized { axis: Axis, index: usize, size: f64 },
    Refused(Refusal),
    Sorted { column: usize, direction: SortDirection },
    Matches(usize),
    NoMatches,
    SearchMatch { position: CellPos, index: usize, total: usize },
    EditCommitted(CellPos),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Loaded { sheets } => write!(f, "Loaded {sheets} sheet(s)"),
            Notice::SheetSwitched(name) => write!(f, "Switched to {name}"),
            Notice::LoadFailed(reason) => write!(f, "Load failed: {reason}"),
            Notice::RowInserted(row) => write!(f, "Inserted row {}", row + 1),
            Notice::RowDeleted(row) => write!(f, "Deleted row {}", row + 1),
            Notice::ColumnInserted(col) => {
                write!(f, "Inserted column {}", tabgrid_core::column_name(*col))
            }
            Notice::ColumnDeleted(col) => {
                write!(f, "Deleted column {}", tabgrid_core::column_name(*col))
            }
            Notice::Resized { axis, index, size } => write!(f, "{axis:?} {index} is now {size}"),
            Notice::Refused(refusal) => write!(f, "Refused: {refusal}"),
            Notice::Sorted { column, direction } => write!(
                f,
                "Sorted by column {} ({direction})",
                tabgrid_core::column_name(*column)
            ),
            Notice::Matches(n) => write!(f, "Found {n} match(es)"),
            Notice::NoMatches => f.write_str("No matches found"),
            Notice::SearchMatch { position, index, total } => {
                write!(f, "Match {} of {total} at {position}", index + 1)
            }
            Notice::EditCommitted(pos) => write!(f, "Updated {pos}"),
        }
    }
}

/// Everything a renderer needs to draw the active sheet
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub load_state: LoadState,
    pub sheet_names: Arc<[String]>,
    pub active_sheet: Option<String>,
    pub cells: Arc<CellStore>,
    pub dimensions: Arc<DimensionTable>,
    pub selection: Option<Selection>,
    pub pointer: PointerState,
    pub search: SearchResults,
    pub sort: Option<SortState>,
    pub edit: Option<EditSession>,
    pub panes: FrozenPanes,
    pub notice: Option<Notice>,
}

impl Snapshot {
    /// Value at a cell; absent cells read as empty
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.cells.get(row, col)
    }

    pub fn row_count(&self) -> usize {
        self.cells.row_count()
    }

    pub fn max_cols(&self) -> usize {
        self.cells.max_cols()
    }

    pub fn column_width(&self, col: usize) -> f64 {
        self.dimensions.width_of(col)
    }

    pub fn row_height(&self, row: usize) -> f64 {
        self.dimensions.height_of(row)
    }

    /// Normalized selection rectangle
    pub fn selection_bounds(&self) -> Option<CellRect> {
        self.selection.map(|s| s.bounds())
    }

    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selection.is_some_and(|s| s.contains(row, col))
    }

    pub fn is_match(&self, row: usize, col: usize) -> bool {
        self.search.is_match(row, col)
    }

    /// Whether the cell is the active search match
    pub fn is_current_match(&self, row: usize, col: usize) -> bool {
        self.search.current() == Some(CellPos::new(row, col))
    }

    pub fn is_editing(&self, row: usize, col: usize) -> bool {
        self.edit
            .as_ref()
            .is_some_and(|e| e.pos() == CellPos::new(row, col))
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }
}
