//! Tab-separated serialization of a cell rectangle

use tabgrid_core::{CellRect, CellStore};

/// Text copied from a selection plus its shape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyReport {
    /// Tab-separated columns, newline-separated rows
    pub text: String,
    pub rows: usize,
    pub cols: usize,
}

impl CopyReport {
    /// Serialize `rect` from `store`
    pub fn from_rect(store: &CellStore, rect: CellRect) -> Self {
        Self {
            text: serialize_rect(store, rect),
            rows: rect.row_count(),
            cols: rect.col_count(),
        }
    }

    /// Whether nothing was copied
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

/// Render a rectangle in the tabular clipboard format
pub fn serialize_rect(store: &CellStore, rect: CellRect) -> String {
    (rect.min_row..=rect.max_row)
        .map(|row| {
            (rect.min_col..=rect.max_col)
                .map(|col| store.get(row, col).display_text())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
