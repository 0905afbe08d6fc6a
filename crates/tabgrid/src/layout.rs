//! Frozen-pane geometry
//!
//! The leading rows and columns stay pinned while the rest of the grid scrolls. A renderer
//! positions a pinned track at a sticky offset measured from the grid's top-left corner,
//! past the row-number gutter and the column header.

use tabgrid_core::{column_name, DimensionTable, GridConfig};

/// Frozen rows and columns plus the header sizes they are offset by
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrozenPanes {
    /// Number of leading rows pinned
    pub rows: usize,
    /// Number of leading columns pinned
    pub columns: usize,
    row_header_width: f64,
    column_header_height: f64,
}

impl Default for FrozenPanes {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl FrozenPanes {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            rows: config.frozen_rows,
            columns: config.frozen_columns,
            row_header_width: config.row_header_width,
            column_header_height: config.column_header_height,
        }
    }

    pub fn is_frozen_row(&self, row: usize) -> bool {
        row < self.rows
    }

    pub fn is_frozen_column(&self, col: usize) -> bool {
        col < self.columns
    }

    /// Sticky left offset of a frozen column; `None` for a scrolling column
    pub fn column_left(&self, col: usize, dimensions: &DimensionTable) -> Option<f64> {
        self.is_frozen_column(col)
            .then(|| self.row_header_width + dimensions.column_offset(col))
    }

    /// Sticky top offset of a frozen row; `None` for a scrolling row
    pub fn row_top(&self, row: usize, dimensions: &DimensionTable) -> Option<f64> {
        self.is_frozen_row(row)
            .then(|| self.column_header_height + dimensions.row_offset(row))
    }

    /// Total width pinned at the left edge, gutter included
    pub fn frozen_width(&self, dimensions: &DimensionTable) -> f64 {
        self.row_header_width + dimensions.column_offset(self.columns)
    }

    /// Total height pinned at the top edge, header included
    pub fn frozen_height(&self, dimensions: &DimensionTable) -> f64 {
        self.column_header_height + dimensions.row_offset(self.rows)
    }
}

/// Header labels `A, B, .., Z, AA, ..` for the first `count` columns
pub fn column_labels(count: usize) -> Vec<String> {
    (0..count).map(column_name).collect()
}
