//! Grid configuration

/// Default column width in layout units
pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

/// Default row height in layout units
pub const DEFAULT_ROW_HEIGHT: f64 = 28.0;

/// Narrowest a column can be resized to
pub const MIN_COLUMN_WIDTH: f64 = 50.0;

/// Shortest a row can be resized to
pub const MIN_ROW_HEIGHT: f64 = 20.0;

/// Width of the row-number gutter to the left of column A
pub const ROW_HEADER_WIDTH: f64 = 50.0;

/// Height of the column-letter header above row 1
pub const COLUMN_HEADER_HEIGHT: f64 = 28.0;

/// Track sizes and pane layout for a grid
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Width of a column without an override
    pub default_column_width: f64,
    /// Height of a row without an override
    pub default_row_height: f64,
    /// Lower bound for any column width
    pub min_column_width: f64,
    /// Lower bound for any row height
    pub min_row_height: f64,
    /// Row-number gutter width (frozen columns are offset by it)
    pub row_header_width: f64,
    /// Column header height (frozen rows are offset by it)
    pub column_header_height: f64,
    /// Number of leading rows pinned during scroll
    pub frozen_rows: usize,
    /// Number of leading columns pinned during scroll
    pub frozen_columns: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            min_column_width: MIN_COLUMN_WIDTH,
            min_row_height: MIN_ROW_HEIGHT,
            row_header_width: ROW_HEADER_WIDTH,
            column_header_height: COLUMN_HEADER_HEIGHT,
            frozen_rows: 1,
            frozen_columns: 1,
        }
    }
}
