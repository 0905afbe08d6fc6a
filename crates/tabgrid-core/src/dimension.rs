//! Column widths and row heights
//!
//! Only overridden tracks are stored; everything else reports the configured default.
//! Overrides are keyed by logical index and follow their track across structural
//! inserts and deletes.

use std::collections::BTreeMap;

use crate::config::GridConfig;

/// A row or a column, considered as a resizable track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Row,
    Column,
}

/// Per-track size overrides for one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionTable {
    /// Custom column widths
    column_widths: BTreeMap<usize, f64>,
    /// Custom row heights
    row_heights: BTreeMap<usize, f64>,
    default_column_width: f64,
    default_row_height: f64,
    min_column_width: f64,
    min_row_height: f64,
}

impl DimensionTable {
    /// Create a table using the default [`GridConfig`]
    pub fn new() -> Self {
        Self::with_config(&GridConfig::default())
    }

    /// Create a table with the sizes from `config`
    pub fn with_config(config: &GridConfig) -> Self {
        Self {
            column_widths: BTreeMap::new(),
            row_heights: BTreeMap::new(),
            default_column_width: config.default_column_width,
            default_row_height: config.default_row_height,
            min_column_width: config.min_column_width,
            min_row_height: config.min_row_height,
        }
    }

    /// Get column width (returns default if not customized)
    pub fn width_of(&self, col: usize) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Get row height (returns default if not customized)
    pub fn height_of(&self, row: usize) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Size of a track on either axis
    pub fn size_of(&self, axis: Axis, index: usize) -> f64 {
        match axis {
            Axis::Row => self.height_of(index),
            Axis::Column => self.width_of(index),
        }
    }

    /// Grow or shrink a column by `delta`, never below the minimum width; returns the new width
    pub fn resize_column(&mut self, col: usize, delta: f64) -> f64 {
        self.set_column_width(col, self.width_of(col) + delta)
    }

    /// Grow or shrink a row by `delta`, never below the minimum height; returns the new height
    pub fn resize_row(&mut self, row: usize, delta: f64) -> f64 {
        self.set_row_height(row, self.height_of(row) + delta)
    }

    /// Set a column width, clamped to the minimum; returns the stored width
    pub fn set_column_width(&mut self, col: usize, width: f64) -> f64 {
        let width = clamp_size(width, self.min_column_width);
        store_override(&mut self.column_widths, col, width, self.default_column_width);
        width
    }

    /// Set a row height, clamped to the minimum; returns the stored height
    pub fn set_row_height(&mut self, row: usize, height: f64) -> f64 {
        let height = clamp_size(height, self.min_row_height);
        store_override(&mut self.row_heights, row, height, self.default_row_height);
        height
    }

    /// Re-index overrides after a track was inserted at `index`
    ///
    /// Overrides at or after `index` move one track further along.
    pub fn shift_on_insert(&mut self, axis: Axis, index: usize) {
        let map = self.overrides_mut(axis);
        let moved = map.split_off(&index);
        map.extend(moved.into_iter().map(|(i, size)| (i + 1, size)));
    }

    /// Re-index overrides after the track at `index` was deleted
    ///
    /// The deleted track's override is dropped; later overrides move back by one.
    pub fn shift_on_delete(&mut self, axis: Axis, index: usize) {
        let map = self.overrides_mut(axis);
        let mut moved = map.split_off(&index);
        moved.remove(&index);
        map.extend(moved.into_iter().map(|(i, size)| (i - 1, size)));
    }

    /// Distance from the first column to the left edge of `col`
    pub fn column_offset(&self, col: usize) -> f64 {
        track_offset(&self.column_widths, col, self.default_column_width)
    }

    /// Distance from the first row to the top edge of `row`
    pub fn row_offset(&self, row: usize) -> f64 {
        track_offset(&self.row_heights, row, self.default_row_height)
    }

    /// Get all custom column widths (column index → width)
    pub fn custom_column_widths(&self) -> &BTreeMap<usize, f64> {
        &self.column_widths
    }

    /// Get all custom row heights (row index → height)
    pub fn custom_row_heights(&self) -> &BTreeMap<usize, f64> {
        &self.row_heights
    }

    /// Drop every override
    pub fn clear(&mut self) {
        self.column_widths.clear();
        self.row_heights.clear();
    }

    fn overrides_mut(&mut self, axis: Axis) -> &mut BTreeMap<usize, f64> {
        match axis {
            Axis::Row => &mut self.row_heights,
            Axis::Column => &mut self.column_widths,
        }
    }
}

impl Default for DimensionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_size(size: f64, min: f64) -> f64 {
    // NaN deltas collapse to the minimum
    if size.is_nan() {
        min
    } else {
        size.max(min)
    }
}

fn store_override(map: &mut BTreeMap<usize, f64>, index: usize, size: f64, default: f64) {
    if (size - default).abs() < 0.001 {
        map.remove(&index);
    } else {
        map.insert(index, size);
    }
}

fn track_offset(map: &BTreeMap<usize, f64>, index: usize, default: f64) -> f64 {
    let adjustment: f64 = map.range(..index).map(|(_, size)| size - default).sum();
    index as f64 * default + adjustment
}
