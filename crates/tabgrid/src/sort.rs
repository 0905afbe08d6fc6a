//! Column sort
//!
//! Rows are reordered physically; the row order in the store is the source of truth and
//! [`SortState`] only remembers the last sort so a repeated click can flip direction.

use std::fmt;

use tabgrid_core::{CellStore, CellValue, SortKey};

use crate::sheet::Sheet;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The last applied sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// Direction for a sort request on `column` given the previous sort
///
/// Descending only when the previous sort was ascending on the same column.
pub fn next_direction(previous: Option<SortState>, column: usize) -> SortDirection {
    match previous {
        Some(SortState {
            column: c,
            direction: SortDirection::Ascending,
        }) if c == column => SortDirection::Descending,
        _ => SortDirection::Ascending,
    }
}

/// Stable-sort the rows of `store` by `column`
///
/// Rows with equal keys keep their relative order in either direction. Each row's key is
/// built once before sorting.
pub fn sort_store(store: &mut CellStore, column: usize, direction: SortDirection) {
    let empty = CellValue::Empty;
    let mut keyed: Vec<(SortKey, Vec<CellValue>)> = store
        .take_rows()
        .into_iter()
        .map(|row| (SortKey::new(row.get(column).unwrap_or(&empty)), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Ascending => a.cmp(b),
        SortDirection::Descending => b.cmp(a),
    });
    store.replace_rows(keyed.into_iter().map(|(_, row)| row).collect());
}

impl Sheet {
    /// Sort the rows by `column`, toggling direction on a repeated request
    ///
    /// Selection, search results and any open edit are dropped.
    pub fn sort_by_column(&mut self, column: usize) -> SortState {
        let direction = next_direction(self.sort, column);
        self.invalidate();
        sort_store(self.cells_mut(), column, direction);
        let state = SortState { column, direction };
        self.sort = Some(state);
        log::debug!("sorted '{}' by column {} {}", self.name(), column, direction);
        state
    }
}
