//! Cell storage for a single sheet
//!
//! Rows are stored as they were decoded: a row may be shorter than the widest row of
//! the sheet. Every read past a row's stored length yields [`CellValue::Empty`], so
//! the sheet behaves as if all rows were padded to [`CellStore::max_cols`] without
//! paying for the padding.

use super::{CellPos, CellValue};

static EMPTY: CellValue = CellValue::Empty;

/// Row-major storage for the cells of one sheet
///
/// Invariant: the store always holds at least one row (possibly zero cells long).
#[derive(Debug, Clone, PartialEq)]
pub struct CellStore {
    rows: Vec<Vec<CellValue>>,
}

impl CellStore {
    /// Create a store holding a single empty row
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
        }
    }

    /// Create a store from decoded rows
    ///
    /// An empty matrix becomes a single empty row.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let mut store = Self { rows };
        store.ensure_row();
        store
    }

    /// Get a cell value; indices beyond the stored data read as empty
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Get a cell value at a position
    pub fn get_pos(&self, pos: CellPos) -> &CellValue {
        self.get(pos.row, pos.col)
    }

    /// Get a cell value from signed coordinates; negative indices read as empty
    pub fn get_signed(&self, row: i64, col: i64) -> &CellValue {
        match CellPos::from_signed(row, col) {
            Ok(pos) => self.get_pos(pos),
            Err(_) => &EMPTY,
        }
    }

    /// Display text of a cell (`""` for empty or absent cells)
    pub fn text_at(&self, row: usize, col: usize) -> String {
        self.get(row, col).display_text().into_owned()
    }

    /// Set a cell value
    ///
    /// Grows the addressed row, appending empty rows first when `row` is past the end,
    /// so the write always lands.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if row >= self.rows.len() {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if col >= cells.len() {
            if value.is_empty() {
                // already reads as empty
                return;
            }
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value;
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn max_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Column count used for addressing: at least one column even for an empty sheet
    pub fn column_extent(&self) -> usize {
        self.max_cols().max(1)
    }

    /// Borrow the rows as stored (not padded)
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Borrow one row as stored
    pub fn row(&self, row: usize) -> &[CellValue] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Atomically replace every row
    ///
    /// Dependent state (selection, search results) is the caller's responsibility.
    pub fn replace_rows(&mut self, rows: Vec<Vec<CellValue>>) {
        self.rows = rows;
        self.ensure_row();
    }

    /// Take the rows out, leaving a single empty row behind
    pub fn take_rows(&mut self) -> Vec<Vec<CellValue>> {
        std::mem::replace(&mut self.rows, vec![Vec::new()])
    }

    /// Insert an empty row at `index` (clamped to the end); returns the index used
    pub fn insert_row(&mut self, index: usize) -> usize {
        let index = index.min(self.rows.len());
        self.rows.insert(index, Vec::new());
        index
    }

    /// Remove the row at `index`
    ///
    /// Returns `None` when the index is out of range or the row is the last one left.
    pub fn remove_row(&mut self, index: usize) -> Option<Vec<CellValue>> {
        if index >= self.rows.len() || self.rows.len() <= 1 {
            return None;
        }
        Some(self.rows.remove(index))
    }

    /// Insert an empty column at `index` (clamped to [`CellStore::max_cols`]); returns the index used
    ///
    /// Only rows that physically store a cell at or past `index` need to move. Appending a
    /// column after the last one pads a single longest row so the sheet actually widens.
    pub fn insert_column(&mut self, index: usize) -> usize {
        let max_cols = self.max_cols();
        let index = index.min(max_cols);
        if index == max_cols {
            if let Some(row) = self.rows.iter_mut().find(|r| r.len() == max_cols) {
                row.push(CellValue::Empty);
            }
            return index;
        }
        for row in &mut self.rows {
            if index < row.len() {
                row.insert(index, CellValue::Empty);
            }
        }
        index
    }

    /// Remove the column at `index` from every row that stores it
    ///
    /// Returns `false` when the column is outside the sheet or it is the only column.
    pub fn remove_column(&mut self, index: usize) -> bool {
        let max_cols = self.max_cols();
        if index >= max_cols || max_cols <= 1 {
            return false;
        }
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    /// Export as a rectangular matrix padded to [`CellStore::max_cols`]
    pub fn to_matrix(&self) -> Vec<Vec<CellValue>> {
        let width = self.max_cols();
        self.rows
            .iter()
            .map(|row| {
                let mut padded = row.clone();
                padded.resize(width, CellValue::Empty);
                padded
            })
            .collect()
    }

    /// Iterate over every stored cell in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(c, value)| (CellPos::new(r, c), value))
        })
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.iter().filter(|(_, v)| !v.is_empty()).count()
    }

    fn ensure_row(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
    }
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}
