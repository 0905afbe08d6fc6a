//! Structural mutation: inserting and deleting rows and columns
//!
//! Every successful mutation re-indexes size overrides with their track and clears
//! selection, search results and any open edit, since their coordinates may no longer
//! exist. Refusals leave the sheet untouched.

use std::fmt;

use tabgrid_core::{Axis, Error, Result};

use crate::sheet::Sheet;

/// Why a mutation was turned into a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Refusal {
    /// Deleting the only remaining row
    LastRow,
    /// Deleting the only remaining column
    LastColumn,
    /// Deleting a track that does not exist
    OutOfBounds { axis: Axis, index: usize },
    /// Resizing a track that does not exist
    NoSuchTrack { axis: Axis, index: usize },
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::LastRow => f.write_str("cannot delete the last row"),
            Refusal::LastColumn => f.write_str("cannot delete the last column"),
            Refusal::OutOfBounds { axis, index } => {
                write!(f, "{axis:?} {index} is outside the sheet")
            }
            Refusal::NoSuchTrack { axis, index } => {
                write!(f, "{axis:?} {index} cannot be resized")
            }
        }
    }
}

/// Result of a structural mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The track was inserted at this index
    Inserted { axis: Axis, index: usize },
    /// The track at this index was removed
    Deleted { axis: Axis, index: usize },
    /// Nothing changed
    Refused(Refusal),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, MutationOutcome::Refused(_))
    }
}

/// Index a new track lands at when inserted after `after` (`-1` inserts at the front)
fn insertion_index(axis: Axis, after: i64) -> Result<usize> {
    if after < -1 {
        return Err(Error::invalid_track(axis, after));
    }
    usize::try_from(after.saturating_add(1)).map_err(|_| Error::invalid_track(axis, after))
}

fn track_index(axis: Axis, index: i64) -> Result<usize> {
    usize::try_from(index).map_err(|_| Error::invalid_track(axis, index))
}

impl Sheet {
    /// Insert an empty row after `after`
    ///
    /// `after >= row_count` appends at the end.
    pub fn insert_row(&mut self, after: i64) -> Result<MutationOutcome> {
        let requested = insertion_index(Axis::Row, after)?;
        let index = self.cells_mut().insert_row(requested);
        self.dimensions_mut().shift_on_insert(Axis::Row, index);
        self.invalidate();
        log::debug!("inserted row {} in '{}'", index, self.name());
        Ok(MutationOutcome::Inserted { axis: Axis::Row, index })
    }

    /// Delete the row at `index`; refused for the last row or an index past the end
    pub fn delete_row(&mut self, index: i64) -> Result<MutationOutcome> {
        let index = track_index(Axis::Row, index)?;
        let rows = self.cells().row_count();
        if index >= rows {
            return Ok(self.refuse(Refusal::OutOfBounds { axis: Axis::Row, index }));
        }
        if rows <= 1 {
            return Ok(self.refuse(Refusal::LastRow));
        }

        self.cells_mut().remove_row(index);
        self.dimensions_mut().shift_on_delete(Axis::Row, index);
        self.invalidate();
        log::debug!("deleted row {} in '{}'", index, self.name());
        Ok(MutationOutcome::Deleted { axis: Axis::Row, index })
    }

    /// Insert an empty column after `after`
    ///
    /// `after >= max_cols` appends a column at the right edge.
    pub fn insert_column(&mut self, after: i64) -> Result<MutationOutcome> {
        let requested = insertion_index(Axis::Column, after)?;
        let index = self.cells_mut().insert_column(requested);
        self.dimensions_mut().shift_on_insert(Axis::Column, index);
        self.invalidate();
        log::debug!("inserted column {} in '{}'", index, self.name());
        Ok(MutationOutcome::Inserted { axis: Axis::Column, index })
    }

    /// Delete the column at `index`; refused for the last column or an index past the edge
    pub fn delete_column(&mut self, index: i64) -> Result<MutationOutcome> {
        let index = track_index(Axis::Column, index)?;
        let cols = self.cells().max_cols();
        if cols <= 1 {
            return Ok(self.refuse(Refusal::LastColumn));
        }
        if index >= cols {
            return Ok(self.refuse(Refusal::OutOfBounds { axis: Axis::Column, index }));
        }

        self.cells_mut().remove_column(index);
        self.dimensions_mut().shift_on_delete(Axis::Column, index);
        self.invalidate();
        log::debug!("deleted column {} in '{}'", index, self.name());
        Ok(MutationOutcome::Deleted { axis: Axis::Column, index })
    }

    fn refuse(&self, refusal: Refusal) -> MutationOutcome {
        log::warn!("refused mutation on '{}': {}", self.name(), refusal);
        MutationOutcome::Refused(refusal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabgrid_core::{CellPos, CellValue, GridConfig};

    use crate::search::SearchResults;

    fn sheet(rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet::from_rows("Sheet1", rows, &GridConfig::default())
    }

    fn grid() -> Sheet {
        sheet(vec![
            vec!["a".into(), "b".into(), "c".into()],
            vec!["d".into(), "e".into(), "f".into()],
        ])
    }

    #[test]
    fn test_insert_row_at_front() {
        let mut sheet = grid();
        let outcome = sheet.insert_row(-1).unwrap();
        assert_eq!(outcome, MutationOutcome::Inserted { axis: Axis::Row, index: 0 });
        assert_eq!(sheet.cells().row_count(), 3);
        assert_eq!(sheet.cells().text_at(0, 0), "");
        assert_eq!(sheet.cells().text_at(1, 0), "a");
    }

    #[test]
    fn test_insert_row_past_end_appends() {
        let mut sheet = grid();
        let outcome = sheet.insert_row(50).unwrap();
        assert_eq!(outcome, MutationOutcome::Inserted { axis: Axis::Row, index: 2 });
        assert_eq!(sheet.cells().row_count(), 3);
    }

    #[test]
    fn test_insert_below_minus_one_is_error() {
        let mut sheet = grid();
        assert_eq!(sheet.insert_row(-2), Err(Error::invalid_track(Axis::Row, -2)));
        assert_eq!(sheet.insert_column(-5), Err(Error::invalid_track(Axis::Column, -5)));
        assert_eq!(sheet.delete_row(-1), Err(Error::invalid_track(Axis::Row, -1)));
    }

    #[test]
    fn test_delete_last_row_refused() {
        let mut sheet = sheet(vec![vec!["only".into()]]);
        assert_eq!(sheet.delete_row(0).unwrap(), MutationOutcome::Refused(Refusal::LastRow));
        assert_eq!(sheet.cells().text_at(0, 0), "only");
    }

    #[test]
    fn test_delete_last_column_refused() {
        let mut sheet = sheet(vec![vec!["x".into()], vec!["y".into()]]);
        assert_eq!(
            sheet.delete_column(0).unwrap(),
            MutationOutcome::Refused(Refusal::LastColumn)
        );
        assert_eq!(sheet.cells().max_cols(), 1);
    }

    #[test]
    fn test_delete_out_of_range_refused() {
        let mut sheet = grid();
        assert_eq!(
            sheet.delete_row(2).unwrap(),
            MutationOutcome::Refused(Refusal::OutOfBounds { axis: Axis::Row, index: 2 })
        );
        assert_eq!(
            sheet.delete_column(7).unwrap(),
            MutationOutcome::Refused(Refusal::OutOfBounds { axis: Axis::Column, index: 7 })
        );
    }

    #[test]
    fn test_column_insert_and_delete() {
        let mut sheet = grid();
        sheet.insert_column(0).unwrap();
        assert_eq!(sheet.cells().max_cols(), 4);
        assert_eq!(sheet.cells().text_at(0, 1), "");
        assert_eq!(sheet.cells().text_at(0, 2), "b");

        sheet.delete_column(1).unwrap();
        assert_eq!(sheet.cells().to_matrix(), grid().cells().to_matrix());
    }

    #[test]
    fn test_overrides_follow_their_track() {
        let mut sheet = grid();
        sheet.dimensions_mut().set_column_width(1, 180.0);
        sheet.dimensions_mut().set_row_height(1, 40.0);

        sheet.insert_column(-1).unwrap();
        assert_eq!(sheet.dimensions().width_of(2), 180.0);
        assert_eq!(sheet.dimensions().width_of(1), 100.0);

        sheet.insert_row(-1).unwrap();
        assert_eq!(sheet.dimensions().height_of(2), 40.0);

        sheet.delete_row(2).unwrap();
        assert!(sheet.dimensions().custom_row_heights().is_empty());
    }

    #[test]
    fn test_mutation_invalidates_selection_search_and_edit() {
        let mut sheet = grid();
        let bounds = sheet.bounds();
        sheet.selection.begin(CellPos::new(1, 1), bounds);
        sheet.search = SearchResults::run(sheet.cells(), "e");
        let mut scratch = sheet.cells().clone();
        sheet.edit.start(CellPos::new(0, 0), "a", &mut scratch);

        sheet.insert_row(0).unwrap();
        assert_eq!(sheet.selection().selection(), None);
        assert!(sheet.search().is_empty());
        assert!(!sheet.edit().is_editing());
    }

    #[test]
    fn test_refusal_keeps_selection() {
        let mut sheet = sheet(vec![vec!["only".into()]]);
        let bounds = sheet.bounds();
        sheet.selection.begin(CellPos::new(0, 0), bounds);
        sheet.delete_row(0).unwrap();
        assert!(sheet.selection().selection().is_some());
    }
}
