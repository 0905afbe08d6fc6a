//! Per-sheet state
//!
//! A [`Sheet`] owns everything the UI needs for the active sheet. Cells and sizes sit
//! behind [`Arc`] so snapshots can share them; writes go through [`Arc::make_mut`] and
//! copy only when a snapshot still holds the old version.

use std::sync::Arc;

use tabgrid_core::{CellPos, CellStore, CellValue, DimensionTable, GridConfig};

use crate::edit::{EditSession, EditState, StartOutcome};
use crate::search::SearchResults;
use crate::selection::{GridBounds, SelectionModel};
use crate::sort::SortState;

/// One named grid plus its interaction state
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    pub(crate) cells: Arc<CellStore>,
    pub(crate) dimensions: Arc<DimensionTable>,
    pub(crate) selection: SelectionModel,
    pub(crate) search: SearchResults,
    pub(crate) sort: Option<SortState>,
    pub(crate) edit: EditState,
}

impl Sheet {
    /// Build a sheet from a decoded value matrix with default track sizes
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>, config: &GridConfig) -> Self {
        Self {
            name: name.into(),
            cells: Arc::new(CellStore::from_rows(rows)),
            dimensions: Arc::new(DimensionTable::with_config(config)),
            selection: SelectionModel::new(),
            search: SearchResults::default(),
            sort: None,
            edit: EditState::new(),
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cell store
    pub fn cells(&self) -> &CellStore {
        &self.cells
    }

    /// Track sizes
    pub fn dimensions(&self) -> &DimensionTable {
        &self.dimensions
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn search(&self) -> &SearchResults {
        &self.search
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    /// Clamping bounds for the current contents
    pub fn bounds(&self) -> GridBounds {
        GridBounds::of(&self.cells)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut CellStore {
        Arc::make_mut(&mut self.cells)
    }

    pub(crate) fn dimensions_mut(&mut self) -> &mut DimensionTable {
        Arc::make_mut(&mut self.dimensions)
    }

    /// Drop every piece of state that refers to cell coordinates
    ///
    /// Used after the cell layout changed underneath selection, search and edit.
    pub(crate) fn invalidate(&mut self) {
        self.selection.clear();
        self.search.clear();
        self.edit.cancel();
    }

    /// Open an edit on `pos`, flushing a session open on another cell first
    ///
    /// The store is only written (and so only copied) when a flush happens.
    pub(crate) fn begin_edit(&mut self, pos: CellPos, initial: impl Into<String>) -> StartOutcome {
        let outcome = match self.edit.session().map(EditSession::pos) {
            Some(open) if open == pos => return StartOutcome::Resumed,
            Some(open) => {
                self.commit_edit();
                StartOutcome::Flushed { committed: open }
            }
            None => StartOutcome::Started,
        };
        self.edit.open(pos, initial);
        outcome
    }

    /// Commit the open edit (if any) into the store
    ///
    /// Search results refer to the old contents and are dropped when a write happened.
    pub(crate) fn commit_edit(&mut self) -> Option<CellPos> {
        if !self.edit.is_editing() {
            return None;
        }
        let committed = self.edit.commit(Arc::make_mut(&mut self.cells));
        self.search.clear();
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::from_rows(
            "Data",
            vec![vec!["a".into(), "b".into()], vec!["c".into()]],
            &GridConfig::default(),
        )
    }

    #[test]
    fn test_copy_on_write_keeps_shared_store() {
        let mut sheet = sheet();
        let shared = Arc::clone(&sheet.cells);

        sheet.cells_mut().set(0, 0, CellValue::text("changed"));
        assert_eq!(shared.get(0, 0), &CellValue::text("a"));
        assert_eq!(sheet.cells().get(0, 0), &CellValue::text("changed"));
    }

    #[test]
    fn test_invalidate_clears_coordinate_state() {
        let mut sheet = sheet();
        let bounds = sheet.bounds();
        sheet.selection.begin(CellPos::new(1, 1), bounds);
        sheet.search = SearchResults::run(sheet.cells(), "a");
        let mut store = (*sheet.cells).clone();
        sheet.edit.start(CellPos::new(0, 0), "a", &mut store);

        sheet.invalidate();
        assert_eq!(sheet.selection().selection(), None);
        assert!(sheet.search().is_empty());
        assert!(!sheet.edit().is_editing());
    }

    #[test]
    fn test_begin_edit_flushes_other_cell() {
        let mut sheet = sheet();
        let held = Arc::clone(&sheet.cells);

        assert_eq!(sheet.begin_edit(CellPos::new(0, 0), "a"), StartOutcome::Started);
        assert!(Arc::ptr_eq(&held, &sheet.cells));
        sheet.edit.set_draft("A!");
        assert_eq!(sheet.begin_edit(CellPos::new(0, 0), "a"), StartOutcome::Resumed);

        let outcome = sheet.begin_edit(CellPos::new(1, 0), "c");
        assert_eq!(outcome, StartOutcome::Flushed { committed: CellPos::new(0, 0) });
        assert_eq!(sheet.cells().text_at(0, 0), "A!");
        assert_eq!(held.text_at(0, 0), "a");
    }

    #[test]
    fn test_commit_edit_clears_search() {
        let mut sheet = sheet();
        sheet.search = SearchResults::run(sheet.cells(), "b");
        let mut scratch = CellStore::new();
        sheet.edit.start(CellPos::new(1, 1), "", &mut scratch);
        sheet.edit.set_draft("new");

        assert_eq!(sheet.commit_edit(), Some(CellPos::new(1, 1)));
        assert!(sheet.search().is_empty());
        assert_eq!(sheet.cells().text_at(1, 1), "new");
    }
}
