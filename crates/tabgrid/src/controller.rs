//! The command surface a UI drives
//!
//! [`SheetController`] owns the loaded workbook and the active [`Sheet`]. Every command
//! runs to completion and returns a fresh [`Snapshot`]; loading is the only step that
//! spans commands, and while it is in flight everything but reads is rejected.

use std::sync::Arc;

use tabgrid_core::{Axis, CellPos, CellStore, CellValue, DimensionTable, Error, GridConfig, Result};

use crate::clipboard::CopyReport;
use crate::edit::StartOutcome;
use crate::layout::FrozenPanes;
use crate::mutation::{MutationOutcome, Refusal};
use crate::search::SearchResults;
use crate::sheet::Sheet;
use crate::snapshot::{LoadState, Notice, Snapshot};
use crate::source::{RawSheet, RawWorkbook, WorkbookDecoder};
use crate::stats::{detect_column_kind, ColumnKind, SelectionStats};

/// Owner of all grid state for one viewer
#[derive(Debug, Clone)]
pub struct SheetController {
    config: GridConfig,
    workbook: Option<RawWorkbook>,
    sheet_names: Arc<[String]>,
    sheet: Option<Sheet>,
    load_state: LoadState,
}

impl Default for SheetController {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetController {
    /// Create a controller with the default [`GridConfig`]
    pub fn new() -> Self {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Self {
        Self {
            config,
            workbook: None,
            sheet_names: Arc::from(Vec::new()),
            sheet: None,
            load_state: LoadState::Empty,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The active sheet, if one is loaded
    pub fn sheet(&self) -> Option<&Sheet> {
        self.sheet.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    // ----- Loading -----

    /// Mark a decode as in flight
    pub fn begin_load(&mut self) -> Result<Snapshot> {
        self.load_state = LoadState::Loading;
        log::debug!("workbook load started");
        Ok(self.emit(None))
    }

    /// Abandon an in-flight load; the previous state comes back unchanged
    pub fn cancel_load(&mut self) -> Result<Snapshot> {
        if self.load_state == LoadState::Loading {
            self.load_state = self.settled_state();
            log::debug!("workbook load cancelled");
        }
        Ok(self.emit(None))
    }

    /// Install a decoded workbook and activate its first sheet
    ///
    /// Replaces everything atomically. A workbook without sheets is a failed load.
    pub fn load_workbook(&mut self, workbook: RawWorkbook) -> Result<Snapshot> {
        let Some(first) = workbook.first() else {
            return Err(self.record_failure("workbook contains no sheets"));
        };

        let sheet = Sheet::from_rows(first.name.clone(), first.rows.clone(), &self.config);
        let count = workbook.sheets.len();
        log::debug!(
            "loaded workbook with {} sheet(s); active '{}' is {}x{}",
            count,
            sheet.name(),
            sheet.cells().row_count(),
            sheet.cells().max_cols()
        );

        self.sheet_names = workbook.sheets.iter().map(|s| s.name.clone()).collect();
        self.workbook = Some(workbook);
        self.sheet = Some(sheet);
        self.load_state = LoadState::Ready;
        Ok(self.emit(Some(Notice::Loaded { sheets: count })))
    }

    /// Load a single sheet from a value matrix
    pub fn load_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Result<Snapshot> {
        self.load_workbook(RawWorkbook::new(vec![RawSheet::new(name, rows)]))
    }

    /// Decode `bytes` with `decoder` and load the result
    ///
    /// A decoder error is recorded as a failed load and returned.
    pub fn load_from<D>(&mut self, decoder: &D, bytes: &[u8]) -> Result<Snapshot>
    where
        D: WorkbookDecoder + ?Sized,
    {
        match decoder.decode(bytes) {
            Ok(workbook) => self.load_workbook(workbook),
            Err(Error::DecodeFailure(reason)) => Err(self.record_failure(reason)),
            Err(e) => Err(self.record_failure(e.to_string())),
        }
    }

    /// Report that the external decoder failed; the previous sheet stays active
    pub fn fail_load(&mut self, reason: impl Into<String>) -> Result<Snapshot> {
        let reason = reason.into();
        self.record_failure(reason.clone());
        Ok(self.emit(Some(Notice::LoadFailed(reason))))
    }

    /// Make another sheet of the loaded workbook active
    ///
    /// The sheet is rebuilt from its decoded matrix; changes made to the previous sheet are
    /// not carried over.
    pub fn switch_sheet(&mut self, name: &str) -> Result<Snapshot> {
        self.ensure_idle()?;
        let workbook = self.workbook.as_ref().ok_or(Error::NoActiveSheet)?;
        let raw = workbook.sheet(name)?;
        let sheet = Sheet::from_rows(raw.name.clone(), raw.rows.clone(), &self.config);
        log::debug!("switched to sheet '{}'", name);
        self.sheet = Some(sheet);
        Ok(self.emit(Some(Notice::SheetSwitched(name.to_string()))))
    }

    /// Drop the workbook and every sheet
    pub fn unload(&mut self) -> Result<Snapshot> {
        self.ensure_idle()?;
        self.workbook = None;
        self.sheet = None;
        self.sheet_names = Arc::from(Vec::new());
        self.load_state = LoadState::Empty;
        log::debug!("workbook unloaded");
        Ok(self.emit(None))
    }

    // ----- Selection -----

    /// Pointer pressed on a cell; `extend` is the shift modifier
    pub fn select_begin(&mut self, row: i64, col: i64, extend: bool) -> Result<Snapshot> {
        let pos = CellPos::from_signed(row, col)?;
        let sheet = self.active_mut()?;
        let bounds = sheet.bounds();
        if extend {
            sheet.selection.begin_extended(pos, bounds);
        } else {
            sheet.selection.begin(pos, bounds);
        }
        Ok(self.emit(None))
    }

    /// Pointer moved over a cell; ignored unless a drag is in progress
    pub fn select_extend(&mut self, row: i64, col: i64) -> Result<Snapshot> {
        let pos = CellPos::from_signed(row, col)?;
        let sheet = self.active_mut()?;
        let bounds = sheet.bounds();
        sheet.selection.extend(pos, bounds);
        Ok(self.emit(None))
    }

    /// Pointer released anywhere
    pub fn select_end(&mut self) -> Result<Snapshot> {
        self.active_mut()?.selection.end();
        Ok(self.emit(None))
    }

    /// Arrow-key navigation; ignored while a cell is being edited
    pub fn move_focus(&mut self, d_row: isize, d_col: isize, extend: bool) -> Result<Snapshot> {
        let sheet = self.active_mut()?;
        if !sheet.edit.is_editing() {
            let bounds = sheet.bounds();
            sheet.selection.move_focus_by(d_row, d_col, extend, bounds);
        }
        Ok(self.emit(None))
    }

    /// Cancel any open edit and clear the selection
    pub fn escape(&mut self) -> Result<Snapshot> {
        let sheet = self.active_mut()?;
        sheet.edit.cancel();
        sheet.selection.clear();
        Ok(self.emit(None))
    }

    // ----- Editing -----

    /// Open an edit seeded with the cell's current text
    pub fn start_edit(&mut self, row: i64, col: i64) -> Result<Snapshot> {
        let pos = CellPos::from_signed(row, col)?;
        let initial = self.active_mut()?.cells().text_at(pos.row, pos.col);
        self.open_edit(pos, initial)
    }

    /// Open an edit seeded with `initial` (typing over a cell)
    pub fn start_edit_with(&mut self, row: i64, col: i64, initial: impl Into<String>) -> Result<Snapshot> {
        let pos = CellPos::from_signed(row, col)?;
        self.open_edit(pos, initial.into())
    }

    /// Open an edit at the selection anchor, or commit the open one
    ///
    /// Bound to Enter. Without a selection or open edit this does nothing.
    pub fn edit_selection(&mut self) -> Result<Snapshot> {
        let sheet = self.active_mut()?;
        if sheet.edit.is_editing() {
            return self.commit_edit();
        }
        match sheet.selection.selection() {
            Some(selection) => {
                let pos = selection.anchor;
                let initial = sheet.cells().text_at(pos.row, pos.col);
                self.open_edit(pos, initial)
            }
            None => Ok(self.emit(None)),
        }
    }

    /// Replace the draft of the open edit
    pub fn set_draft(&mut self, value: impl Into<String>) -> Result<Snapshot> {
        if !self.active_mut()?.edit.set_draft(value) {
            return Err(Error::NoEditSession);
        }
        Ok(self.emit(None))
    }

    /// Write the draft into the cell (Enter or focus loss); without an open edit this does nothing
    pub fn commit_edit(&mut self) -> Result<Snapshot> {
        let notice = self.active_mut()?.commit_edit().map(Notice::EditCommitted);
        Ok(self.emit(notice))
    }

    /// Discard the draft
    pub fn cancel_edit(&mut self) -> Result<Snapshot> {
        self.active_mut()?.edit.cancel();
        Ok(self.emit(None))
    }

    /// Write a value directly, growing the sheet as needed
    pub fn set_cell(&mut self, row: i64, col: i64, value: CellValue) -> Result<Snapshot> {
        let pos = CellPos::from_signed(row, col)?;
        let sheet = self.active_mut()?;
        sheet.cells_mut().set(pos.row, pos.col, value);
        sheet.search.clear();
        Ok(self.emit(None))
    }

    /// Read a cell; negative or absent coordinates read as empty
    pub fn cell(&self, row: i64, col: i64) -> CellValue {
        self.sheet
            .as_ref()
            .map(|s| s.cells().get_signed(row, col).clone())
            .unwrap_or_default()
    }

    // ----- Track sizes -----

    /// Grow or shrink a column by `delta`
    pub fn resize_column(&mut self, col: i64, delta: f64) -> Result<Snapshot> {
        self.resize(Axis::Column, col, |dims, i| dims.resize_column(i, delta))
    }

    /// Grow or shrink a row by `delta`
    pub fn resize_row(&mut self, row: i64, delta: f64) -> Result<Snapshot> {
        self.resize(Axis::Row, row, |dims, i| dims.resize_row(i, delta))
    }

    /// Set a column to an absolute width
    pub fn set_column_width(&mut self, col: i64, width: f64) -> Result<Snapshot> {
        self.resize(Axis::Column, col, |dims, i| dims.set_column_width(i, width))
    }

    /// Set a row to an absolute height
    pub fn set_row_height(&mut self, row: i64, height: f64) -> Result<Snapshot> {
        self.resize(Axis::Row, row, |dims, i| dims.set_row_height(i, height))
    }

    // ----- Structure -----

    pub fn insert_row(&mut self, after: i64) -> Result<Snapshot> {
        let outcome = self.active_mut()?.insert_row(after)?;
        Ok(self.emit(Some(outcome_notice(outcome))))
    }

    pub fn delete_row(&mut self, index: i64) -> Result<Snapshot> {
        let outcome = self.active_mut()?.delete_row(index)?;
        Ok(self.emit(Some(outcome_notice(outcome))))
    }

    pub fn insert_column(&mut self, after: i64) -> Result<Snapshot> {
        let outcome = self.active_mut()?.insert_column(after)?;
        Ok(self.emit(Some(outcome_notice(outcome))))
    }

    pub fn delete_column(&mut self, index: i64) -> Result<Snapshot> {
        let outcome = self.active_mut()?.delete_column(index)?;
        Ok(self.emit(Some(outcome_notice(outcome))))
    }

    // ----- Sort & search -----

    /// Sort rows by a column; a repeated request on the same column flips the direction
    pub fn sort_by_column(&mut self, col: i64) -> Result<Snapshot> {
        let column = usize::try_from(col).map_err(|_| Error::invalid_track(Axis::Column, col))?;
        let sheet = self.active_mut()?;
        if column >= sheet.cells().column_extent() {
            let refusal = Refusal::OutOfBounds { axis: Axis::Column, index: column };
            log::warn!("refused sort on '{}': {}", sheet.name(), refusal);
            return Ok(self.emit(Some(Notice::Refused(refusal))));
        }
        let state = sheet.sort_by_column(column);
        Ok(self.emit(Some(Notice::Sorted {
            column: state.column,
            direction: state.direction,
        })))
    }

    /// Find every cell containing `query` and select the first match
    ///
    /// A blank query clears the results and leaves the selection alone.
    pub fn search(&mut self, query: &str) -> Result<Snapshot> {
        let sheet = self.active_mut()?;
        let results = SearchResults::run(sheet.cells(), query);
        if query.trim().is_empty() {
            sheet.search = results;
            return Ok(self.emit(None));
        }

        let bounds = sheet.bounds();
        let notice = match results.current() {
            Some(first) => {
                sheet.selection.select_cell(first, bounds);
                Notice::Matches(results.len())
            }
            None => {
                sheet.selection.clear();
                Notice::NoMatches
            }
        };
        log::debug!("search '{}' in '{}': {} match(es)", query, sheet.name(), results.len());
        sheet.search = results;
        Ok(self.emit(Some(notice)))
    }

    /// Jump to the next match, wrapping around
    pub fn search_next(&mut self) -> Result<Snapshot> {
        self.step_search(SearchResults::next)
    }

    /// Jump to the previous match, wrapping around
    pub fn search_previous(&mut self) -> Result<Snapshot> {
        self.step_search(SearchResults::previous)
    }

    // ----- Reads over the selection -----

    /// Serialize the selection for the clipboard; empty without a selection
    pub fn copy_selection(&mut self) -> Result<CopyReport> {
        let sheet = self.active_mut()?;
        let report = sheet
            .selection
            .bounds()
            .map(|rect| CopyReport::from_rect(sheet.cells(), rect))
            .unwrap_or_default();
        log::debug!("copied {} x {} cells", report.rows, report.cols);
        Ok(report)
    }

    /// Sum, count and average of the numeric cells in the selection
    pub fn selection_stats(&mut self) -> Result<Option<SelectionStats>> {
        let sheet = self.active_mut()?;
        Ok(sheet
            .selection
            .bounds()
            .and_then(|rect| SelectionStats::compute(sheet.cells(), rect)))
    }

    /// Whether a column holds numbers or text, judged below the frozen header rows
    pub fn column_kind(&mut self, col: usize) -> Result<ColumnKind> {
        let header_rows = self.config.frozen_rows;
        let sheet = self.active_mut()?;
        Ok(detect_column_kind(sheet.cells(), col, header_rows))
    }

    /// The active sheet as a rectangular matrix for an external encoder
    pub fn export_matrix(&self) -> Result<Vec<Vec<CellValue>>> {
        self.sheet
            .as_ref()
            .map(|s| s.cells().to_matrix())
            .ok_or(Error::NoActiveSheet)
    }

    /// The current state without running a command
    pub fn snapshot(&self) -> Snapshot {
        self.emit(None)
    }

    // ----- internals -----

    fn ensure_idle(&self) -> Result<()> {
        if self.load_state == LoadState::Loading {
            return Err(Error::LoadInProgress);
        }
        Ok(())
    }

    fn active_mut(&mut self) -> Result<&mut Sheet> {
        self.ensure_idle()?;
        self.sheet.as_mut().ok_or(Error::NoActiveSheet)
    }

    fn settled_state(&self) -> LoadState {
        if self.sheet.is_some() {
            LoadState::Ready
        } else {
            LoadState::Empty
        }
    }

    fn record_failure(&mut self, reason: impl Into<String>) -> Error {
        let reason = reason.into();
        log::warn!("workbook load failed: {}", reason);
        self.load_state = LoadState::Failed(reason.clone());
        Error::DecodeFailure(reason)
    }

    fn open_edit(&mut self, pos: CellPos, initial: String) -> Result<Snapshot> {
        let outcome = self.active_mut()?.begin_edit(pos, initial);
        let notice = match outcome {
            StartOutcome::Flushed { committed } => Some(Notice::EditCommitted(committed)),
            _ => None,
        };
        Ok(self.emit(notice))
    }

    fn resize<F>(&mut self, axis: Axis, index: i64, apply: F) -> Result<Snapshot>
    where
        F: FnOnce(&mut DimensionTable, usize) -> f64,
    {
        let index = usize::try_from(index).map_err(|_| Error::invalid_track(axis, index))?;
        let sheet = self.active_mut()?;
        let limit = match axis {
            Axis::Row => sheet.cells().row_count(),
            Axis::Column => sheet.cells().column_extent(),
        };
        if index >= limit {
            let refusal = Refusal::NoSuchTrack { axis, index };
            log::warn!("refused resize on '{}': {}", sheet.name(), refusal);
            return Ok(self.emit(Some(Notice::Refused(refusal))));
        }
        let size = apply(sheet.dimensions_mut(), index);
        Ok(self.emit(Some(Notice::Resized { axis, index, size })))
    }

    fn step_search(&mut self, step: fn(&mut SearchResults) -> Option<CellPos>) -> Result<Snapshot> {
        let sheet = self.active_mut()?;
        let Some(position) = step(&mut sheet.search) else {
            return Ok(self.emit(None));
        };
        let bounds = sheet.bounds();
        sheet.selection.select_cell(position, bounds);
        let notice = Notice::SearchMatch {
            position,
            index: sheet.search.cursor(),
            total: sheet.search.len(),
        };
        Ok(self.emit(Some(notice)))
    }

    fn emit(&self, notice: Option<Notice>) -> Snapshot {
        let panes = FrozenPanes::from_config(&self.config);
        match &self.sheet {
            Some(sheet) => Snapshot {
                load_state: self.load_state.clone(),
                sheet_names: Arc::clone(&self.sheet_names),
                active_sheet: Some(sheet.name().to_string()),
                cells: Arc::clone(&sheet.cells),
                dimensions: Arc::clone(&sheet.dimensions),
                selection: sheet.selection.selection(),
                pointer: sheet.selection.pointer(),
                search: sheet.search.clone(),
                sort: sheet.sort,
                edit: sheet.edit.session().cloned(),
                panes,
                notice,
            },
            None => Snapshot {
                load_state: self.load_state.clone(),
                sheet_names: Arc::clone(&self.sheet_names),
                active_sheet: None,
                cells: Arc::new(CellStore::new()),
                dimensions: Arc::new(DimensionTable::with_config(&self.config)),
                selection: None,
                pointer: Default::default(),
                search: SearchResults::default(),
                sort: None,
                edit: None,
                panes,
                notice,
            },
        }
    }
}

fn outcome_notice(outcome: MutationOutcome) -> Notice {
    match outcome {
        MutationOutcome::Inserted { axis: Axis::Row, index } => Notice::RowInserted(index),
        MutationOutcome::Inserted { axis: Axis::Column, index } => Notice::ColumnInserted(index),
        MutationOutcome::Deleted { axis: Axis::Row, index } => Notice::RowDeleted(index),
        MutationOutcome::Deleted { axis: Axis::Column, index } => Notice::ColumnDeleted(index),
        MutationOutcome::Refused(refusal) => Notice::Refused(refusal),
    }
}
