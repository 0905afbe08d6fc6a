//! Rectangular range selection
//!
//! A selection is an anchor (where the drag or shift-extension started) and a focus (the
//! cell the pointer or keyboard last reached). Both ends are always clamped into the
//! sheet. Pointer dragging runs through an explicit `Idle -> Selecting -> Idle` state
//! machine; releasing the pointer anywhere, with or without intermediate moves, ends it.

use tabgrid_core::{CellPos, CellRect, CellStore};

/// Addressable extent of a sheet used for clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub rows: usize,
    pub cols: usize,
}

impl GridBounds {
    /// Bounds of a store: its row count by its column extent (at least one column)
    pub fn of(store: &CellStore) -> Self {
        Self {
            rows: store.row_count().max(1),
            cols: store.column_extent(),
        }
    }

    /// Clamp a position into `[0, rows-1] x [0, cols-1]`
    pub fn clamp(&self, pos: CellPos) -> CellPos {
        CellPos::new(
            pos.row.min(self.rows.saturating_sub(1)),
            pos.col.min(self.cols.saturating_sub(1)),
        )
    }

    /// Move `pos` by a signed offset, clamped into bounds
    pub fn offset(&self, pos: CellPos, d_row: isize, d_col: isize) -> CellPos {
        self.clamp(CellPos::new(
            pos.row.saturating_add_signed(d_row),
            pos.col.saturating_add_signed(d_col),
        ))
    }

    /// Whether a position lies inside the bounds
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }
}

/// Pointer interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerState {
    #[default]
    Idle,
    Selecting,
}

/// A selection rectangle given by its anchor and focus cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Where the selection started (`start_row`, `start_col`)
    pub anchor: CellPos,
    /// Where the selection currently ends (`end_row`, `end_col`)
    pub focus: CellPos,
}

impl Selection {
    /// A single-cell selection
    pub fn single(pos: CellPos) -> Self {
        Self {
            anchor: pos,
            focus: pos,
        }
    }

    /// Normalized rectangle covered by the selection
    pub fn bounds(&self) -> CellRect {
        CellRect::from_corners(self.anchor, self.focus)
    }

    /// Inclusive containment test
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.bounds().contains(row, col)
    }
}

/// Selection plus pointer interaction state for one sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionModel {
    current: Option<Selection>,
    pointer: PointerState,
}

impl SelectionModel {
    /// Create a model with no selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on a cell: anchor and focus both move there, dragging starts
    pub fn begin(&mut self, pos: CellPos, bounds: GridBounds) {
        self.current = Some(Selection::single(bounds.clamp(pos)));
        self.pointer = PointerState::Selecting;
    }

    /// Pointer pressed with the extend modifier held
    ///
    /// With an existing selection only the focus moves and no drag starts; without one
    /// this behaves like [`SelectionModel::begin`].
    pub fn begin_extended(&mut self, pos: CellPos, bounds: GridBounds) {
        match self.current.as_mut() {
            Some(selection) => selection.focus = bounds.clamp(pos),
            None => self.begin(pos, bounds),
        }
    }

    /// Pointer moved over a cell while dragging; returns whether the focus moved
    pub fn extend(&mut self, pos: CellPos, bounds: GridBounds) -> bool {
        if self.pointer != PointerState::Selecting {
            return false;
        }
        match self.current.as_mut() {
            Some(selection) => {
                let focus = bounds.clamp(pos);
                let moved = selection.focus != focus;
                selection.focus = focus;
                moved
            }
            None => false,
        }
    }

    /// Pointer released anywhere; the selection rectangle persists
    pub fn end(&mut self) {
        self.pointer = PointerState::Idle;
    }

    /// Keyboard navigation
    ///
    /// Moves the focus by the offset, clamped to the sheet. Without `extend` the anchor
    /// collapses onto the new focus; with `extend` the anchor stays put. Does nothing
    /// when there is no selection.
    pub fn move_focus_by(&mut self, d_row: isize, d_col: isize, extend: bool, bounds: GridBounds) {
        if let Some(selection) = self.current.as_mut() {
            let focus = bounds.offset(selection.focus, d_row, d_col);
            selection.focus = focus;
            if !extend {
                selection.anchor = focus;
            }
        }
    }

    /// Replace the selection with a single cell (search jumps use this)
    pub fn select_cell(&mut self, pos: CellPos, bounds: GridBounds) {
        self.current = Some(Selection::single(bounds.clamp(pos)));
        self.pointer = PointerState::Idle;
    }

    /// Drop the selection entirely
    pub fn clear(&mut self) {
        self.current = None;
        self.pointer = PointerState::Idle;
    }

    /// Current selection, if any
    pub fn selection(&self) -> Option<Selection> {
        self.current
    }

    /// Normalized rectangle of the current selection
    pub fn bounds(&self) -> Option<CellRect> {
        self.current.map(|s| s.bounds())
    }

    /// Whether a cell is inside the current selection
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.current.is_some_and(|s| s.contains(row, col))
    }

    /// Current pointer state
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Whether a pointer drag is in progress
    pub fn is_selecting(&self) -> bool {
        self.pointer == PointerState::Selecting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOUNDS: GridBounds = GridBounds { rows: 10, cols: 5 };

    fn pos(row: usize, col: usize) -> CellPos {
        CellPos::new(row, col)
    }

    #[test]
    fn test_undefined_until_first_begin() {
        let model = SelectionModel::new();
        assert_eq!(model.selection(), None);
        assert_eq!(model.bounds(), None);
        assert!(!model.contains(0, 0));
    }

    #[test]
    fn test_drag_selection() {
        let mut model = SelectionModel::new();
        model.begin(pos(4, 3), BOUNDS);
        assert!(model.is_selecting());
        assert!(model.extend(pos(2, 1), BOUNDS));
        model.end();

        let selection = model.selection().unwrap();
        assert_eq!(selection.anchor, pos(4, 3));
        assert_eq!(selection.focus, pos(2, 1));
        assert_eq!(model.bounds(), Some(CellRect::from_corners(pos(2, 1), pos(4, 3))));
        assert!(model.contains(3, 2));
        assert!(!model.contains(5, 2));
        assert_eq!(model.pointer(), PointerState::Idle);
    }

    #[test]
    fn test_release_without_move_is_single_cell() {
        let mut model = SelectionModel::new();
        model.begin(pos(1, 1), BOUNDS);
        model.end();
        assert_eq!(model.selection(), Some(Selection::single(pos(1, 1))));
    }

    #[test]
    fn test_end_while_idle_is_harmless() {
        let mut model = SelectionModel::new();
        model.end();
        model.end();
        assert_eq!(model.selection(), None);
        assert_eq!(model.pointer(), PointerState::Idle);
    }

    #[test]
    fn test_extend_only_while_selecting() {
        let mut model = SelectionModel::new();
        model.begin(pos(0, 0), BOUNDS);
        model.end();
        assert!(!model.extend(pos(3, 3), BOUNDS));
        assert_eq!(model.selection().unwrap().focus, pos(0, 0));
    }

    #[test]
    fn test_begin_clamps() {
        let mut model = SelectionModel::new();
        model.begin(pos(99, 99), BOUNDS);
        assert_eq!(model.selection().unwrap().anchor, pos(9, 4));
    }

    #[test]
    fn test_shift_begin_keeps_anchor() {
        let mut model = SelectionModel::new();
        model.begin(pos(2, 2), BOUNDS);
        model.end();
        model.begin_extended(pos(5, 0), BOUNDS);

        let selection = model.selection().unwrap();
        assert_eq!(selection.anchor, pos(2, 2));
        assert_eq!(selection.focus, pos(5, 0));
        assert!(!model.is_selecting());
    }

    #[test]
    fn test_shift_begin_without_selection_starts_fresh() {
        let mut model = SelectionModel::new();
        model.begin_extended(pos(3, 1), BOUNDS);
        assert_eq!(model.selection(), Some(Selection::single(pos(3, 1))));
        assert!(model.is_selecting());
    }

    #[test]
    fn test_move_focus_collapses_without_extend() {
        let mut model = SelectionModel::new();
        model.begin(pos(2, 2), BOUNDS);
        model.extend(pos(4, 4), BOUNDS);
        model.end();

        model.move_focus_by(1, 0, false, BOUNDS);
        assert_eq!(model.selection(), Some(Selection::single(pos(5, 4))));
    }

    #[test]
    fn test_move_focus_with_extend_keeps_anchor() {
        let mut model = SelectionModel::new();
        model.begin(pos(2, 2), BOUNDS);
        model.end();

        model.move_focus_by(1, 0, true, BOUNDS);
        model.move_focus_by(0, -1, true, BOUNDS);
        let selection = model.selection().unwrap();
        assert_eq!(selection.anchor, pos(2, 2));
        assert_eq!(selection.focus, pos(3, 1));
    }

    #[test]
    fn test_move_focus_clamps_at_edges() {
        let mut model = SelectionModel::new();
        model.begin(pos(0, 0), BOUNDS);
        model.move_focus_by(-1, -1, false, BOUNDS);
        assert_eq!(model.selection().unwrap().focus, pos(0, 0));

        model.move_focus_by(100, 100, false, BOUNDS);
        assert_eq!(model.selection().unwrap().focus, pos(9, 4));
    }

    #[test]
    fn test_move_focus_without_selection_is_noop() {
        let mut model = SelectionModel::new();
        model.move_focus_by(1, 1, false, BOUNDS);
        assert_eq!(model.selection(), None);
    }

    #[test]
    fn test_clear() {
        let mut model = SelectionModel::new();
        model.begin(pos(1, 1), BOUNDS);
        model.clear();
        assert_eq!(model.selection(), None);
        assert!(!model.is_selecting());
    }

    #[test]
    fn test_bounds_of_empty_store_has_one_cell() {
        let bounds = GridBounds::of(&CellStore::new());
        assert_eq!(bounds, GridBounds { rows: 1, cols: 1 });
        assert_eq!(bounds.clamp(pos(3, 3)), pos(0, 0));
    }
}
