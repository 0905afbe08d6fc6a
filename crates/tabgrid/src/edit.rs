//! In-place cell editing
//!
//! At most one cell is edited at a time. The draft lives outside the store until it is
//! committed; starting an edit on another cell flushes the open one first.

use tabgrid_core::{CellPos, CellStore, CellValue};

/// The in-progress edit of a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditSession {
    pos: CellPos,
    draft: String,
}

impl EditSession {
    /// Cell being edited
    pub fn pos(&self) -> CellPos {
        self.pos
    }

    /// Uncommitted value
    pub fn draft(&self) -> &str {
        &self.draft
    }
}

/// What [`EditState::start`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new session was opened
    Started,
    /// The session was already open on this cell; its draft is kept
    Resumed,
    /// The session open on another cell was committed, then a new one opened
    Flushed { committed: CellPos },
}

/// Holder for the (optional) open edit session of a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditState {
    session: Option<EditSession>,
}

impl EditState {
    /// Create a state with no open session
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an edit on `pos` seeded with `initial`
    pub fn start(&mut self, pos: CellPos, initial: impl Into<String>, store: &mut CellStore) -> StartOutcome {
        let outcome = match &self.session {
            Some(open) if open.pos == pos => return StartOutcome::Resumed,
            Some(open) => {
                let committed = open.pos;
                self.commit(store);
                StartOutcome::Flushed { committed }
            }
            None => StartOutcome::Started,
        };

        self.open(pos, initial);
        outcome
    }

    /// Open a session without checking for one already in progress
    pub(crate) fn open(&mut self, pos: CellPos, initial: impl Into<String>) {
        self.session = Some(EditSession {
            pos,
            draft: initial.into(),
        });
    }

    /// Replace the draft; the store is untouched. Returns `false` with no open session.
    pub fn set_draft(&mut self, value: impl Into<String>) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.draft = value.into();
                true
            }
            None => false,
        }
    }

    /// Write the draft into the store and close the session
    ///
    /// The write happens even when the draft equals the stored text.
    pub fn commit(&mut self, store: &mut CellStore) -> Option<CellPos> {
        let session = self.session.take()?;
        store.set(session.pos.row, session.pos.col, CellValue::text(&session.draft));
        Some(session.pos)
    }

    /// Discard the draft and close the session
    pub fn cancel(&mut self) -> Option<EditSession> {
        self.session.take()
    }

    /// The open session, if any
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Whether a cell is being edited
    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> CellStore {
        CellStore::from_rows(vec![vec!["a".into(), "b".into()], vec!["c".into()]])
    }

    #[test]
    fn test_commit_writes_draft() {
        let mut store = store();
        let mut edit = EditState::new();

        assert_eq!(edit.start(CellPos::new(0, 1), "b", &mut store), StartOutcome::Started);
        assert!(edit.set_draft("changed"));
        assert_eq!(store.get(0, 1), &CellValue::text("b")); // draft not written yet

        assert_eq!(edit.commit(&mut store), Some(CellPos::new(0, 1)));
        assert_eq!(store.get(0, 1), &CellValue::text("changed"));
        assert!(!edit.is_editing());
    }

    #[test]
    fn test_cancel_leaves_store_alone() {
        let mut store = store();
        let mut edit = EditState::new();
        edit.start(CellPos::new(1, 0), "c", &mut store);
        edit.set_draft("zzz");

        let cancelled = edit.cancel().unwrap();
        assert_eq!(cancelled.draft(), "zzz");
        assert_eq!(store.get(1, 0), &CellValue::text("c"));
        assert_eq!(edit.session(), None);
    }

    #[test]
    fn test_start_on_other_cell_flushes() {
        let mut store = store();
        let mut edit = EditState::new();
        edit.start(CellPos::new(0, 0), "a", &mut store);
        edit.set_draft("first");

        let outcome = edit.start(CellPos::new(1, 0), "c", &mut store);
        assert_eq!(outcome, StartOutcome::Flushed { committed: CellPos::new(0, 0) });
        assert_eq!(store.get(0, 0), &CellValue::text("first"));
        assert_eq!(edit.session().map(|s| s.pos()), Some(CellPos::new(1, 0)));
    }

    #[test]
    fn test_start_on_same_cell_keeps_draft() {
        let mut store = store();
        let mut edit = EditState::new();
        edit.start(CellPos::new(0, 0), "a", &mut store);
        edit.set_draft("typing");

        assert_eq!(edit.start(CellPos::new(0, 0), "a", &mut store), StartOutcome::Resumed);
        assert_eq!(edit.session().map(|s| s.draft()), Some("typing"));
    }

    #[test]
    fn test_commit_unchanged_still_writes() {
        let mut store = CellStore::new();
        let mut edit = EditState::new();
        edit.start(CellPos::new(3, 2), "", &mut store);
        edit.set_draft("x");
        edit.set_draft("");
        assert_eq!(edit.commit(&mut store), Some(CellPos::new(3, 2)));
        // rows up to the edited one exist after the write
        assert_eq!(store.row_count(), 4);
        assert_eq!(store.get(3, 2), &CellValue::Empty);
    }

    #[test]
    fn test_draft_and_commit_without_session() {
        let mut store = store();
        let mut edit = EditState::new();
        assert!(!edit.set_draft("nope"));
        assert_eq!(edit.commit(&mut store), None);
        assert_eq!(edit.cancel(), None);
    }
}
