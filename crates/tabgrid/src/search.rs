//! Substring search across every cell

use tabgrid_core::{CellPos, CellStore};

/// Positions of every cell whose display text contains `query`, ignoring case
///
/// Rows are scanned in order and columns in order within a row. A blank query matches
/// nothing.
pub fn find_matches(store: &CellStore, query: &str) -> Vec<CellPos> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    store
        .iter()
        .filter(|(_, value)| {
            !value.is_empty() && value.display_text().to_lowercase().contains(&needle)
        })
        .map(|(pos, _)| pos)
        .collect()
}

/// Matches of the most recent query plus a cursor for match-to-match navigation
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResults {
    query: String,
    matches: Vec<CellPos>,
    cursor: usize,
}

impl SearchResults {
    /// Run `query` against `store`
    pub fn run(store: &CellStore, query: &str) -> Self {
        Self {
            query: query.to_string(),
            matches: find_matches(store, query),
            cursor: 0,
        }
    }

    /// Advance the cursor circularly and return the new current match
    pub fn next(&mut self) -> Option<CellPos> {
        if self.matches.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.matches.len();
        self.current()
    }

    /// Step the cursor back circularly and return the new current match
    pub fn previous(&mut self) -> Option<CellPos> {
        if self.matches.is_empty() {
            return None;
        }
        self.cursor = self
            .cursor
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        self.current()
    }

    /// The match under the cursor
    pub fn current(&self) -> Option<CellPos> {
        self.matches.get(self.cursor).copied()
    }

    /// Cursor index into [`SearchResults::matches`]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// All matches in scan order
    pub fn matches(&self) -> &[CellPos] {
        &self.matches
    }

    /// Whether a cell is one of the matches
    pub fn is_match(&self, row: usize, col: usize) -> bool {
        self.matches.contains(&CellPos::new(row, col))
    }

    /// The query these results belong to
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Forget the query and every match
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
