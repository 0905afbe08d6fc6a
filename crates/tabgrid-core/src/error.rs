//! Error types for tabgrid-core

use thiserror::Error;

use crate::dimension::Axis;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while addressing or driving a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Negative row or column passed to a write
    #[error("Invalid cell index: row {row}, column {col}")]
    InvalidIndex { row: i64, col: i64 },

    /// Negative index passed to a track (row/column) operation
    #[error("Invalid {axis:?} index: {index}")]
    InvalidTrackIndex { axis: Axis, index: i64 },

    /// Invalid A1-style address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// The external decoder could not produce a workbook
    #[error("Failed to decode workbook: {0}")]
    DecodeFailure(String),

    /// A workbook load is in flight; mutating commands are rejected
    #[error("A workbook is still loading")]
    LoadInProgress,

    /// No sheet has been loaded yet
    #[error("No active sheet")]
    NoActiveSheet,

    /// Draft update or commit without an open edit session
    #[error("No cell is being edited")]
    NoEditSession,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create an [`Error::InvalidIndex`] for a signed coordinate pair
    pub fn invalid_index(row: i64, col: i64) -> Self {
        Error::InvalidIndex { row, col }
    }

    /// Create an [`Error::InvalidTrackIndex`]
    pub fn invalid_track(axis: Axis, index: i64) -> Self {
        Error::InvalidTrackIndex { axis, index }
    }
}
