//! Prelude module - common imports for tabgrid users
//!
//! ```rust
//! use tabgrid::prelude::*;
//! ```

pub use crate::{
    Axis,
    // Cell types
    CellPos,
    CellRect,
    CellValue,
    ColumnKind,
    CopyReport,
    // Error types
    Error,
    GridConfig,
    LoadState,
    Notice,
    // Decoder hand-off
    RawSheet,
    RawWorkbook,
    Result,
    SelectionStats,
    // Main types
    SheetController,
    Snapshot,
    SortDirection,
    WorkbookDecoder,
};
