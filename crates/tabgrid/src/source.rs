//! Decoded workbook input
//!
//! The engine never parses file bytes. An external decoder turns a byte source into a
//! [`RawWorkbook`]: sheet names in workbook order plus one value matrix per sheet.

use tabgrid_core::{CellValue, Error, Result};

/// One decoded sheet
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSheet {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rows: Vec<Vec<CellValue>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Every sheet of a decoded workbook
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWorkbook {
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    pub fn new(sheets: Vec<RawSheet>) -> Self {
        Self { sheets }
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Find a sheet by name
    pub fn sheet(&self, name: &str) -> Result<&RawSheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }

    /// The first sheet, if any
    pub fn first(&self) -> Option<&RawSheet> {
        self.sheets.first()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Turns a byte source into a [`RawWorkbook`]
///
/// Implementations report unreadable input as [`Error::DecodeFailure`].
pub trait WorkbookDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawWorkbook>;
}

impl<F> WorkbookDecoder for F
where
    F: Fn(&[u8]) -> Result<RawWorkbook>,
{
    fn decode(&self, bytes: &[u8]) -> Result<RawWorkbook> {
        self(bytes)
    }
}
