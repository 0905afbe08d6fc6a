//! Aggregates over a selection and per-column kind detection

use tabgrid_core::{CellRect, CellStore};

/// Number of leading data values inspected by [`detect_column_kind`]
pub const KIND_SAMPLE_SIZE: usize = 10;

/// Share of numeric samples above which a column counts as numeric
pub const NUMERIC_THRESHOLD: f64 = 0.7;

/// Sum, count and average of the numeric cells in a selection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionStats {
    pub sum: f64,
    pub count: usize,
    pub average: f64,
}

impl SelectionStats {
    /// Aggregate every numeric cell of `rect`, or `None` when there is none
    ///
    /// Text that parses as a finite number contributes. Sum and average are rounded to
    /// two decimals.
    pub fn compute(store: &CellStore, rect: CellRect) -> Option<Self> {
        let (sum, count) = rect
            .cells()
            .filter_map(|pos| store.get_pos(pos).as_number())
            .fold((0.0, 0usize), |(sum, count), n| (sum + n, count + 1));

        if count == 0 {
            return None;
        }

        Some(Self {
            sum: round2(sum),
            count,
            average: round2(sum / count as f64),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Value kind of a column, used to pick a filter widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// Classify `col` from its first [`KIND_SAMPLE_SIZE`] values below `skip_rows` header rows
///
/// A column is numeric when more than 70% of the samples are non-empty numbers. A column
/// with no samples is text.
pub fn detect_column_kind(store: &CellStore, col: usize, skip_rows: usize) -> ColumnKind {
    let samples: Vec<_> = (skip_rows..store.row_count())
        .take(KIND_SAMPLE_SIZE)
        .map(|row| store.get(row, col))
        .collect();

    if samples.is_empty() {
        return ColumnKind::Text;
    }

    let numeric = samples
        .iter()
        .filter(|value| !value.is_empty() && value.as_number().is_some())
        .count();

    if numeric as f64 / samples.len() as f64 > NUMERIC_THRESHOLD {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}
