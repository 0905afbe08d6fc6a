//! Cell positions, rectangles and column labels

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A zero-based cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    /// Create a new position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert signed UI coordinates into a position
    ///
    /// Negative coordinates are rejected with [`Error::InvalidIndex`].
    pub fn from_signed(row: i64, col: i64) -> Result<Self> {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(r), Ok(c)) => Ok(Self::new(r, c)),
            _ => Err(Error::invalid_index(row, col)),
        }
    }

    /// Parse an A1-style address ("A1", "c12"); `$` markers are accepted and ignored
    ///
    /// # Examples
    /// ```
    /// use tabgrid_core::CellPos;
    ///
    /// assert_eq!(CellPos::parse("B3").unwrap(), CellPos::new(2, 1));
    /// assert_eq!(CellPos::parse("$AA$1").unwrap(), CellPos::new(0, 26));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let cleaned: String = s.chars().filter(|c| *c != '$').collect();
        let split = cleaned
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(cleaned.len());
        let (letters, digits) = cleaned.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let col = column_index(letters)?;
        let row: usize = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // rows are 1-based in A1 notation
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Ok(Self::new(row - 1, col))
    }

    /// Format as an A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_name(self.col), self.row + 1)
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellPos {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a column index to its header label (0 = A, 25 = Z, 26 = AA, ...)
pub fn column_name(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert a column label to its index (A = 0, Z = 25, AA = 26, ...)
pub fn column_index(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(c.to_ascii_uppercase() as usize - 'A' as usize + 1))
            .ok_or_else(|| Error::InvalidAddress(format!("column '{}' is too large", letters)))?;
    }

    Ok(col - 1)
}

/// A normalized, inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl CellRect {
    /// Build the rectangle spanned by two corners, in any order
    pub fn from_corners(a: CellPos, b: CellPos) -> Self {
        Self {
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
        }
    }

    /// A single-cell rectangle
    pub fn single(pos: CellPos) -> Self {
        Self::from_corners(pos, pos)
    }

    /// Parse a range from A1:B10 notation (or a single address)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((start, end)) => Ok(Self::from_corners(
                CellPos::parse(start)?,
                CellPos::parse(end)?,
            )),
            None => Ok(Self::single(CellPos::parse(s)?)),
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Number of rows covered
    pub fn row_count(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// Top-left corner
    pub fn top_left(&self) -> CellPos {
        CellPos::new(self.min_row, self.min_col)
    }

    /// Iterate over every position, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| CellPos::new(row, col)))
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        let start = self.top_left();
        let end = CellPos::new(self.max_row, self.max_col);
        if start == end {
            start.to_a1_string()
        } else {
            format!("{}:{}", start, end)
        }
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("ZZ").unwrap(), 701);
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
    }

    #[test]
    fn test_from_signed() {
        assert_eq!(CellPos::from_signed(3, 4).unwrap(), CellPos::new(3, 4));
        assert_eq!(
            CellPos::from_signed(-1, 0),
            Err(Error::InvalidIndex { row: -1, col: 0 })
        );
        assert!(CellPos::from_signed(0, -5).is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(CellPos::parse("A1").unwrap(), CellPos::new(0, 0));
        assert_eq!(CellPos::parse("c100").unwrap(), CellPos::new(99, 2));
        assert!(CellPos::parse("").is_err());
        assert!(CellPos::parse("A").is_err());
        assert!(CellPos::parse("1").is_err());
        assert!(CellPos::parse("A0").is_err());
        assert_eq!(CellPos::new(99, 2).to_string(), "C100");
    }

    #[test]
    fn test_rect_normalizes_corners() {
        let rect = CellRect::from_corners(CellPos::new(4, 1), CellPos::new(2, 3));
        assert_eq!(rect.min_row, 2);
        assert_eq!(rect.max_row, 4);
        assert_eq!(rect.min_col, 1);
        assert_eq!(rect.max_col, 3);
        assert_eq!(rect.row_count(), 3);
        assert_eq!(rect.col_count(), 3);
        assert!(rect.contains(3, 2));
        assert!(!rect.contains(1, 2));
        assert_eq!(rect.to_string(), "B3:D5");
    }

    #[test]
    fn test_rect_cells_row_major() {
        let rect = CellRect::parse("A1:B2").unwrap();
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellPos::new(0, 0),
                CellPos::new(0, 1),
                CellPos::new(1, 0),
                CellPos::new(1, 1),
            ]
        );
    }
}
