//! Cell value types

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Represents the value stored in a cell
///
/// The variant is resolved once when a value enters the store, so rendering, sorting and
/// searching never have to re-infer a cell's type from its text.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value). Absent cells read as this.
    #[default]
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Text value
    Text(SharedString),
}

/// The kind of a [`CellValue`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Boolean,
    Number,
    Text,
}

impl CellValue {
    /// Create a new text value
    ///
    /// An empty string normalizes to [`CellValue::Empty`].
    pub fn text<S: AsRef<str>>(s: S) -> Self {
        let s = s.as_ref();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(SharedString::new(s))
        }
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Get the kind of this value
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Empty => CellKind::Empty,
            CellValue::Boolean(_) => CellKind::Boolean,
            CellValue::Number(_) => CellKind::Number,
            CellValue::Text(_) => CellKind::Text,
        }
    }

    /// Try to read the value as a number
    ///
    /// Numbers are returned as-is. Text counts when its trimmed form parses as a finite
    /// number (`" 12.5 "`, `"-3"`, `"1e3"`). Booleans and empty cells are not numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_number(s.as_str()),
            CellValue::Boolean(_) | CellValue::Empty => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as a string slice (text cells only)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The display text of this value; empty cells render as `""`
    pub fn display_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
        }
    }

    /// Order two values the way a column sort does; see [`SortKey`]
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        SortKey::new(self).cmp(&SortKey::new(other))
    }
}

/// Precomputed ordering key for a cell value
///
/// Values fall into four bands, in order:
/// 1. empty cells
/// 2. non-numeric text that collates below `"0"` (`"-"`, `"#N/A"`, `"(x)"`)
/// 3. numeric values (see [`CellValue::as_number`]), compared numerically
/// 4. everything else
///
/// Text in bands 2 and 4 compares case- and accent-insensitively first (`"água"` sorts with
/// `"agua"`), then with accents, then by the raw text with lower-case spellings first. The
/// ordering is total.
#[derive(Debug, Clone)]
pub struct SortKey {
    band: u8,
    number: Option<f64>,
    primary: String,
    folded: String,
    raw: String,
}

impl SortKey {
    pub fn new(value: &CellValue) -> Self {
        let number = value.as_number();
        let raw = value.display_text().into_owned();
        let primary: String = raw
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let folded: String = raw.chars().flat_map(char::to_lowercase).collect();

        let band = match (value, number) {
            (CellValue::Empty, _) => 0,
            (_, Some(_)) => 2,
            _ if primary.as_str() < "0" => 1,
            _ => 3,
        };

        Self {
            band,
            number,
            primary,
            folded,
            raw,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.band.cmp(&other.band).then_with(|| match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self
                .primary
                .cmp(&other.primary)
                .then_with(|| self.folded.cmp(&other.folded))
                .then_with(|| other.raw.cmp(&self.raw)),
        })
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s.as_str()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::CellValue;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Decoders hand cells over as bare JSON-like primitives
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Primitive {
        Bool(bool),
        Number(f64),
        Text(String),
    }

    impl Serialize for CellValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                CellValue::Empty => serializer.serialize_none(),
                CellValue::Boolean(b) => serializer.serialize_bool(*b),
                CellValue::Number(n) => serializer.serialize_f64(*n),
                CellValue::Text(s) => serializer.serialize_str(s.as_str()),
            }
        }
    }

    impl<'de> Deserialize<'de> for CellValue {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Ok(match Option::<Primitive>::deserialize(deserializer)? {
                None => CellValue::Empty,
                Some(Primitive::Bool(b)) => CellValue::Boolean(b),
                Some(Primitive::Number(n)) => CellValue::Number(n),
                Some(Primitive::Text(s)) => CellValue::text(s),
            })
        }
    }
}

/// Shared, immutable string storage for text cells
///
/// Cloning a row (sorting, snapshots) only bumps reference counts.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    /// Create a new shared string
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the string in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(3.5), CellValue::Number(3.5));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
        assert_eq!(CellValue::from(""), CellValue::Empty);
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);

        let s = CellValue::from("hello");
        assert_eq!(s.as_str(), Some("hello"));
        assert_eq!(s.kind(), CellKind::Text);
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::text(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(CellValue::text("1e3").as_number(), Some(1000.0));
        assert_eq!(CellValue::text("12px").as_number(), None);
        assert_eq!(CellValue::text("NaN").as_number(), None);
        assert_eq!(CellValue::Boolean(true).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::Empty.display_text(), "");
        assert_eq!(CellValue::Number(42.0).display_text(), "42");
        assert_eq!(CellValue::Number(-0.25).display_text(), "-0.25");
        assert_eq!(CellValue::Boolean(false).display_text(), "FALSE");
        assert_eq!(CellValue::text("abc").display_text(), "abc");
    }

    #[test]
    fn test_sort_cmp_numeric_and_text() {
        // numeric when both sides are numbers, even if one is numeric text
        assert_eq!(
            CellValue::Number(9.0).sort_cmp(&CellValue::text("10")),
            Ordering::Less
        );
        // text comparison would put "10" before "9"
        assert_eq!(
            CellValue::text("9").sort_cmp(&CellValue::text("x10")),
            Ordering::Less
        );
        // case-insensitive
        assert_eq!(
            CellValue::text("apple").sort_cmp(&CellValue::text("Banana")),
            Ordering::Less
        );
        // empty sorts first
        assert_eq!(
            CellValue::Empty.sort_cmp(&CellValue::text("a")),
            Ordering::Less
        );
        // numbers sort ahead of text that collates after digits
        assert_eq!(
            CellValue::Number(50.0).sort_cmp(&CellValue::text("5a")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Boolean(true).sort_cmp(&CellValue::Number(1.0)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sort_cmp_ignores_accents_first() {
        assert_eq!(
            CellValue::text("água").sort_cmp(&CellValue::text("banana")),
            Ordering::Less
        );
        assert_eq!(
            CellValue::text("Éder").sort_cmp(&CellValue::text("Zé")),
            Ordering::Less
        );
        // accents only break ties
        assert_eq!(
            CellValue::text("eder").sort_cmp(&CellValue::text("éder")),
            Ordering::Less
        );
        assert_ne!(
            CellValue::text("Éder").sort_cmp(&CellValue::text("éder")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sort_cmp_placeholders_before_numbers() {
        assert_eq!(
            CellValue::text("-").sort_cmp(&CellValue::Number(5.0)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::text("#N/A").sort_cmp(&CellValue::Number(-100.0)),
            Ordering::Less
        );
        // negative numbers stay numeric
        assert_eq!(
            CellValue::text("-3").sort_cmp(&CellValue::Number(2.0)),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Empty.sort_cmp(&CellValue::text("-")),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_cmp_is_total_on_case_ties() {
        let upper = CellValue::text("ABC");
        let lower = CellValue::text("abc");
        assert_ne!(upper.sort_cmp(&lower), Ordering::Equal);
        assert_eq!(upper.sort_cmp(&lower), lower.sort_cmp(&upper).reverse());
        assert_eq!(lower.sort_cmp(&upper), Ordering::Less);
        assert_eq!(lower.sort_cmp(&lower.clone()), Ordering::Equal);
    }
}
