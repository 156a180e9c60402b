//! Table and cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::error::{Error, Result};

use super::schema::{Column, ColumnKind};

/// A cell value with type information
#[derive(Debug, Clone, Default)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::String(a), CellValue::String(b)) => a == b,
            // Cross-type numeric comparison, exact so it agrees with Hash
            (CellValue::Int(a), CellValue::Float(b)) | (CellValue::Float(b), CellValue::Int(a)) => {
                integral(*b) == Some(*a)
            }
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integral floats hash like the equal Int so `1` and `1.0` collapse
        match self {
            CellValue::Null => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Int(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match integral(*f) {
                Some(i) => {
                    2u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            CellValue::String(s) => {
                4u8.hash(state);
                s.hash(state);
            }
        }
    }
}

/// The i64 a float represents exactly, if any
fn integral(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl CellValue {
    /// Check if the value is absent
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric view of the value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Field text written to delimited files; absent cells are empty
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            other => other.display(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// Column-oriented table; every column holds exactly `row_count` cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table with the given column names.
    ///
    /// Names are trimmed and blank names dropped. New columns are declared as text.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut columns = IndexMap::new();
        for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
            if columns.contains_key(name) {
                return Err(Error::DuplicateColumn(name.to_string()));
            }
            columns.insert(name.to_string(), Column::new(name, ColumnKind::Text, 0));
        }

        if columns.is_empty() {
            return Err(Error::EmptyColumnList);
        }

        Ok(Self {
            columns,
            row_count: 0,
        })
    }

    /// Build a table from loaded columns.
    ///
    /// Shorter columns are padded with absent cells and repeated names get a
    /// `.N` suffix.
    pub fn from_columns(loaded: Vec<Column>) -> Self {
        let row_count = loaded.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        let mut columns: IndexMap<String, Column> = IndexMap::with_capacity(loaded.len());

        for mut column in loaded {
            column.cells.resize(row_count, CellValue::Null);
            if columns.contains_key(&column.name) {
                let base = column.name.clone();
                let mut n = 1;
                while columns.contains_key(&format!("{}.{}", base, n)) {
                    n += 1;
                }
                column.name = format!("{}.{}", base, n);
            }
            columns.insert(column.name.clone(), column);
        }

        Self { columns, row_count }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.columns.is_empty()
    }

    /// Column names in table order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns in table order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Cell at `(row, column)`; `None` when out of bounds
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.columns.get(column).and_then(|c| c.cells.get(row))
    }

    /// Row-major view of all rows
    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.row_count).map(move |i| self.columns.values().map(|c| &c.cells[i]).collect())
    }

    /// Make sure `name` exists, adding it with all-absent cells if missing.
    ///
    /// A column that holds no values yet takes `kind` as its declared kind; a
    /// column with values is widened to accommodate `kind`. Returns true when
    /// the column was created.
    pub fn ensure_column(&mut self, name: &str, kind: ColumnKind) -> bool {
        let rows = self.row_count;
        match self.columns.get_mut(name) {
            Some(column) => {
                let widened = if column.is_vacant() {
                    kind
                } else {
                    column.kind.widen(kind)
                };
                if widened != column.kind {
                    log::debug!("column '{}' declared {} -> {}", name, column.kind, widened);
                    column.kind = widened;
                }
                false
            }
            None => {
                log::debug!("adding {} column '{}'", kind, name);
                self.columns
                    .insert(name.to_string(), Column::new(name, kind, rows));
                true
            }
        }
    }

    /// Grow every column with absent cells up to `len` rows
    pub fn extend_rows(&mut self, len: usize) {
        if len <= self.row_count {
            return;
        }
        for column in self.columns.values_mut() {
            column.cells.resize(len, CellValue::Null);
        }
        self.row_count = len;
    }

    /// Write `values` into `column` starting at its first absent cell.
    ///
    /// When the column has no gap the values are appended after the last row.
    /// Every column is extended as needed so lengths stay equal. Returns the
    /// row index of the first written value.
    pub fn insert_next(&mut self, column: &str, values: Vec<CellValue>) -> Result<usize> {
        let start = self
            .columns
            .get(column)
            .ok_or_else(|| Error::Internal(format!("column '{}' does not exist", column)))?
            .first_gap()
            .unwrap_or(self.row_count);

        let needed = self.row_count.max(start + values.len());
        self.extend_rows(needed);

        let target = self
            .columns
            .get_mut(column)
            .ok_or_else(|| Error::Internal(format!("column '{}' does not exist", column)))?;

        log::debug!(
            "inserting {} value(s) into '{}' at row {}",
            values.len(),
            column,
            start
        );
        for (offset, value) in values.into_iter().enumerate() {
            target.cells[start + offset] = value;
        }

        Ok(start)
    }
}
