//! Column metadata and declared kinds

use super::table::CellValue;

/// Declared kind of an input batch or a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Number,
    #[default]
    Text,
}

impl ColumnKind {
    /// Widen the kind to accommodate another kind
    pub fn widen(self, other: ColumnKind) -> ColumnKind {
        if self == other {
            self
        } else {
            ColumnKind::Text
        }
    }

    /// Infer the kind from stored values
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> ColumnKind {
        let mut seen = false;
        for cell in cells {
            match cell {
                CellValue::Null => {}
                CellValue::Int(_) | CellValue::Float(_) => seen = true,
                _ => return ColumnKind::Text,
            }
        }
        if seen {
            ColumnKind::Number
        } else {
            ColumnKind::Text
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Number => write!(f, "number"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// A named column and its cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Declared kind
    pub kind: ColumnKind,
    /// Cells, one per table row; absent cells are `CellValue::Null`
    pub cells: Vec<CellValue>,
}

impl Column {
    /// Create a column with `rows` absent cells
    pub fn new(name: impl Into<String>, kind: ColumnKind, rows: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            cells: vec![CellValue::Null; rows],
        }
    }

    /// Create a column from loaded cells, inferring its kind
    pub fn from_cells(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        let kind = ColumnKind::infer(&cells);
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Index of the first absent cell
    pub fn first_gap(&self) -> Option<usize> {
        self.cells.iter().position(CellValue::is_null)
    }

    /// Whether every cell is absent
    pub fn is_vacant(&self) -> bool {
        self.cells.iter().all(CellValue::is_null)
    }

    /// Iterator over present values
    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().filter(|c| !c.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(ColumnKind::Number.widen(ColumnKind::Number), ColumnKind::Number);
        assert_eq!(ColumnKind::Number.widen(ColumnKind::Text), ColumnKind::Text);
        assert_eq!(ColumnKind::Text.widen(ColumnKind::Number), ColumnKind::Text);
    }

    #[test]
    fn test_infer() {
        let cells = vec![CellValue::Int(1), CellValue::Null, CellValue::Float(2.5)];
        assert_eq!(ColumnKind::infer(&cells), ColumnKind::Number);

        let cells = vec![CellValue::Int(1), CellValue::from("x")];
        assert_eq!(ColumnKind::infer(&cells), ColumnKind::Text);

        let cells = vec![CellValue::Null, CellValue::Null];
        assert_eq!(ColumnKind::infer(&cells), ColumnKind::Text);
    }

    #[test]
    fn test_first_gap() {
        let mut col = Column::new("color", ColumnKind::Text, 3);
        assert_eq!(col.first_gap(), Some(0));
        col.cells[0] = CellValue::from("red");
        assert_eq!(col.first_gap(), Some(1));
        col.cells[1] = CellValue::from("blue");
        col.cells[2] = CellValue::from("green");
        assert_eq!(col.first_gap(), None);
        assert_eq!(col.values().count(), 3);
    }
}
