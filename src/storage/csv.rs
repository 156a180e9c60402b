//! CSV reading and writing

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::Config;
use crate::error::{IoError, IoErrorKind, Result};
use crate::model::{CellValue, Column, Table};

use super::TableFormat;

/// UTF-8 byte-order mark written ahead of the header
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated text, UTF-8 with a leading byte-order mark
pub struct CsvFormat;

impl TableFormat for CsvFormat {
    fn read(&self, path: &Path, _config: &Config) -> Result<Table> {
        let bytes = fs::read(path).map_err(|e| IoError::from_io(path, e))?;
        let data = bytes.strip_prefix(BOM).unwrap_or(&bytes[..]);

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        // Read headers
        let headers = csv_reader
            .headers()
            .map_err(|e| csv_error(path, e))?
            .clone();

        if headers.is_empty() {
            return Err(IoError::corrupt(path, "no header row").into());
        }

        let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

        for result in csv_reader.records() {
            let record = result.map_err(|e| csv_error(path, e))?;
            for (i, cells) in columns.iter_mut().enumerate() {
                // Short rows are padded with absent cells
                cells.push(record.get(i).map(parse_cell_value).unwrap_or_default());
            }
        }

        let columns = headers
            .iter()
            .zip(columns)
            .enumerate()
            .map(|(i, (name, cells))| Column::from_cells(header_name(name, i), cells))
            .collect();

        Ok(Table::from_columns(columns))
    }

    fn write(&self, table: &Table, path: &Path, _config: &Config) -> Result<()> {
        let file = File::create(path).map_err(|e| IoError::from_io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(BOM).map_err(|e| IoError::from_io(path, e))?;

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(table.column_names())
            .map_err(|e| csv_error(path, e))?;

        for row in table.rows() {
            csv_writer
                .write_record(row.iter().map(|cell| cell.to_field().into_owned()))
                .map_err(|e| csv_error(path, e))?;
        }

        csv_writer.flush().map_err(|e| IoError::from_io(path, e))?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "txt")
    }
}

pub(crate) fn header_name(name: &str, index: usize) -> String {
    let name = name.trim();
    if name.is_empty() {
        format!("Column{}", index + 1)
    } else {
        name.to_string()
    }
}

fn csv_error(path: &Path, err: csv::Error) -> IoError {
    let kind = match err.kind() {
        csv::ErrorKind::Io(e) => IoErrorKind::from(e.kind()),
        csv::ErrorKind::Utf8 { .. } => IoErrorKind::Encoding,
        _ => IoErrorKind::CorruptFormat,
    };
    IoError::new(path, kind, err)
}

/// Parse a field into a CellValue with type inference
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    // Only an empty field is absent; the writer never emits anything else for one
    if trimmed.is_empty() {
        return CellValue::Null;
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Try parsing as float
    if let Ok(f) = trimmed.parse::<f64>() {
        if f.is_finite() {
            return CellValue::Float(f);
        }
    }

    CellValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnKind;

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(""), CellValue::Null);
        assert_eq!(parse_cell_value("  "), CellValue::Null);
        assert_eq!(parse_cell_value("NaN"), CellValue::from("NaN"));
        assert_eq!(parse_cell_value("NA"), CellValue::from("NA"));
        assert_eq!(parse_cell_value("null"), CellValue::from("null"));
        assert_eq!(parse_cell_value("42"), CellValue::Int(42));
        assert_eq!(parse_cell_value("-3.5"), CellValue::Float(-3.5));
        assert_eq!(parse_cell_value("inf"), CellValue::from("inf"));
        assert_eq!(parse_cell_value("red"), CellValue::from("red"));
    }

    #[test]
    fn test_write_starts_with_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sku.csv");
        let mut table = Table::new(&["名称", "qty"]).unwrap();
        table.insert_next("名称", vec!["衬衫".into()]).unwrap();

        CsvFormat.write(&table, &path, &Config::default()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(BOM));
        let text = String::from_utf8(bytes[BOM.len()..].to_vec()).unwrap();
        assert_eq!(text, "名称,qty\n衬衫,\n");
    }

    #[test]
    fn test_read_pads_short_rows_and_infers_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sku.csv");
        fs::write(&path, "sku,price,\nA1,2.5,x\nA2\n").unwrap();

        let table = CsvFormat.read(&path, &Config::default()).unwrap();

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["sku", "price", "Column3"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(1, "price"), Some(&CellValue::Null));
        assert_eq!(table.column("price").unwrap().kind, ColumnKind::Number);
        assert_eq!(table.column("sku").unwrap().kind, ColumnKind::Text);
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, b"sku\n\xFF\xFE\n").unwrap();

        let err = CsvFormat.read(&path, &Config::default()).unwrap_err();
        assert_eq!(err.io_kind(), Some(IoErrorKind::Encoding));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvFormat
            .read(&dir.path().join("missing.csv"), &Config::default())
            .unwrap_err();
        assert_eq!(err.io_kind(), Some(IoErrorKind::NotFound));
    }
}
