//! Excel workbook reading and writing

use std::fs;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use chrono::{Duration, NaiveDate, Timelike};
use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet, XlsxError};

use crate::config::Config;
use crate::error::{Error, IoError, IoErrorKind, Result};
use crate::model::{CellValue, Column, Table};

use super::csv::header_name;
use super::TableFormat;

/// Single-sheet `.xlsx` workbook, rewritten in full on every save
pub struct ExcelFormat;

impl TableFormat for ExcelFormat {
    fn read(&self, path: &Path, config: &Config) -> Result<Table> {
        // Surface not-found/permission before calamine folds them into its own errors
        fs::metadata(path).map_err(|e| IoError::from_io(path, e))?;

        let mut workbook = open_workbook_auto(path).map_err(|e| IoError::corrupt(path, e))?;

        // Get sheet name
        let sheet_name = match config.sheet_name {
            Some(ref name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| IoError::corrupt(path, "no sheets found in workbook"))?,
        };

        let range: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| IoError::corrupt(path, e))?;

        parse_range(range).ok_or_else(|| IoError::corrupt(path, "sheet has no header row").into())
    }

    fn write(&self, table: &Table, path: &Path, config: &Config) -> Result<()> {
        let xlsx = |e: XlsxError| Error::from(IoError::new(path, IoErrorKind::Other, e));

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(config.write_sheet_name()).map_err(xlsx)?;

        for (col, name) in table.column_names().enumerate() {
            worksheet
                .write_string(0, col_num(col)?, name)
                .map_err(xlsx)?;
        }

        for (row, cells) in table.rows().enumerate() {
            let row = row_num(row + 1)?;
            for (col, cell) in cells.into_iter().enumerate() {
                write_cell(worksheet, row, col_num(col)?, cell).map_err(xlsx)?;
            }
        }

        let bytes = workbook.save_to_buffer().map_err(xlsx)?;
        fs::write(path, bytes).map_err(|e| IoError::from_io(path, e))?;
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("xlsx")
    }
}

fn row_num(row: usize) -> Result<RowNum> {
    RowNum::try_from(row).map_err(|_| Error::Internal(format!("row {} exceeds sheet limits", row)))
}

fn col_num(col: usize) -> Result<ColNum> {
    ColNum::try_from(col)
        .map_err(|_| Error::Internal(format!("column {} exceeds sheet limits", col)))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
    }
    Ok(())
}

/// Turn a sheet range into a table; the first row is the header
fn parse_range(range: Range<Data>) -> Option<Table> {
    let mut rows = range.rows();
    let header = rows.next()?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); header.len()];
    for row in rows {
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(row.get(i).map(convert_cell).unwrap_or_default());
        }
    }

    let columns = header
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (name, cells))| Column::from_cells(header_name(&cell_to_string(name), i), cells))
        .collect();

    Some(Table::from_columns(columns))
}

fn cell_to_string(cell: &Data) -> String {
    match convert_cell(cell) {
        CellValue::Null => String::new(),
        other => other.display().into_owned(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::String(s.clone())
            }
        }
        Data::Float(f) => {
            // Check if it's actually an integer
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                CellValue::Int(*f as i64)
            } else {
                CellValue::Float(*f)
            }
        }
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match serial_to_text(dt.as_f64()) {
            Some(text) => CellValue::String(text),
            None => CellValue::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#{:?}", e)),
    }
}

/// Render an Excel date serial (days since 1899-12-30) as ISO text
fn serial_to_text(serial: f64) -> Option<String> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let datetime = epoch.checked_add_signed(Duration::try_milliseconds(millis)?)?;

    if datetime.num_seconds_from_midnight() == 0 {
        Some(datetime.format("%Y-%m-%d").to_string())
    } else {
        Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
