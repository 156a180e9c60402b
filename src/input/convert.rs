//! Conversion of tokens into typed cell values

use std::num::IntErrorKind;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{CellValue, ColumnKind, Table};

use super::validate::normalize_digits;

/// Characters of an over-long text kept in the error message
const PREVIEW_CHARS: usize = 50;

/// Convert `tokens` into values of `kind` and make sure `column` exists.
///
/// Every token is converted before the table is touched, so a rejected batch
/// leaves `table` unchanged. On success the target column is created if
/// missing (all rows absent); this is the only mutation performed here.
pub fn convert(
    tokens: &[String],
    kind: ColumnKind,
    column: &str,
    table: &mut Table,
    config: &Config,
) -> Result<Vec<CellValue>> {
    let values = match kind {
        ColumnKind::Number => tokens
            .iter()
            .map(|t| parse_number(t, config.number_limit))
            .collect::<Result<Vec<_>>>()?,
        ColumnKind::Text => tokens
            .iter()
            .map(|t| check_text(t, config.max_text_len))
            .collect::<Result<Vec<_>>>()?,
    };

    table.ensure_column(column, kind);
    Ok(values)
}

fn parse_number(token: &str, limit: f64) -> Result<CellValue> {
    let digits = normalize_digits(token);
    let value = if digits.contains('.') {
        let f: f64 = digits
            .parse()
            .map_err(|_| Error::NotANumber(token.to_string()))?;
        if !f.is_finite() {
            return Err(Error::NotANumber(token.to_string()));
        }
        CellValue::Float(f)
    } else {
        match digits.parse::<i64>() {
            Ok(i) => CellValue::Int(i),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(Error::OutOfRange(token.to_string()));
            }
            Err(_) => return Err(Error::NotANumber(token.to_string())),
        }
    };

    match value.as_f64() {
        Some(v) if v.abs() > limit => Err(Error::OutOfRange(token.to_string())),
        _ => Ok(value),
    }
}

fn check_text(token: &str, max_len: usize) -> Result<CellValue> {
    let len = token.chars().count();
    if len > max_len {
        return Err(Error::TextTooLong {
            preview: token.chars().take(PREVIEW_CHARS).collect(),
            len,
        });
    }
    Ok(CellValue::String(token.to_string()))
}
