//! Per-column descriptive statistics

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Column, ColumnKind, Table};

/// Summary of a whole table, derived on request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsRecord {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Summary {
    Numeric(NumericSummary),
    Text { distinct: usize },
}

/// Numeric description; values are NaN where undefined
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub q50: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Labelled values in display order
    pub fn fields(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Describe every column of `table`.
///
/// Numeric columns get count/mean/std/quantiles; text columns get the number of
/// distinct present values.
pub fn summarize(table: &Table) -> Result<StatisticsRecord> {
    let columns = table
        .columns()
        .map(|column| {
            let summary = match column.kind {
                ColumnKind::Number => Summary::Numeric(describe(column)?),
                ColumnKind::Text => Summary::Text {
                    distinct: column.values().collect::<FxHashSet<_>>().len(),
                },
            };
            Ok(ColumnSummary {
                name: column.name.clone(),
                summary,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StatisticsRecord {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns,
    })
}

fn describe(column: &Column) -> Result<NumericSummary> {
    let mut values = column
        .values()
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                Error::Internal(format!(
                    "numeric column '{}' holds non-numeric value {}",
                    column.name, v
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let mean = if count == 0 {
        f64::NAN
    } else {
        values.iter().sum::<f64>() / count as f64
    };
    let std = if count < 2 {
        f64::NAN
    } else {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        var.sqrt()
    };

    Ok(NumericSummary {
        count,
        mean,
        std,
        min: quantile(&values, 0.0),
        q25: quantile(&values, 0.25),
        q50: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: quantile(&values, 1.0),
    })
}

/// Linear-interpolated quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
