//! JSON output format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::stats::{ColumnSummary, StatisticsRecord};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonStatistics<'a> {
    file: String,
    row_count: usize,
    column_count: usize,
    columns: &'a [ColumnSummary],
}

impl OutputFormatter for JsonOutput {
    fn render(&self, record: &StatisticsRecord, path: &Path, writer: &mut dyn Write) -> Result<()> {
        let output = JsonStatistics {
            file: path.display().to_string(),
            row_count: record.row_count,
            column_count: record.column_count,
            columns: &record.columns,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Summary;

    #[test]
    fn test_compact_output() {
        let record = StatisticsRecord {
            row_count: 2,
            column_count: 1,
            columns: vec![ColumnSummary {
                name: "color".into(),
                summary: Summary::Text { distinct: 2 },
            }],
        };

        let mut buf = Vec::new();
        JsonOutput::compact()
            .render(&record, Path::new("sku.csv"), &mut buf)
            .unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            r#"{"file":"sku.csv","row_count":2,"column_count":1,"columns":[{"name":"color","kind":"text","distinct":2}]}"#
        );
    }
}
