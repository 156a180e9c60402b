//! Plain-text statistics output

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::stats::{StatisticsRecord, Summary};

use super::OutputFormatter;

/// Line-oriented text output
pub struct TextOutput {
    precision: usize,
}

impl TextOutput {
    pub fn new() -> Self {
        Self { precision: 2 }
    }
}

impl Default for TextOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextOutput {
    fn render(&self, record: &StatisticsRecord, path: &Path, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "File: {}", path.display())?;
        writeln!(writer, "Rows: {}", record.row_count)?;
        writeln!(writer, "Columns: {}", record.column_count)?;

        for column in &record.columns {
            writeln!(writer)?;
            writeln!(writer, "{}:", column.name)?;
            match &column.summary {
                Summary::Numeric(numeric) => {
                    for (label, value) in numeric.fields() {
                        writeln!(writer, "  {:<6} {:.*}", label, self.precision, value)?;
                    }
                }
                Summary::Text { distinct } => {
                    writeln!(writer, "  distinct values: {}", distinct)?;
                }
            }
        }

        Ok(())
    }
}
