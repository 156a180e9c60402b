//! Output formatting for previews and statistics

mod json;
mod preview;
mod text;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::stats::StatisticsRecord;

pub use json::JsonOutput;
pub use preview::{render_preview, EMPTY_PREVIEW};
pub use text::TextOutput;

/// Trait for statistics formatters
pub trait OutputFormatter {
    /// Render a statistics record for the file at `path` to a writer
    fn render(&self, record: &StatisticsRecord, path: &Path, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Text => Box::new(TextOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render statistics to stdout
pub fn render_to_stdout(record: &StatisticsRecord, path: &Path, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout();
    formatter.render(record, path, &mut stdout)
}
