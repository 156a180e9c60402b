//! Storage layer for reading and writing table files

mod backup;
mod csv;
mod excel;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::model::Table;

pub use self::backup::{backup_path, write_with_backup};
pub use self::csv::CsvFormat;
pub use self::excel::ExcelFormat;

/// A file format a table can be read from and written to
pub trait TableFormat: Send + Sync {
    /// Read a file into a Table
    fn read(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Write the whole table to `path`, replacing its contents
    fn write(&self, table: &Table, path: &Path, config: &Config) -> Result<()>;

    /// Check if this format handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Picks a format by file extension; anything unrecognised is treated as CSV
pub struct FormatRegistry {
    formats: Vec<Box<dyn TableFormat>>,
    fallback: Box<dyn TableFormat>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a registry with all supported formats
    pub fn new() -> Self {
        Self {
            formats: vec![Box::new(ExcelFormat), Box::new(CsvFormat)],
            fallback: Box::new(CsvFormat),
        }
    }

    /// Get the format for the given file path
    pub fn get_format(&self, path: &Path) -> &dyn TableFormat {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        self.formats
            .iter()
            .find(|f| f.supports_extension(&ext))
            .unwrap_or(&self.fallback)
            .as_ref()
    }

    /// Read a table from `path`
    pub fn load(&self, path: &Path, config: &Config) -> Result<Table> {
        let table = self.get_format(path).read(path, config)?;
        log::info!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Persist `table` to `path` under the backup-restore protocol
    pub fn save(&self, table: &Table, path: &Path, config: &Config) -> Result<()> {
        save_with(self.get_format(path), table, path, config)
    }
}

/// Persist `table` with an explicit format under the backup-restore protocol
pub fn save_with(
    format: &dyn TableFormat,
    table: &Table,
    path: &Path,
    config: &Config,
) -> Result<()> {
    write_with_backup(path, &config.backup_suffix, |target| {
        format.write(table, target, config)
    })?;
    log::info!("saved {} ({} rows)", path.display(), table.row_count());
    Ok(())
}
