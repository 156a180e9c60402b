//! Editing session: the table being edited and the file it belongs to

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{convert, tokenize, validate};
use crate::model::{ColumnKind, Table};
use crate::output;
use crate::stats::{summarize, StatisticsRecord};
use crate::storage::FormatRegistry;

/// Create an empty table with the given column names
pub fn create_table<S: AsRef<str>>(column_names: &[S]) -> Result<Table> {
    Table::new(column_names)
}

/// Read the table stored at `path`
pub fn open_table(path: &Path, config: &Config) -> Result<Table> {
    FormatRegistry::new().load(path, config)
}

/// Write `table` to `path`, restoring the previous file if the write fails
pub fn save_table(table: &Table, path: &Path, config: &Config) -> Result<()> {
    FormatRegistry::new().save(table, path, config)
}

/// Describe every column of `table`
pub fn get_statistics(table: &Table) -> Result<StatisticsRecord> {
    summarize(table)
}

/// Text grid of `table` for display
pub fn render_preview(table: &Table) -> String {
    output::render_preview(table)
}

/// Parse `raw` as a batch of `kind` values and fill them into `column`.
///
/// Values start at the first absent cell of the column. Nothing in `table`
/// changes if any value is rejected. Returns the row of the first value.
pub fn apply_input(
    table: &mut Table,
    column: &str,
    raw: &str,
    kind: ColumnKind,
    config: &Config,
) -> Result<usize> {
    let column = column.trim();
    if column.is_empty() {
        return Err(Error::MissingColumnSelection);
    }

    validate(raw, kind, config)?;
    let tokens = tokenize(raw);
    log::debug!("{} token(s) for column '{}'", tokens.len(), column);

    let values = convert(&tokens, kind, column, table, config)?;
    table.insert_next(column, values)
}

/// A table together with the file it is saved to
pub struct Session {
    table: Table,
    path: PathBuf,
    config: Config,
    registry: FormatRegistry,
}

impl Session {
    /// Start a new file with the given columns and save it right away.
    ///
    /// A path without an extension gets `config.default_extension`.
    pub fn create<S: AsRef<str>>(path: &Path, column_names: &[S], config: Config) -> Result<Self> {
        let table = create_table(column_names)?;
        let path = if path.extension().is_none() {
            path.with_extension(&config.default_extension)
        } else {
            path.to_path_buf()
        };

        let session = Self {
            table,
            path,
            config,
            registry: FormatRegistry::new(),
        };
        session.save()?;
        Ok(session)
    }

    /// Open an existing file
    pub fn open(path: &Path, config: Config) -> Result<Self> {
        let registry = FormatRegistry::new();
        let table = registry.load(path, &config)?;
        Ok(Self {
            table,
            path: path.to_path_buf(),
            config,
            registry,
        })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fill `raw` into `column` and save the file.
    ///
    /// A rejected input leaves the table untouched. If only the save fails the
    /// edit stays in memory and the file on disk keeps its previous content;
    /// call [`save`](Self::save) again to retry.
    pub fn update_cell_bulk(&mut self, column: &str, raw: &str, kind: ColumnKind) -> Result<usize> {
        let start = apply_input(&mut self.table, column, raw, kind, &self.config)?;
        self.save()?;
        Ok(start)
    }

    /// Persist the table to its file
    pub fn save(&self) -> Result<()> {
        self.registry.save(&self.table, &self.path, &self.config)
    }

    pub fn statistics(&self) -> Result<StatisticsRecord> {
        get_statistics(&self.table)
    }

    pub fn preview(&self) -> String {
        render_preview(&self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;
    use crate::storage::backup_path;
    use std::fs;

    #[test]
    fn test_create_saves_and_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_default_extension("csv");

        let session = Session::create(&dir.path().join("sku"), &["sku", "color"], config).unwrap();

        assert_eq!(session.path(), dir.path().join("sku.csv"));
        assert!(session.path().exists());
        assert_eq!(session.preview(), output::EMPTY_PREVIEW);
    }

    #[test]
    fn test_create_rejects_empty_columns() {
        let dir = tempfile::tempdir().unwrap();
        let empty: [&str; 0] = [];
        let err = Session::create(&dir.path().join("sku.csv"), &empty, Config::default());
        assert!(matches!(err, Err(Error::EmptyColumnList)));
        assert!(!dir.path().join("sku.csv").exists());
    }

    #[test]
    fn test_update_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sku.xlsx");

        let mut session = Session::create(&path, &["sku", "color"], Config::default()).unwrap();
        session
            .update_cell_bulk("sku", "A1, A2；A3", ColumnKind::Text)
            .unwrap();
        session.update_cell_bulk("color", "red", ColumnKind::Text).unwrap();
        assert_eq!(session.update_cell_bulk("color", "blue|green", ColumnKind::Text).unwrap(), 1);
        session.update_cell_bulk("price", "9.5 / 12", ColumnKind::Number).unwrap();

        let reopened = Session::open(&path, Config::default()).unwrap();
        let table = reopened.table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["sku", "color", "price"]
        );
        assert_eq!(table.cell(2, "color"), Some(&CellValue::from("green")));
        assert_eq!(table.cell(1, "price"), Some(&CellValue::Int(12)));
        assert_eq!(table.cell(2, "price"), Some(&CellValue::Null));
        assert!(!backup_path(&path, ".bak").exists());
    }

    #[test]
    fn test_rejected_input_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sku.csv");
        let mut session = Session::create(&path, &["sku"], Config::default()).unwrap();
        session.update_cell_bulk("sku", "A1", ColumnKind::Text).unwrap();
        let before_file = fs::read(&path).unwrap();
        let before_table = session.table().clone();

        assert!(matches!(
            session.update_cell_bulk("qty", "1, 2x", ColumnKind::Number),
            Err(Error::NotANumber(_))
        ));
        assert!(matches!(
            session.update_cell_bulk("", "1", ColumnKind::Number),
            Err(Error::MissingColumnSelection)
        ));
        assert!(matches!(
            session.update_cell_bulk("sku", "<b>", ColumnKind::Text),
            Err(Error::IllegalCharacter('<'))
        ));
        assert!(matches!(
            session.update_cell_bulk("sku", "  ", ColumnKind::Text),
            Err(Error::EmptyInput)
        ));

        assert_eq!(session.table(), &before_table);
        assert_eq!(fs::read(&path).unwrap(), before_file);
    }

    #[test]
    fn test_number_into_fresh_text_column_becomes_numeric() {
        let mut table = create_table(&["qty"]).unwrap();
        apply_input(&mut table, "qty", "1,2,3,4", ColumnKind::Number, &Config::default()).unwrap();
        assert_eq!(table.column("qty").unwrap().kind, ColumnKind::Number);

        let stats = get_statistics(&table).unwrap();
        let crate::stats::Summary::Numeric(ref s) = stats.columns[0].summary else {
            panic!("expected numeric summary");
        };
        assert_eq!(s.mean, 2.5);

        // Mixing in text widens the declared kind
        apply_input(&mut table, "qty", "many", ColumnKind::Text, &Config::default()).unwrap();
        assert_eq!(table.column("qty").unwrap().kind, ColumnKind::Text);
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_fullwidth_input_end_to_end() {
        let mut table = create_table(&["qty"]).unwrap();
        apply_input(&mut table, "qty", "１２， ３.５", ColumnKind::Number, &Config::default())
            .unwrap();
        assert_eq!(table.cell(0, "qty"), Some(&CellValue::Int(12)));
        assert_eq!(table.cell(1, "qty"), Some(&CellValue::Float(3.5)));
    }

    #[test]
    fn test_csv_keeps_null_like_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.csv");
        let config = Config::default();
        let mut table = create_table(&["sku"]).unwrap();
        apply_input(&mut table, "region", "NA, EU, null", ColumnKind::Text, &config).unwrap();

        save_table(&table, &path, &config).unwrap();
        let mut loaded = open_table(&path, &config).unwrap();

        assert_eq!(
            loaded.column("region").unwrap().cells,
            vec![CellValue::from("NA"), CellValue::from("EU"), CellValue::from("null")]
        );
        assert_eq!(loaded.cell(0, "sku"), Some(&CellValue::Null));

        // Reloaded values are not gaps, so the next batch appends
        let start = apply_input(&mut loaded, "region", "APAC", ColumnKind::Text, &config).unwrap();
        assert_eq!(start, 3);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_table(&dir.path().join("missing.xlsx"), &Config::default()).unwrap_err();
        assert_eq!(err.io_kind(), Some(crate::error::IoErrorKind::NotFound));
    }

    #[test]
    fn test_failed_save_keeps_memory_edit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sku.csv");
        let mut session = Session::create(&path, &["sku"], Config::default()).unwrap();

        // Replace the file with a directory so the next write fails
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(session.update_cell_bulk("sku", "A1", ColumnKind::Text).is_err());
        assert_eq!(session.table().cell(0, "sku"), Some(&CellValue::from("A1")));
        assert!(path.is_dir());
    }
}
