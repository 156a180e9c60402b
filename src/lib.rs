//! skusheet - SKU tables backed by spreadsheet or CSV files
//!
//! Bulk delimited-text input is tokenized, validated and converted into typed
//! values, filled into the first gap of a column, and saved with a
//! copy-backup-restore protocol so a failed write never damages the file.

pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod session;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{CellValue, ColumnKind, Table};
pub use session::{
    apply_input, create_table, get_statistics, open_table, render_preview, save_table, Session,
};
pub use stats::StatisticsRecord;
