//! Row-major text grid of a table

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

/// Placeholder shown when the table has no rows or no columns
pub const EMPTY_PREVIEW: &str = "No data";

/// Render the table as a grid: one header line, one line per row, with the
/// row index in the first column
pub fn render_preview(table: &Table) -> String {
    if table.is_empty() {
        return EMPTY_PREVIEW.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(std::iter::once(String::new()).chain(table.column_names().map(String::from)));

    for (index, row) in table.rows().enumerate() {
        builder.push_record(
            std::iter::once(index.to_string()).chain(row.iter().map(|c| c.display().into_owned())),
        );
    }

    let mut grid = builder.build();
    grid.with(Style::modern());
    grid.to_string()
}
