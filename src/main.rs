//! skusheet - SKU tables backed by spreadsheet or CSV files

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use skusheet::config::{Config, OutputFormat};
use skusheet::input::tokenize;
use skusheet::output::render_to_stdout;
use skusheet::{ColumnKind, Session};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliKind {
    Text,
    Number,
}

impl From<CliKind> for ColumnKind {
    fn from(k: CliKind) -> Self {
        match k {
            CliKind::Text => ColumnKind::Text,
            CliKind::Number => ColumnKind::Number,
        }
    }
}

/// Keep SKU tables in Excel or CSV files
#[derive(Parser, Debug)]
#[command(name = "skusheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// For Excel files: which sheet to read and the name to write
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new file with the given columns
    Create {
        /// File to create (.xlsx or .csv)
        path: PathBuf,

        /// Column names, separated by commas, semicolons, slashes, etc.
        columns: String,

        /// Extension used when PATH has none
        #[arg(long, default_value = "xlsx")]
        extension: String,
    },

    /// Print the table
    Show {
        path: PathBuf,
    },

    /// Fill values into the first empty cells of a column and save
    Add {
        path: PathBuf,

        /// Target column (created if missing)
        #[arg(short, long)]
        column: String,

        /// How to interpret the values
        #[arg(short, long, value_enum, default_value = "text")]
        kind: CliKind,

        /// Values, separated by commas, semicolons, slashes, etc.
        #[arg(allow_hyphen_values = true)]
        values: String,
    },

    /// Print per-column statistics
    Stats {
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: CliOutputFormat,
    },

    /// List column names and declared kinds
    Columns {
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let stderr = StandardStream::stderr(ColorChoice::Auto);
            let _ = print_status(stderr, Color::Red, "error:", &format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::default();
    if let Some(sheet) = cli.sheet {
        config = config.with_sheet_name(sheet);
    }

    match cli.command {
        Command::Create {
            path,
            columns,
            extension,
        } => {
            let names = tokenize(&columns);
            let session = Session::create(&path, names.as_slice(), config.with_default_extension(extension))
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            success(&format!(
                "created {} with {} column(s)",
                session.path().display(),
                session.table().column_count()
            ))?;
        }
        Command::Show { path } => {
            let session = open(&path, config)?;
            println!("{}", session.preview());
        }
        Command::Add {
            path,
            column,
            kind,
            values,
        } => {
            let mut session = open(&path, config)?;
            let before = session.table().row_count();
            let start = session
                .update_cell_bulk(&column, &values, kind.into())
                .with_context(|| {
                    format!("Failed to update column '{}' in {}", column, path.display())
                })?;
            success(&format!(
                "updated '{}' from row {} ({} -> {} rows)",
                column,
                start,
                before,
                session.table().row_count()
            ))?;
            println!("{}", session.preview());
        }
        Command::Stats { path, format } => {
            let session = open(&path, config.with_output_format(format.into()))?;
            let record = session.statistics()?;
            render_to_stdout(&record, session.path(), session.config().output_format)?;
        }
        Command::Columns { path } => {
            let session = open(&path, config)?;
            for column in session.table().columns() {
                println!("{}\t{}", column.name, column.kind);
            }
        }
    }

    Ok(())
}

fn open(path: &Path, config: Config) -> Result<Session> {
    Session::open(path, config).with_context(|| format!("Failed to open file: {}", path.display()))
}

fn success(message: &str) -> std::io::Result<()> {
    print_status(StandardStream::stdout(ColorChoice::Auto), Color::Green, "ok:", message)
}

fn print_status(
    mut stream: StandardStream,
    color: Color,
    label: &str,
    message: &str,
) -> std::io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stream, "{}", label)?;
    stream.reset()?;
    writeln!(stream, " {}", message)
}
