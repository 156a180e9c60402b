//! Configuration handling for skusheet

/// Longest text value accepted by the converter
pub const MAX_TEXT_LEN: usize = 1000;

/// Largest absolute numeric value accepted on input
pub const NUMBER_LIMIT: f64 = 1e10;

/// Output format for statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration shared by input handling, storage and output
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of characters in a text value
    pub max_text_len: usize,
    /// Maximum absolute value of a number
    pub number_limit: f64,
    /// Suffix appended to the target path for the save backup
    pub backup_suffix: String,
    /// Excel sheet to read (first sheet when unset) and the name used on write
    pub sheet_name: Option<String>,
    /// Extension given to new files whose path has none
    pub default_extension: String,
    /// Output format for statistics
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_text_len: MAX_TEXT_LEN,
            number_limit: NUMBER_LIMIT,
            backup_suffix: ".bak".to_string(),
            sheet_name: None,
            default_extension: "xlsx".to_string(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum text length
    pub fn with_max_text_len(mut self, len: usize) -> Self {
        self.max_text_len = len;
        self
    }

    /// Set the numeric bound
    pub fn with_number_limit(mut self, limit: f64) -> Self {
        self.number_limit = limit;
        self
    }

    /// Set the backup suffix
    pub fn with_backup_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.backup_suffix = suffix.into();
        self
    }

    /// Set Excel sheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = Some(name.into());
        self
    }

    /// Set the extension used for new files without one
    pub fn with_default_extension(mut self, ext: impl Into<String>) -> Self {
        self.default_extension = ext.into().trim_start_matches('.').to_string();
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Sheet name used when writing a workbook
    pub fn write_sheet_name(&self) -> &str {
        self.sheet_name.as_deref().unwrap_or("Sheet1")
    }
}
