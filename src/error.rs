//! Error types for table editing and persistence

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to the caller of any table operation
#[derive(Debug, Error)]
pub enum Error {
    #[error("input must not be empty")]
    EmptyInput,

    #[error("input contains an illegal character '{0}'")]
    IllegalCharacter(char),

    #[error("'{0}' is not a valid number")]
    NotANumber(String),

    #[error("value {0} is out of range")]
    OutOfRange(String),

    #[error("text is too long ({len} characters): {preview}...")]
    TextTooLong { preview: String, len: usize },

    #[error("at least one column name is required")]
    EmptyColumnList,

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("no column selected")]
    MissingColumnSelection,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Classification of a storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    NotFound,
    PermissionDenied,
    CorruptFormat,
    Encoding,
    Other,
}

impl fmt::Display for IoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoErrorKind::NotFound => write!(f, "file not found"),
            IoErrorKind::PermissionDenied => write!(f, "permission denied"),
            IoErrorKind::CorruptFormat => write!(f, "corrupt file"),
            IoErrorKind::Encoding => write!(f, "encoding error"),
            IoErrorKind::Other => write!(f, "I/O error"),
        }
    }
}

impl From<std::io::ErrorKind> for IoErrorKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => IoErrorKind::Encoding,
            _ => IoErrorKind::Other,
        }
    }
}

/// A failed read or write of a table file
#[derive(Debug, Error)]
#[error("{kind}: {}: {source}", path.display())]
pub struct IoError {
    pub path: PathBuf,
    pub kind: IoErrorKind,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl IoError {
    pub fn new(
        path: &Path,
        kind: IoErrorKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            source: source.into(),
        }
    }

    /// Wrap a std I/O error, keeping its not-found/permission classification
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        Self::new(path, IoErrorKind::from(err.kind()), err)
    }

    pub fn corrupt(path: &Path, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::new(path, IoErrorKind::CorruptFormat, source)
    }
}

impl Error {
    /// Storage failure classification, if this is a storage error
    pub fn io_kind(&self) -> Option<IoErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind),
            _ => None,
        }
    }
}
