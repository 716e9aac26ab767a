//! Error type shared by every stage of the formatter.
//!
//! Any of these aborts the run. Short or odd manifest lines are not errors;
//! they surface as missing values instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse mapping YAML {}: {source}", path.display())]
    MappingParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid mapping for column '{column}': {reason}")]
    InvalidMapping { column: String, reason: String },

    #[error("failed to parse XML {}: {reason}", path.display())]
    XmlParse { path: PathBuf, reason: String },

    #[error("failed to write table: {0}")]
    Table(#[from] csv::Error),
}

impl FormatError {
    /// Maps an I/O error on `path` to `NotFound` when the file is missing and
    /// to `Io` otherwise.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            FormatError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FormatError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
