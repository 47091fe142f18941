use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required input artifact (lemma source directory or persisted index) is missing.
    #[error("Not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// A malformed line in a persisted index or registry. `line` is 1-based.
    #[error("{}:{line}: {message}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn source_not_found(path: impl AsRef<Path>) -> Self {
        Self::SourceNotFound { path: path.as_ref().to_path_buf() }
    }

    pub fn parse(file: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse { file: file.as_ref().to_path_buf(), line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
