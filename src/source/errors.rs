use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::ParseError;

#[derive(Debug, Error)]
pub enum ReadError {
    /// The line was read but could not be parsed. Recoverable.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The file itself could not be opened or read.
    #[error("Error reading [{}]: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: io::Error
    }
}

impl ReadError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
