use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tokio::fs::{self, OpenOptions};

/// File name of the sentinel left in the input directory when a run skipped anything.
pub const MARKER_FILE_NAME: &str = "processing_error.flag";

/// Run-scoped "something failed" flag, persisted as an empty file.
///
/// Only the existence of the file matters. The flag is not per input file:
/// once set, every file of the run is routed to the error directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunErrorMarker {
    path: PathBuf
}

impl RunErrorMarker {
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(MARKER_FILE_NAME)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the marker. Creating an existing marker is a no-op.
    pub async fn create(&self) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map(|_| ())
    }

    pub async fn exists(&self) -> io::Result<bool> {
        fs::try_exists(&self.path).await
    }

    /// Removes the marker. Removing a missing marker is a no-op.
    pub async fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path).await {
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            result => result
        }
    }
}
