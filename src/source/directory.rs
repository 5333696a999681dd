use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use crate::source::INPUT_SUFFIX;

/// Discovers the input files of a run.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
    suffix: String
}

impl DirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            suffix: INPUT_SUFFIX.to_string()
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Lists the regular files directly inside the directory whose name ends
    /// with the suffix, sorted by name.
    ///
    /// A missing or empty directory yields an empty list. Sub-directories are
    /// never descended into.
    pub async fn list(&self) -> io::Result<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!("Input directory [{}] does not exist", self.directory.display());
                return Ok(Vec::new())
            }
            Err(error) => return Err(error)
        };

        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            let matches_suffix = entry.file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(&self.suffix));

            if !matches_suffix || !fs::metadata(&path).await?.is_file() {
                continue;
            }

            files.push(path);
        }

        //NOTE: read_dir order is whatever the filesystem returns, sorting keeps runs reproducible
        files.sort();

        if files.is_empty() {
            warn!("No {} files found in directory [{}]", self.suffix, self.directory.display());
        } else {
            debug!("Found {} files in directory [{}]", files.len(), self.directory.display());
        }

        Ok(files)
    }
}
