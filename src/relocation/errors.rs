use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Filesystem failures that stop relocation. Files moved before the failure
/// stay where they were moved to.
#[derive(Debug, Error)]
pub enum RelocationError {
    #[error("Failed to create directory [{}]: {}", .directory.display(), .source)]
    CreateDirectory {
        directory: PathBuf,
        source: io::Error
    },
    #[error("Failed to list input directory [{}]: {}", .directory.display(), .source)]
    ListDirectory {
        directory: PathBuf,
        source: io::Error
    },
    #[error("Failed to check error flag file [{}]: {}", .path.display(), .source)]
    Marker {
        path: PathBuf,
        source: io::Error
    },
    #[error("Target file [{}] already exists", .target.display())]
    TargetExists {
        target: PathBuf
    },
    #[error("Failed to move file [{}] to [{}]: {}", .from.display(), .to.display(), .source)]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error
    }
}
