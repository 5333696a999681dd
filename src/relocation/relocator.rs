use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::relocation::{destination_name, Clock, RelocationError, RunErrorMarker, SystemClock, TIMESTAMP_FORMAT};
use crate::source::DirectorySource;

/// Progress of a relocation pass.
///
/// `Idle -> Preparing -> Moving -> Cleanup -> Done`, or `Failed` from any
/// step that hit a filesystem error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelocationState {
    Idle,
    Preparing,
    Moving,
    Cleanup,
    Done,
    Failed
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatedFile {
    pub from: PathBuf,
    pub to: PathBuf
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationSummary {
    /// Whether the run marker sent every file to the error directory.
    pub routed_to_error: bool,
    pub files: Vec<RelocatedFile>
}

/// Moves the input files of a finished run to the completed or error directory.
///
/// The destination depends only on the run marker: if it exists every file
/// goes to the error directory, otherwise every file goes to the completed
/// directory. The marker is removed once all files have been moved.
pub struct FileRelocator<C = SystemClock> {
    source: DirectorySource,
    completed_dir: PathBuf,
    error_dir: PathBuf,
    marker: RunErrorMarker,
    clock: C,
    state: RelocationState
}

impl FileRelocator<SystemClock> {
    pub fn new(input_dir: impl Into<PathBuf>, completed_dir: impl Into<PathBuf>, error_dir: impl Into<PathBuf>) -> Self {
        let input_dir = input_dir.into();

        Self {
            marker: RunErrorMarker::in_directory(&input_dir),
            source: DirectorySource::new(input_dir),
            completed_dir: completed_dir.into(),
            error_dir: error_dir.into(),
            clock: SystemClock,
            state: RelocationState::Idle
        }
    }
}

impl<C: Clock> FileRelocator<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> FileRelocator<D> {
        FileRelocator {
            source: self.source,
            completed_dir: self.completed_dir,
            error_dir: self.error_dir,
            marker: self.marker,
            clock,
            state: self.state
        }
    }

    pub fn state(&self) -> RelocationState {
        self.state
    }

    pub fn marker(&self) -> &RunErrorMarker {
        &self.marker
    }

    /// Runs one relocation pass over the files currently in the input directory.
    ///
    /// # Errors
    /// Any filesystem failure stops the pass immediately. Files already moved
    /// stay moved, the rest stay in the input directory and the marker is
    /// left in place.
    pub async fn relocate(&mut self) -> Result<RelocationSummary, RelocationError> {
        info!(
            "Starting to move files from [{}] to [{}] or [{}]",
            self.source.directory().display(),
            self.completed_dir.display(),
            self.error_dir.display()
        );

        self.state = RelocationState::Idle;

        let result = self.execute().await;

        if result.is_err() {
            self.transition(RelocationState::Failed);
        }

        result
    }

    async fn execute(&mut self) -> Result<RelocationSummary, RelocationError> {
        self.transition(RelocationState::Preparing);

        create_directory(&self.completed_dir).await?;
        create_directory(&self.error_dir).await?;

        self.transition(RelocationState::Moving);

        let routed_to_error = self.marker.exists().await
            .map_err(|source| RelocationError::Marker { path: self.marker.path().to_path_buf(), source })?;

        info!("Run error flag present: {routed_to_error}");

        let files = self.source.list().await
            .map_err(|source| RelocationError::ListDirectory { directory: self.source.directory().to_path_buf(), source })?;

        let target_dir = if routed_to_error { &self.error_dir } else { &self.completed_dir };
        let mut relocated = Vec::with_capacity(files.len());

        for file in files {
            let Some(file_name) = file.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            let timestamp = self.clock.now().format(TIMESTAMP_FORMAT).to_string();
            let target = target_dir.join(destination_name(file_name, &timestamp, routed_to_error));

            move_file(&file, &target).await?;

            if routed_to_error {
                info!("File [{}] was part of a failed run, moved to [{}]", file.display(), target.display());
            } else {
                info!("Successfully processed file [{}], moved to [{}]", file.display(), target.display());
            }

            relocated.push(RelocatedFile { from: file, to: target });
        }

        self.transition(RelocationState::Cleanup);

        if routed_to_error {
            match self.marker.clear().await {
                Ok(()) => info!("Deleted error flag file [{}]", self.marker.path().display()),
                Err(error) => warn!("Failed to delete error flag file [{}]: {error}", self.marker.path().display())
            }
        }

        self.transition(RelocationState::Done);

        Ok(RelocationSummary {
            routed_to_error,
            files: relocated
        })
    }

    fn transition(&mut self, next: RelocationState) {
        debug!("Relocation {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

async fn create_directory(directory: &Path) -> Result<(), RelocationError> {
    let failure = |source| RelocationError::CreateDirectory { directory: directory.to_path_buf(), source };

    let existed = fs::try_exists(directory).await.map_err(failure)?;

    //NOTE: Also fails when the path exists but is not a directory
    fs::create_dir_all(directory).await.map_err(failure)?;

    if !existed {
        info!("Created directory [{}]", directory.display());
    }

    Ok(())
}

/// Moves a file without ever overwriting the target, falling back to copy and
/// delete when source and target live on different filesystems.
async fn move_file(from: &Path, to: &Path) -> Result<(), RelocationError> {
    let failure = |source| RelocationError::Move { from: from.to_path_buf(), to: to.to_path_buf(), source };

    if fs::try_exists(to).await.map_err(failure)? {
        return Err(RelocationError::TargetExists { target: to.to_path_buf() })
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::CrossesDevices => {
            debug!("Cross-device move of [{}], copying instead", from.display());
            fs::copy(from, to).await.map_err(failure)?;
            fs::remove_file(from).await.map_err(failure)
        }
        Err(error) => Err(failure(error))
    }
}
