use tracing::{error, info};

use crate::engine::{IngestionError, SkipCause};
use crate::relocation::RunErrorMarker;

/// Counts skipped items and flags the run as failed on the first one.
pub struct SkipTracker {
    marker: RunErrorMarker,
    limit: usize,
    marked: bool,
    read_skips: usize,
    process_skips: usize,
    write_skips: usize
}

impl SkipTracker {
    pub fn new(marker: RunErrorMarker, limit: usize) -> Self {
        Self {
            marker,
            limit,
            marked: false,
            read_skips: 0,
            process_skips: 0,
            write_skips: 0
        }
    }

    /// Accounts for one skipped item.
    ///
    /// # Errors
    /// Returns [`IngestionError::SkipLimitExceeded`] once the number of skips
    /// goes over the configured limit. Failing to create the run marker is
    /// logged and does not fail the call.
    pub async fn record(&mut self, cause: SkipCause) -> Result<(), IngestionError> {
        match &cause {
            SkipCause::Parse(_) => {
                error!("Error during reading, skipped: {cause}");
                self.read_skips += 1;
            }
            SkipCause::Validation(_) => {
                error!("Error during processing, skipped: {cause}");
                self.process_skips += 1;
            }
            SkipCause::Write(_) => {
                error!("Error during writing, skipped: {cause}");
                self.write_skips += 1;
            }
        }

        self.mark_run_failed().await;

        let skips = self.total();

        if skips > self.limit {
            return Err(IngestionError::SkipLimitExceeded { limit: self.limit, skips })
        }

        Ok(())
    }

    pub fn total(&self) -> usize {
        self.read_skips + self.process_skips + self.write_skips
    }

    pub fn read_skips(&self) -> usize {
        self.read_skips
    }

    pub fn process_skips(&self) -> usize {
        self.process_skips
    }

    pub fn write_skips(&self) -> usize {
        self.write_skips
    }

    async fn mark_run_failed(&mut self) {
        if self.marked {
            return;
        }

        match self.marker.create().await {
            Ok(()) => {
                info!("Created error flag file [{}]", self.marker.path().display());
                self.marked = true;
            }
            Err(error) => {
                //NOTE: Not marked, so the next skip tries again
                error!("Failed to create error flag file [{}]: {error}", self.marker.path().display());
            }
        }
    }
}
