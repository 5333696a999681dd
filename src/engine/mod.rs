mod chunk_writer;
mod errors;
mod ingestion_step;
mod skip_tracker;

pub use chunk_writer::ChunkWriter;
pub use errors::{IngestionError, IngestionFailure, SkipCause, WriteError};
pub use ingestion_step::IngestionStep;
pub use skip_tracker::SkipTracker;

/// Records buffered before a batch is written.
pub const DEFAULT_CHUNK_SIZE: usize = 10;
/// Skips tolerated before a run is aborted. Effectively unbounded.
pub const DEFAULT_SKIP_LIMIT: usize = usize::MAX;

/// What the ingestion step did, mirroring the counters of a batch step execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounts {
    /// Input files discovered for the run.
    pub files: usize,
    /// Lines successfully parsed into records.
    pub read_count: usize,
    /// Records durably written to the sink.
    pub write_count: usize,
    /// Successful batch writes.
    pub commit_count: usize,
    /// Lines skipped because they could not be parsed.
    pub read_skips: usize,
    /// Records skipped because they failed validation.
    pub process_skips: usize,
    /// Records skipped because the sink rejected them.
    pub write_skips: usize
}

impl StepCounts {
    pub fn skip_count(&self) -> usize {
        self.read_skips + self.process_skips + self.write_skips
    }
}
