use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::StepCounts;
use crate::models::{ParseError, TransactionRecord, ValidationError};
use crate::storage::SinkError;

/// A record the sink refused even when written on its own.
#[derive(Debug, Error)]
#[error("Record [{}] for account [{}] was rejected by the sink: {}", .record.origin, .record.account_number, .source)]
pub struct WriteError {
    pub record: TransactionRecord,
    pub source: SinkError
}

impl WriteError {
    pub fn new(record: TransactionRecord, source: SinkError) -> Self {
        Self { record, source }
    }
}

/// Why a single item was skipped. None of these abort a run on their own.
#[derive(Debug, Error)]
pub enum SkipCause {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Write(#[from] WriteError)
}

/// Errors that stop the ingestion step.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Skip limit of [{limit}] exceeded with [{skips}] skipped items")]
    SkipLimitExceeded {
        limit: usize,
        skips: usize
    },
    #[error("Failed to list input directory [{}]: {}", .directory.display(), .source)]
    ListDirectory {
        directory: PathBuf,
        source: io::Error
    },
    #[error("Failed to read input file [{}]: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: io::Error
    },
    #[error("Record reader stopped unexpectedly: {0}")]
    ReaderTask(String)
}

/// A fatal ingestion error together with the counts gathered before it happened.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct IngestionFailure {
    pub counts: StepCounts,
    #[source]
    pub error: IngestionError
}

impl IngestionFailure {
    pub fn new(counts: StepCounts, error: IngestionError) -> Self {
        Self { counts, error }
    }
}
