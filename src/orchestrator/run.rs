use tracing::info;

use crate::engine::IngestionStep;
use crate::orchestrator::{traced, RunFailure, RunReport, RunStatus};
use crate::relocation::{Clock, FileRelocator, RunErrorMarker, SystemClock};
use crate::settings::Settings;
use crate::source::DirectorySource;
use crate::storage::{LoggedSink, TransactionSink};

/// Runs ingestion, then relocation, for one pipeline run.
///
/// Relocation runs after every ingestion that reached the end of its input,
/// with or without skips. It never runs after a fatal ingestion failure, so
/// the input files and the run marker are left for manual reconciliation.
///
/// There is no locking: two runs against the same input directory at the
/// same time will interfere with each other.
pub struct Orchestrator<S, C = SystemClock> {
    ingestion: IngestionStep<S>,
    relocator: FileRelocator<C>
}

impl<S: TransactionSink> Orchestrator<LoggedSink<S>, SystemClock> {
    /// Wires every component from the loaded settings.
    pub fn from_settings(settings: &Settings, sink: S) -> Self {
        let transaction = &settings.transaction;
        let input_dir = &transaction.input.dir;

        let ingestion = IngestionStep::new(
            DirectorySource::new(input_dir),
            LoggedSink::new(sink),
            RunErrorMarker::in_directory(input_dir)
        )
            .with_chunk_size(transaction.chunk.size)
            .with_skip_limit(settings.skip_limit());

        let relocator = FileRelocator::new(input_dir, &transaction.completed.dir, &transaction.error.dir);

        Self::new(ingestion, relocator)
    }
}

impl<S: TransactionSink, C: Clock> Orchestrator<S, C> {
    pub fn new(ingestion: IngestionStep<S>, relocator: FileRelocator<C>) -> Self {
        Self { ingestion, relocator }
    }

    pub fn ingestion(&self) -> &IngestionStep<S> {
        &self.ingestion
    }

    pub fn relocator(&self) -> &FileRelocator<C> {
        &self.relocator
    }

    pub async fn run(&mut self) -> RunReport {
        let counts = match traced("ingestion", self.ingestion.run()).await {
            Ok(counts) => counts,
            Err(failure) => {
                return RunReport {
                    status: RunStatus::Fatal,
                    counts: failure.counts,
                    relocation: None,
                    failure: Some(RunFailure::from(failure.error))
                }
            }
        };

        info!("Ingestion completed with the following results:");
        info!("Successfully processed records: {}", counts.write_count);
        info!("Failed records: {}", counts.skip_count());

        match traced("relocation", self.relocator.relocate()).await {
            Ok(summary) => {
                //NOTE: A marker left behind by an earlier aborted run also routes this run to error
                let status = if counts.skip_count() > 0 || summary.routed_to_error {
                    RunStatus::CompletedWithErrors
                } else {
                    RunStatus::Success
                };

                RunReport {
                    status,
                    counts,
                    relocation: Some(summary),
                    failure: None
                }
            }
            Err(error) => RunReport {
                status: RunStatus::Fatal,
                counts,
                relocation: None,
                failure: Some(RunFailure::from(error))
            }
        }
    }
}
