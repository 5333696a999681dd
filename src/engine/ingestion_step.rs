use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

use crate::engine::{
    ChunkWriter, IngestionError, IngestionFailure, SkipTracker, StepCounts, DEFAULT_CHUNK_SIZE, DEFAULT_SKIP_LIMIT
};
use crate::models::RawRecord;
use crate::processing::normalize;
use crate::relocation::RunErrorMarker;
use crate::source::{DirectorySource, ReadError, RecordReader};
use crate::storage::TransactionSink;

type ReadItem = Result<RawRecord, ReadError>;

/// Reads every input file, validates each record and writes the valid ones
/// to the sink in chunks, skipping what cannot be read, validated or written.
pub struct IngestionStep<S> {
    source: DirectorySource,
    sink: S,
    marker: RunErrorMarker,
    chunk_size: usize,
    skip_limit: usize,
    backpressure: usize
}

impl<S: TransactionSink> IngestionStep<S> {
    pub fn new(source: DirectorySource, sink: S, marker: RunErrorMarker) -> Self {
        Self {
            source,
            sink,
            marker,
            chunk_size: DEFAULT_CHUNK_SIZE,
            skip_limit: DEFAULT_SKIP_LIMIT,
            backpressure: 256
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_skip_limit(mut self, skip_limit: usize) -> Self {
        self.skip_limit = skip_limit;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Runs the step over the files currently in the input directory.
    ///
    /// # Errors
    /// Fails when the skip limit is exceeded, when the input directory cannot
    /// be listed or when an input file cannot be read. The failure carries the
    /// counts gathered up to that point. Chunks already written stay written.
    pub async fn run(&self) -> Result<StepCounts, IngestionFailure> {
        let mut counts = StepCounts::default();

        let files = match self.source.list().await {
            Ok(files) => files,
            Err(source) => {
                let error = IngestionError::ListDirectory {
                    directory: self.source.directory().to_path_buf(),
                    source
                };

                return Err(IngestionFailure::new(counts, error))
            }
        };

        counts.files = files.len();
        info!("Ingesting {} files from [{}]", files.len(), self.source.directory().display());

        let (sender, receiver) = mpsc::channel::<ReadItem>(self.backpressure);
        let reader_handle = self.spawn_record_reader(files, sender);
        let mut result = self.process_records(receiver, &mut counts).await;

        if let Err(error) = reader_handle.await {
            error!("Record reader failed: {error}");

            if result.is_ok() {
                result = Err(IngestionError::ReaderTask(error.to_string()));
            }
        }

        match result {
            Ok(()) => Ok(counts),
            Err(error) => Err(IngestionFailure::new(counts, error))
        }
    }

    fn spawn_record_reader(&self, files: Vec<PathBuf>, sender: mpsc::Sender<ReadItem>) -> JoinHandle<()> {
        spawn_blocking(move || {
            for item in RecordReader::new(files) {
                if sender.blocking_send(item).is_err() {
                    debug!("Record consumer stopped, closing reader");
                    break;
                }
            }
        })
    }

    async fn process_records(&self, mut receiver: mpsc::Receiver<ReadItem>, counts: &mut StepCounts) -> Result<(), IngestionError> {
        let mut writer = ChunkWriter::new(&self.sink, self.chunk_size);
        let mut tracker = SkipTracker::new(self.marker.clone(), self.skip_limit);

        let result = Self::drain(&mut receiver, &mut writer, &mut tracker, counts).await;

        //NOTE: Dropping the receiver here unblocks the reader if we stopped early
        drop(receiver);

        counts.write_count = writer.written();
        counts.commit_count = writer.commits();
        counts.read_skips = tracker.read_skips();
        counts.process_skips = tracker.process_skips();
        counts.write_skips = tracker.write_skips();

        if writer.buffered() > 0 {
            debug!("Discarding {} buffered records of the aborted chunk", writer.buffered());
        }

        result
    }

    async fn drain(
        receiver: &mut mpsc::Receiver<ReadItem>,
        writer: &mut ChunkWriter<'_, S>,
        tracker: &mut SkipTracker,
        counts: &mut StepCounts
    ) -> Result<(), IngestionError> {
        while let Some(item) = receiver.recv().await {
            let raw = match item {
                Ok(raw) => raw,
                Err(ReadError::Parse(error)) => {
                    tracker.record(error.into()).await?;
                    continue;
                }
                Err(ReadError::Io { path, source }) => {
                    return Err(IngestionError::Read { path, source })
                }
            };

            counts.read_count += 1;

            match normalize(raw) {
                Ok(record) => {
                    for failure in writer.push(record).await {
                        tracker.record(failure.into()).await?;
                    }
                }
                Err(error) => tracker.record(error.into()).await?
            }
        }

        for failure in writer.flush().await {
            tracker.record(failure.into()).await?;
        }

        Ok(())
    }
}
