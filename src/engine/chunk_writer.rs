use std::mem;
use std::slice;

use tracing::{debug, warn};

use crate::engine::WriteError;
use crate::models::TransactionRecord;
use crate::storage::TransactionSink;

/// Buffers validated records and writes them to the sink in fixed-size chunks.
///
/// A chunk is written with a single sink call, so it is stored entirely or
/// not at all. When the sink rejects a chunk, every record of that chunk is
/// retried as its own single-record batch; records still rejected are
/// returned as [`WriteError`]s for the caller to skip.
pub struct ChunkWriter<'a, S> {
    sink: &'a S,
    chunk_size: usize,
    buffer: Vec<TransactionRecord>,
    written: usize,
    commits: usize
}

impl<'a, S: TransactionSink> ChunkWriter<'a, S> {
    pub fn new(sink: &'a S, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);

        Self {
            sink,
            chunk_size,
            buffer: Vec::with_capacity(chunk_size),
            written: 0,
            commits: 0
        }
    }

    /// Buffers a record, writing the chunk once it is full.
    pub async fn push(&mut self, record: TransactionRecord) -> Vec<WriteError> {
        self.buffer.push(record);

        if self.buffer.len() >= self.chunk_size {
            return self.flush().await
        }

        Vec::new()
    }

    /// Writes whatever is buffered, even a partial chunk.
    pub async fn flush(&mut self) -> Vec<WriteError> {
        if self.buffer.is_empty() {
            return Vec::new()
        }

        let chunk = mem::replace(&mut self.buffer, Vec::with_capacity(self.chunk_size));

        match self.sink.write_chunk(&chunk).await {
            Ok(()) => {
                debug!("Wrote chunk of {} records", chunk.len());
                self.written += chunk.len();
                self.commits += 1;
                Vec::new()
            }
            Err(error) => {
                warn!("Chunk of {} records was rolled back, retrying records one by one: {error}", chunk.len());
                self.scan(chunk).await
            }
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    async fn scan(&mut self, chunk: Vec<TransactionRecord>) -> Vec<WriteError> {
        let mut failures = Vec::new();

        for record in chunk {
            match self.sink.write_chunk(slice::from_ref(&record)).await {
                Ok(()) => {
                    self.written += 1;
                    self.commits += 1;
                }
                Err(error) => failures.push(WriteError::new(record, error))
            }
        }

        failures
    }
}
