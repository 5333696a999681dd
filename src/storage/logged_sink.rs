use tracing::{debug, warn};

use crate::models::TransactionRecord;
use crate::storage::{SinkError, TransactionSink};

/// Wraps a sink and logs every chunk handed to it and how the write ended.
pub struct LoggedSink<S> {
    inner: S
}

impl<S> LoggedSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: TransactionSink> TransactionSink for LoggedSink<S> {
    async fn write_chunk(&self, records: &[TransactionRecord]) -> Result<(), SinkError> {
        debug!("Entering write_chunk with [{}] records", records.len());

        let result = self.inner.write_chunk(records).await;

        match &result {
            Ok(()) => debug!("write_chunk returned for [{}] records", records.len()),
            Err(error) => warn!("write_chunk failed for [{}] records: {error}", records.len())
        }

        result
    }
}
