mod errors;
mod logged_sink;
mod memory_sink;
mod postgres_sink;
#[cfg(test)]
mod tests;

use std::future::Future;
use std::sync::Arc;

use crate::models::TransactionRecord;

pub use errors::SinkError;
pub use logged_sink::LoggedSink;
pub use memory_sink::MemorySink;
pub use postgres_sink::PostgresSink;

/// Destination of validated records.
///
/// A call persists the whole slice as one atomic batch: either every record
/// is durably stored or none is.
pub trait TransactionSink: Send + Sync {
    fn write_chunk(&self, records: &[TransactionRecord]) -> impl Future<Output = Result<(), SinkError>> + Send;
}

impl<S: TransactionSink> TransactionSink for Arc<S> {
    fn write_chunk(&self, records: &[TransactionRecord]) -> impl Future<Output = Result<(), SinkError>> + Send {
        self.as_ref().write_chunk(records)
    }
}
