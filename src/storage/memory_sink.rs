use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::models::TransactionRecord;
use crate::storage::{SinkError, TransactionSink};

/// Keeps persisted records in memory, keyed by a generated row id.
///
/// Used for dry runs, where records go through the whole pipeline without
/// touching a database.
pub struct MemorySink {
    rows: DashMap<u64, TransactionRecord>,
    batches: DashMap<u64, usize>,
    next_row_id: AtomicU64,
    next_batch_id: AtomicU64
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            batches: DashMap::new(),
            next_row_id: AtomicU64::new(1),
            next_batch_id: AtomicU64::new(0)
        }
    }

    /// Stored records in insertion order.
    pub fn rows(&self) -> Vec<TransactionRecord> {
        let mut rows: Vec<_> = self.rows.iter()
            .map(|item| (*item.key(), item.value().clone()))
            .collect();

        rows.sort_by_key(|(row_id, _)| *row_id);
        rows.into_iter().map(|(_, record)| record).collect()
    }

    /// Size of every batch written so far, in call order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        let mut batches: Vec<_> = self.batches.iter()
            .map(|item| (*item.key(), *item.value()))
            .collect();

        batches.sort_by_key(|(batch_id, _)| *batch_id);
        batches.into_iter().map(|(_, size)| size).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSink for MemorySink {
    async fn write_chunk(&self, records: &[TransactionRecord]) -> Result<(), SinkError> {
        let first_row_id = self.next_row_id.fetch_add(records.len() as u64, Ordering::SeqCst);

        for (offset, record) in records.iter().enumerate() {
            self.rows.insert(first_row_id + offset as u64, record.clone());
        }

        let batch_id = self.next_batch_id.fetch_add(1, Ordering::SeqCst);
        self.batches.insert(batch_id, records.len());

        Ok(())
    }
}
