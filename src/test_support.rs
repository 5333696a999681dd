use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::models::TransactionRecord;
use crate::storage::{MemorySink, SinkError, TransactionSink};

pub const HEADER: &str = "accountNumber|trxAmount|description|trxDate|trxTime|customerId";
pub const FIXED_TIMESTAMP: &str = "20230824123456";

pub fn valid_line(account: usize) -> String {
    format!("{account}|{account}.50|Payment {account}|2023-08-24|12:34:56|789")
}

/// Writes a header followed by `lines` into `directory/name`.
pub fn write_input(directory: &Path, name: &str, lines: &[String]) -> Result<PathBuf> {
    let path = directory.join(name);
    let mut content = format!("{HEADER}\n");

    for line in lines {
        content.push_str(line);
        content.push('\n');
    }

    fs::write(&path, content)?;

    Ok(path)
}

pub fn fixed_now() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2023, 8, 24)
        .and_then(|date| date.and_hms_opt(12, 34, 56))
        .ok_or_else(|| anyhow!("invalid fixed timestamp"))
}

/// Rejects every batch containing the poisoned account, stores the rest.
pub struct RejectingSink {
    pub inner: MemorySink,
    poisoned_account: String,
    calls: AtomicUsize
}

impl RejectingSink {
    pub fn new(poisoned_account: &str) -> Self {
        Self {
            inner: MemorySink::new(),
            poisoned_account: poisoned_account.to_string(),
            calls: AtomicUsize::new(0)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransactionSink for RejectingSink {
    async fn write_chunk(&self, records: &[TransactionRecord]) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if records.iter().any(|record| record.account_number == self.poisoned_account) {
            return Err(SinkError::Rejected(format!("account {} is not allowed", self.poisoned_account)))
        }

        self.inner.write_chunk(records).await
    }
}
