mod errors;
mod raw_record;
mod transaction_record;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use errors::{ParseError, ValidationError};
pub use raw_record::RawRecord;
pub use transaction_record::TransactionRecord;

/// Optimistic-concurrency counter stored alongside every persisted record.
pub type Version = i32;

/// Where a record came from: the input file and the 1-based line within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    pub file: PathBuf,
    pub line: u64
}

impl Origin {
    pub fn new(file: impl Into<PathBuf>, line: u64) -> Self {
        Self {
            file: file.into(),
            line
        }
    }
}

impl Display for Origin {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.file.display(), self.line)
    }
}
