use chrono::{NaiveDate, NaiveTime};

use crate::models::{Origin, Version};

/// A single input line after it was split and its date/time fields were parsed.
///
/// The amount is kept as the text found in the file. Whether it is a usable
/// number is decided by the validator, not the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// File and line this record was read from.
    pub origin: Origin,
    pub account_number: String,
    /// Amount exactly as it appeared in the file.
    pub trx_amount: String,
    /// `None` when the description column is empty.
    pub description: Option<String>,
    pub trx_date: NaiveDate,
    pub trx_time: NaiveTime,
    pub customer_id: String,
    /// Input files carry no version column, so this is `None` unless set by a caller.
    pub version: Option<Version>
}
