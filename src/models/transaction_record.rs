use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{Origin, Version};

/// A validated, normalized transaction ready to be persisted.
///
/// Every field maps one-to-one onto a column of the `transaction_record`
/// table. Records are only ever built by the validator and are not mutated
/// after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// File and line this record was read from. Not persisted.
    pub origin: Origin,
    pub account_number: String,
    pub trx_amount: Decimal,
    pub description: Option<String>,
    pub trx_date: NaiveDate,
    pub trx_time: NaiveTime,
    pub customer_id: String,
    /// Never absent once normalized, defaults to 0.
    pub version: Version
}
