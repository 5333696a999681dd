use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{RawRecord, TransactionRecord, ValidationError};
use crate::processing::INITIAL_VERSION;

/// Validates a parsed record and fills in defaults.
///
/// Rules are checked in order and the first one broken is reported:
/// 1. the account number must not be blank;
/// 2. the amount must be present and a finite number;
/// 3. a missing version becomes [`INITIAL_VERSION`].
///
/// All other fields are carried over untouched.
pub fn normalize(record: RawRecord) -> Result<TransactionRecord, ValidationError> {
    if record.account_number.trim().is_empty() {
        return Err(ValidationError::missing_account_number(&record))
    }

    let amount = record.trx_amount.trim();

    if amount.is_empty() {
        return Err(ValidationError::missing_amount(&record))
    }

    //NOTE: Decimal has no NaN or infinity, so "NaN" and "Infinity" are rejected by the parse itself
    let Some(trx_amount) = parse_amount(amount) else {
        return Err(ValidationError::invalid_amount(&record))
    };

    Ok(TransactionRecord {
        origin: record.origin,
        account_number: record.account_number,
        trx_amount,
        description: record.description,
        trx_date: record.trx_date,
        trx_time: record.trx_time,
        customer_id: record.customer_id,
        version: record.version.unwrap_or(INITIAL_VERSION)
    })
}

fn parse_amount(value: &str) -> Option<Decimal> {
    //NOTE: Decimal::from_str also takes digit separators such as "1_000"
    if !value.bytes().all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')) {
        return None
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}
