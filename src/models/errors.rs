use thiserror::Error;

use crate::models::{Origin, RawRecord};

/// A line that could not be turned into a [`RawRecord`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Line [{origin}] has [{found}] fields, expected [{expected}]")]
    FieldCount {
        origin: Origin,
        found: usize,
        expected: usize
    },
    #[error("Line [{origin}] has an invalid trxDate [{value}], expected YYYY-MM-DD")]
    InvalidDate {
        origin: Origin,
        value: String
    },
    #[error("Line [{origin}] has an invalid trxTime [{value}], expected HH:MM:SS")]
    InvalidTime {
        origin: Origin,
        value: String
    },
    #[error("Line [{origin}] could not be read: {reason}")]
    Malformed {
        origin: Origin,
        reason: String
    }
}

impl ParseError {
    pub fn field_count(origin: Origin, found: usize, expected: usize) -> Self {
        Self::FieldCount { origin, found, expected }
    }

    pub fn invalid_date(origin: Origin, value: &str) -> Self {
        Self::InvalidDate { origin, value: value.to_string() }
    }

    pub fn invalid_time(origin: Origin, value: &str) -> Self {
        Self::InvalidTime { origin, value: value.to_string() }
    }

    pub fn malformed(origin: Origin, reason: impl Into<String>) -> Self {
        Self::Malformed { origin, reason: reason.into() }
    }

    pub fn origin(&self) -> &Origin {
        match self {
            Self::FieldCount { origin, .. }
            | Self::InvalidDate { origin, .. }
            | Self::InvalidTime { origin, .. }
            | Self::Malformed { origin, .. } => origin
        }
    }
}

/// A parsed record that breaks one of the business rules.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Record [{origin}] has no account number")]
    MissingAccountNumber {
        origin: Origin
    },
    #[error("Record [{origin}] for account [{account_number}] has no amount")]
    MissingAmount {
        origin: Origin,
        account_number: String
    },
    #[error("Record [{origin}] for account [{account_number}] has an invalid amount [{value}]")]
    InvalidAmount {
        origin: Origin,
        account_number: String,
        value: String
    }
}

impl ValidationError {
    pub fn missing_account_number(record: &RawRecord) -> Self {
        Self::MissingAccountNumber { origin: record.origin.clone() }
    }

    pub fn missing_amount(record: &RawRecord) -> Self {
        Self::MissingAmount {
            origin: record.origin.clone(),
            account_number: record.account_number.clone()
        }
    }

    pub fn invalid_amount(record: &RawRecord) -> Self {
        Self::InvalidAmount {
            origin: record.origin.clone(),
            account_number: record.account_number.clone(),
            value: record.trx_amount.clone()
        }
    }

    pub fn origin(&self) -> &Origin {
        match self {
            Self::MissingAccountNumber { origin }
            | Self::MissingAmount { origin, .. }
            | Self::InvalidAmount { origin, .. } => origin
        }
    }
}
