mod directory;
mod errors;
mod reader;

pub use directory::DirectorySource;
pub use errors::ReadError;
pub use reader::RecordReader;

/// Only files whose name ends with this suffix are ingested.
pub const INPUT_SUFFIX: &str = ".txt";
/// Column separator of the input files.
pub const FIELD_DELIMITER: u8 = b'|';
/// Positional column names, in file order.
pub const FIELD_NAMES: [&str; 6] = ["accountNumber", "trxAmount", "description", "trxDate", "trxTime", "customerId"];
