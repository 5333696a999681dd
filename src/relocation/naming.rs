use std::path::Path;

use crate::relocation::ERROR_INFIX;

/// Builds the relocated name of `file_name` by inserting the timestamp before
/// the extension, prefixed by `_ERROR_` for failed runs and `_` otherwise.
///
/// `batch.txt` becomes `batch_20230824123456.txt` or
/// `batch_ERROR_20230824123456.txt`. A name without an extension gets the
/// suffix appended.
pub fn destination_name(file_name: &str, timestamp: &str, failed: bool) -> String {
    let path = Path::new(file_name);
    let infix = if failed { ERROR_INFIX } else { "_" };

    let stem = path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);

    match path.extension().and_then(|extension| extension.to_str()) {
        Some(extension) => format!("{stem}{infix}{timestamp}.{extension}"),
        None => format!("{stem}{infix}{timestamp}")
    }
}
