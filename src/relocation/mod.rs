mod clock;
mod errors;
mod marker;
mod naming;
mod relocator;
#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::RelocationError;
pub use marker::{RunErrorMarker, MARKER_FILE_NAME};
pub use naming::destination_name;
pub use relocator::{FileRelocator, RelocationState, RelocationSummary, RelocatedFile};

/// Format of the generation timestamp inserted into relocated file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
/// Infix added to the name of files routed to the error directory.
pub const ERROR_INFIX: &str = "_ERROR_";
