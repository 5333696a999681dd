mod validator;

pub use validator::normalize;

/// Version given to records that arrive without one.
pub const INITIAL_VERSION: crate::models::Version = 0;
