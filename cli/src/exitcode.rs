//! Process exit codes

/// Successful termination
pub const OK: i32 = 0;

/// Command is not get, put, post or delete
pub const INVALID_INPUT: i32 = 1;

/// The request could not be made, or its answer could not be read
pub const REQUEST_FAILURE: i32 = 2;
