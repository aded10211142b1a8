pub mod bin_common;
pub mod change;

/// For stand-alone functionality that fit comfortably within one file.
pub mod utils;
