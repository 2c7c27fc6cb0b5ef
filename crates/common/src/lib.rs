//! Process-level helpers shared by the service crate and the `maintenance` binary:
//! tracing initialisation and data directory checks.

pub mod utils;
pub mod env;
