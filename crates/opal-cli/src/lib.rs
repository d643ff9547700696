//! Shared pieces of the `opal-dispatch`, `opal-job` and `opal-status`
//! binaries.

pub mod config;
pub mod exit_codes;
pub mod status;
