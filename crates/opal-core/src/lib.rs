//! Runtime selection and execution of named algorithms.
//!
//! - [`algorithm`]: the [`Algorithm`](algorithm::Algorithm) trait and the
//!   registry that maps `(module, class)` names to factories.
//! - [`runner`]: the [`Runner`](runner::Runner) contract and
//!   [`AlgorithmRunner`](runner::AlgorithmRunner).
//! - [`dispatch`]: resolve, instantiate and run in one call.
//! - [`job`]: drive the dispatcher as a child process from a job file.

pub mod algorithm;
pub mod dispatch;
pub mod job;
pub mod logging;
pub mod runner;

pub use dispatch::{DispatchConfig, dispatch};
