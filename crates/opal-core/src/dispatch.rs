//! The dispatch sequence: resolve, instantiate, run.
//!
//! One call to [`dispatch`] does exactly what one `opal-dispatch` process
//! does, minus argument parsing and printing.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::algorithm::AlgorithmRegistry;
use crate::runner::{AlgorithmRunner, Runner};

/// The six values a dispatch needs, parsed once at the command-line boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Registry module to look the class up in.
    pub module_name: String,
    /// Class name within `module_name`.
    pub class_name: String,
    pub data_dir: PathBuf,
    pub number_of_threads: usize,
    pub results_csv_path: PathBuf,
    /// Opaque; forwarded to the runner as-is.
    pub parameters: String,
}

/// Resolve the configured algorithm, wrap it in an [`AlgorithmRunner`] and
/// return whatever the runner returns.
///
/// Errors from lookup or from the runner propagate with added context only.
pub fn dispatch(config: &DispatchConfig, registry: &AlgorithmRegistry) -> Result<String> {
    let algorithm = registry
        .resolve(&config.module_name, &config.class_name)
        .with_context(|| {
            format!(
                "failed to load algorithm {}.{}",
                config.module_name, config.class_name
            )
        })?;

    let runner = AlgorithmRunner::new(algorithm);
    runner.run(
        &config.data_dir,
        &config.parameters,
        config.number_of_threads,
        &config.results_csv_path,
    )
}
