//! Runners -- execute one algorithm instance against a data directory.
//!
//! The dispatcher hands the four forwarded values to a [`Runner`] without
//! looking at them. [`AlgorithmRunner`] is the runner built around a single
//! resolved [`Algorithm`].

use std::path::Path;

use anyhow::{Context, Result};

use crate::algorithm::Algorithm;

/// The values a runner forwards to its algorithm, unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest<'a> {
    /// Directory holding the input data.
    pub data_dir: &'a Path,
    /// Free-form parameters string; never parsed by the dispatcher.
    pub parameters: &'a str,
    /// Requested degree of parallelism.
    pub number_of_threads: usize,
    /// Where the algorithm may write its CSV results.
    pub results_csv_path: &'a Path,
}

/// Executes work for a data directory and returns a printable result.
///
/// The argument order mirrors the dispatcher's contract:
/// `(data_dir, parameters, number_of_threads, results_csv_path)`.
pub trait Runner {
    fn run(
        &self,
        data_dir: &Path,
        parameters: &str,
        number_of_threads: usize,
        results_csv_path: &Path,
    ) -> Result<String>;
}

/// Runner constructed from one algorithm instance.
pub struct AlgorithmRunner {
    algorithm: Box<dyn Algorithm>,
}

impl AlgorithmRunner {
    pub fn new(algorithm: Box<dyn Algorithm>) -> Self {
        Self { algorithm }
    }

    /// The wrapped algorithm.
    pub fn algorithm(&self) -> &dyn Algorithm {
        self.algorithm.as_ref()
    }
}

impl Runner for AlgorithmRunner {
    fn run(
        &self,
        data_dir: &Path,
        parameters: &str,
        number_of_threads: usize,
        results_csv_path: &Path,
    ) -> Result<String> {
        let request = RunRequest {
            data_dir,
            parameters,
            number_of_threads,
            results_csv_path,
        };

        tracing::info!(
            algorithm = self.algorithm.name(),
            data_dir = %data_dir.display(),
            number_of_threads,
            results_csv_path = %results_csv_path.display(),
            "running algorithm"
        );

        let result = self
            .algorithm
            .execute(&request)
            .with_context(|| format!("algorithm {:?} failed", self.algorithm.name()))?;

        tracing::debug!(algorithm = self.algorithm.name(), "algorithm finished");
        Ok(result)
    }
}

impl std::fmt::Debug for AlgorithmRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgorithmRunner")
            .field("algorithm", &self.algorithm.name())
            .finish()
    }
}
