//! The `Algorithm` trait -- the interface every selectable algorithm implements.
//!
//! Algorithms are stored in the [`super::AlgorithmRegistry`] as zero-argument
//! factories and instantiated on demand, so the trait must be object-safe.

use anyhow::Result;

use crate::runner::RunRequest;

/// A unit of work that a runner executes against a data directory.
///
/// Implementors receive the forwarded request values untouched. How the data
/// directory is read, how the thread count is used, what is written to the
/// results path, and what the parameters string means are all up to the
/// implementation.
pub trait Algorithm: Send + Sync {
    /// Class name this algorithm is registered under (e.g. "Echo").
    fn name(&self) -> &str;

    /// Execute against the given request and return a printable result.
    fn execute(&self, request: &RunRequest<'_>) -> Result<String>;
}

// Compile-time assertion: Algorithm must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Algorithm) {}
};

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    struct NoopAlgorithm;

    impl Algorithm for NoopAlgorithm {
        fn name(&self) -> &str {
            "Noop"
        }

        fn execute(&self, _request: &RunRequest<'_>) -> Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn algorithm_is_object_safe() {
        let algorithm: Box<dyn Algorithm> = Box::new(NoopAlgorithm);
        assert_eq!(algorithm.name(), "Noop");
    }

    #[test]
    fn noop_algorithm_returns_empty_result() {
        let algorithm: Box<dyn Algorithm> = Box::new(NoopAlgorithm);
        let request = RunRequest {
            data_dir: Path::new("/data"),
            parameters: "",
            number_of_threads: 1,
            results_csv_path: Path::new("/out.csv"),
        };
        assert_eq!(algorithm.execute(&request).unwrap(), "");
    }
}
