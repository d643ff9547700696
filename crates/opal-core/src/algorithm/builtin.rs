//! Algorithms compiled into every registry built with
//! [`AlgorithmRegistry::with_builtins`](super::AlgorithmRegistry::with_builtins).

use anyhow::Result;

use super::registry::AlgorithmRegistry;
use super::trait_def::Algorithm;
use crate::runner::RunRequest;

/// Module name the built-in algorithms are registered under.
pub const MODULE: &str = "builtin";

/// Register all built-in algorithms.
pub fn register(registry: &mut AlgorithmRegistry) {
    registry.register(MODULE, Echo::NAME, echo);
}

fn echo() -> Box<dyn Algorithm> {
    Box::new(Echo)
}

/// Returns its four forwarded values joined by single spaces, in the order
/// `data_dir parameters number_of_threads results_csv_path`.
///
/// Touches neither the data directory nor the results path, so repeated runs
/// always print the same line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Echo;

impl Echo {
    pub const NAME: &'static str = "Echo";
}

impl Algorithm for Echo {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn execute(&self, request: &RunRequest<'_>) -> Result<String> {
        Ok(format!(
            "{} {} {} {}",
            request.data_dir.display(),
            request.parameters,
            request.number_of_threads,
            request.results_csv_path.display(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn echo_joins_forwarded_values() {
        let request = RunRequest {
            data_dir: Path::new("/data"),
            parameters: "k=v",
            number_of_threads: 4,
            results_csv_path: Path::new("/out.csv"),
        };
        assert_eq!(Echo.execute(&request).unwrap(), "/data k=v 4 /out.csv");
    }

    #[test]
    fn echo_keeps_parameters_verbatim() {
        let request = RunRequest {
            data_dir: Path::new("data dir"),
            parameters: "{\"a\": [1, 2]}",
            number_of_threads: 0,
            results_csv_path: Path::new("out.csv"),
        };
        assert_eq!(
            Echo.execute(&request).unwrap(),
            "data dir {\"a\": [1, 2]} 0 out.csv"
        );
    }

    #[test]
    fn register_adds_echo_under_builtin_module() {
        let mut registry = AlgorithmRegistry::new();
        register(&mut registry);
        assert_eq!(registry.modules(), vec![MODULE]);
        assert_eq!(registry.classes(MODULE), Some(vec![Echo::NAME]));
    }
}
