use std::path::PathBuf;

use clap::Parser;

use opal_core::algorithm::AlgorithmRegistry;
use opal_core::{DispatchConfig, dispatch, logging};

#[derive(Parser, Debug)]
#[command(
    name = "opal-dispatch",
    version,
    about = "Run a registered algorithm class against a data directory and print the result"
)]
struct Cli {
    /// Registry module holding the algorithm (e.g. builtin)
    module_name: String,
    /// Algorithm class within the module (e.g. Echo)
    class_name: String,
    /// Input data directory, forwarded to the runner
    data_dir: PathBuf,
    /// Thread count, forwarded to the runner
    number_of_threads: usize,
    /// Results CSV path, forwarded to the runner
    results_csv_path: PathBuf,
    /// Opaque parameters string, forwarded to the runner
    #[arg(allow_hyphen_values = true)]
    parameters: String,
}

impl From<Cli> for DispatchConfig {
    fn from(cli: Cli) -> Self {
        Self {
            module_name: cli.module_name,
            class_name: cli.class_name,
            data_dir: cli.data_dir,
            number_of_threads: cli.number_of_threads,
            results_csv_path: cli.results_csv_path,
            parameters: cli.parameters,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = DispatchConfig::from(Cli::parse());
    logging::init();

    let registry = AlgorithmRegistry::with_builtins();
    tracing::debug!(?registry, "algorithm registry ready");

    let result = dispatch(&config, &registry)?;
    println!("{result}");
    Ok(())
}
