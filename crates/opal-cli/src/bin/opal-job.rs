use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use opal_cli::{config, exit_codes};
use opal_core::job::{parse_job_toml, run_job};
use opal_core::logging;

#[derive(Parser, Debug)]
#[command(
    name = "opal-job",
    version,
    about = "Run one algorithm job through opal-dispatch and report the outcome as JSON"
)]
struct Cli {
    /// Path to the job TOML file
    job_file: PathBuf,
    /// Dispatcher binary (overrides OPAL_DISPATCHER env var)
    #[arg(long)]
    dispatcher: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(exit_codes::FAILED);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let content = tokio::fs::read_to_string(&cli.job_file)
        .await
        .with_context(|| format!("failed to read job file {}", cli.job_file.display()))?;
    let spec = parse_job_toml(&content)
        .with_context(|| format!("invalid job file {}", cli.job_file.display()))?;

    let dispatcher = config::resolve_dispatcher(cli.dispatcher.as_deref());
    let outcome = run_job(&spec, &dispatcher).await?;

    let json = serde_json::to_string_pretty(&outcome).context("failed to serialize outcome")?;
    println!("{json}");

    Ok(exit_codes::for_status(outcome.status))
}
