use clap::Parser;

use opal_cli::status::{self, NodeSpecs};
use opal_core::algorithm::AlgorithmRegistry;
use opal_core::logging;

#[derive(Parser, Debug)]
#[command(
    name = "opal-status",
    version,
    about = "Serve GET /status and GET /specs for this compute node"
)]
struct Cli {
    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Send permissive CORS headers
    #[arg(long)]
    cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let specs = NodeSpecs::from_registry(
        &AlgorithmRegistry::with_builtins(),
        env!("CARGO_PKG_VERSION"),
    );
    status::run_serve(specs, &cli.bind, cli.port, cli.cors).await
}
