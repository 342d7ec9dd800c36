//! Telemetry client entry point

use clap::Parser;
use telemetry_client::cli::{self, Cli, Commands};
use telemetry_client::config::LoggingConfig;
use telemetry_client::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let logging_config = LoggingConfig::from_env().with_overrides(cli.log_format, cli.log_debug);
    if let Err(e) = logging::init(logging_config) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let kubeconfig = cli.kubeconfig.as_deref();
    let result = match &cli.command {
        Commands::KubernetesAgent(args) => cli::kubernetes_agent::execute(args, kubeconfig).await,
        Commands::KubermaticAgent(args) => cli::kubermatic_agent::execute(args, kubeconfig).await,
        Commands::Reporter(args) => cli::reporter::execute(args, kubeconfig).await,
    };

    match result {
        Ok(()) => info!("Operation completed."),
        Err(e) => {
            error!("Operation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
