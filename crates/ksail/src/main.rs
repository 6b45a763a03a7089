mod commands;
mod provisioner;

use clap::{Parser, Subcommand};
use commands::cluster::ClusterCommands;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ksail")]
#[command(about = "One CLI for Kind, K3d and EKS clusters", long_about = None)]
struct Cli {
    /// Path to ksail.yaml (discovered when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage cluster lifecycle
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },
    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Version => {
            println!("ksail {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Cluster { command } => {
            let loaded = ksail_config::load(cli.config.as_deref())?;
            commands::cluster::handle(command, loaded).await
        }
    }
}
