use crate::provisioner;
use clap::{Args, Subcommand};
use colored::Colorize;
use ksail_config::{Distribution, LoadedConfig};

#[derive(Subcommand)]
pub enum ClusterCommands {
    /// Create a cluster
    Create(ClusterArgs),
    /// Delete a cluster
    Delete(ClusterArgs),
    /// Start a stopped cluster
    Start(ClusterArgs),
    /// Stop a running cluster
    Stop(ClusterArgs),
    /// Check whether a cluster exists
    Exists(ClusterArgs),
    /// List clusters
    List {
        /// Override the distribution from ksail.yaml (kind, k3d, eks)
        #[arg(short, long)]
        distribution: Option<Distribution>,
    },
}

#[derive(Args)]
pub struct ClusterArgs {
    /// Cluster name (defaults to the name in the distribution config)
    pub name: Option<String>,

    /// Override the distribution from ksail.yaml (kind, k3d, eks)
    #[arg(short, long)]
    pub distribution: Option<Distribution>,
}

pub async fn handle(command: ClusterCommands, mut loaded: LoadedConfig) -> anyhow::Result<()> {
    let (args, distribution) = match &command {
        ClusterCommands::List { distribution } => (None, *distribution),
        ClusterCommands::Create(args)
        | ClusterCommands::Delete(args)
        | ClusterCommands::Start(args)
        | ClusterCommands::Stop(args)
        | ClusterCommands::Exists(args) => (Some(args), args.distribution),
    };
    if let Some(distribution) = distribution {
        loaded.config.spec.distribution = distribution;
    }

    let name = args.and_then(|a| a.name.clone()).unwrap_or_default();
    let label = if name.is_empty() {
        "(configured)".to_string()
    } else {
        name.to_string()
    };

    let provisioner = provisioner::build(&loaded).await?;
    let distribution = provisioner.distribution();

    match &command {
        ClusterCommands::Create(_) => {
            println!("{}", format!("Creating {} cluster {}...", distribution, label).blue());
            provisioner.create(&name).await?;
            println!("{}", format!("✓ Created cluster {}", label).green().bold());
        }
        ClusterCommands::Delete(_) => {
            println!("{}", format!("Deleting {} cluster {}...", distribution, label).blue());
            provisioner.delete(&name).await?;
            println!("{}", format!("✓ Deleted cluster {}", label).green().bold());
        }
        ClusterCommands::Start(_) => {
            println!("{}", format!("Starting {} cluster {}...", distribution, label).blue());
            provisioner.start(&name).await?;
            println!("{}", format!("✓ Started cluster {}", label).green().bold());
        }
        ClusterCommands::Stop(_) => {
            println!("{}", format!("Stopping {} cluster {}...", distribution, label).blue());
            provisioner.stop(&name).await?;
            println!("{}", format!("✓ Stopped cluster {}", label).green().bold());
        }
        ClusterCommands::Exists(_) => {
            if provisioner.exists(&name).await? {
                println!("{} cluster {} exists", "✓".green(), label);
            } else {
                println!("{} cluster {} does not exist", "✗".yellow(), label);
            }
        }
        ClusterCommands::List { .. } => {
            let clusters = provisioner.list().await?;
            if clusters.is_empty() {
                println!("{}", format!("No {} clusters found", distribution).yellow());
            }
            for cluster in clusters {
                println!("  {}", cluster.cyan());
            }
        }
    }

    Ok(())
}
