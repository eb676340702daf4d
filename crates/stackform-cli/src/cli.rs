use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stackform")]
#[command(about = "Compile a deployment description into a provisioning template", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the service configuration into a resource template
    Compile {
        /// Path to the service configuration file
        #[arg(short, long, default_value = "service.yml")]
        config: PathBuf,

        /// Deployment stage (overrides the configured stage)
        #[arg(long)]
        stage: Option<String>,

        /// Deployment region (overrides the configured region)
        #[arg(long)]
        region: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
